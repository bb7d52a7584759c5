//! Per-tick output of the strategy and debug draw commands

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Action for one unit on one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitAction {
    /// Signed horizontal velocity, units per second
    pub velocity: f64,
    pub jump: bool,
    pub jump_down: bool,
    /// Aim offset relative to the weapon origin
    pub aim: Vec2,
    pub shoot: bool,
    pub reload: bool,
    pub swap_weapon: bool,
    pub plant_mine: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorF32 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorF32 {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Draw command accepted by a debug sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CustomData {
    Log {
        text: String,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: ColorF32,
    },
    Line {
        p1: Vec2,
        p2: Vec2,
        width: f32,
        color: ColorF32,
    },
}
