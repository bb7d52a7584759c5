//! Units (the controlled agent and everyone else on the map)

use serde::{Deserialize, Serialize};

use super::{Vec2, Weapon};

/// Jump bookkeeping reported by the simulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JumpState {
    pub can_jump: bool,
    pub can_cancel: bool,
    /// Vertical speed while the jump lasts
    pub speed: f64,
    /// Seconds already spent in the current jump
    pub elapsed: f64,
    /// Maximum duration of the current jump in seconds
    pub max_time: f64,
}

/// A unit on the map. The same record describes the controlled agent,
/// its teammates and enemies; `player_id` tells the sides apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub player_id: i32,
    pub id: i32,
    pub health: i32,
    /// Bottom-centre of the bounding box
    pub position: Vec2,
    pub size: Vec2,
    #[serde(default)]
    pub jump_state: JumpState,
    #[serde(default)]
    pub weapon: Option<Weapon>,
}

impl Unit {
    /// Body centre, half the unit height above `position`
    pub fn center(&self) -> Vec2 {
        self.position.offset_y(self.size.y / 2.0)
    }

    /// Whether a point lies inside this unit's bounding box
    pub fn contains(&self, point: Vec2) -> bool {
        let half_width = self.size.x / 2.0;
        point.x >= self.position.x - half_width
            && point.x <= self.position.x + half_width
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.y
    }

    pub fn is_teammate_of(&self, other: &Unit) -> bool {
        self.player_id == other.player_id && self.id != other.id
    }

    pub fn is_enemy_of(&self, other: &Unit) -> bool {
        self.player_id != other.player_id
    }
}
