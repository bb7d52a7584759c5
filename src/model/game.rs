//! World snapshot handed to the strategy once per tick

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ExplosionParams, Level, Unit, Vec2, WeaponParams, WeaponType};

/// Loot box contents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    HealthPack { health: i32 },
    Weapon { weapon_type: WeaponType },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootBox {
    /// Bottom-centre of the box
    pub position: Vec2,
    /// Extent of this box as reported in the snapshot
    pub size: Vec2,
    pub item: Item,
}

impl LootBox {
    pub fn is_health_pack(&self) -> bool {
        matches!(self.item, Item::HealthPack { .. })
    }

    pub fn weapon_type(&self) -> Option<WeaponType> {
        match self.item {
            Item::Weapon { weapon_type } => Some(weapon_type),
            Item::HealthPack { .. } => None,
        }
    }

    /// Axis-aligned overlap with the box `[min, max]`
    pub fn intersects(&self, min: Vec2, max: Vec2) -> bool {
        let half_width = self.size.x / 2.0;
        self.position.x - half_width <= max.x
            && self.position.x + half_width >= min.x
            && self.position.y <= max.y
            && self.position.y + self.size.y >= min.y
    }
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub ticks_per_second: f64,
    pub unit_size: Vec2,
    pub unit_max_horizontal_speed: f64,
    /// Maximum jump duration in seconds, used when a unit reports none
    pub unit_jump_time: f64,
    pub unit_max_health: i32,
    pub health_pack_health: i32,
    pub mine_explosion_params: ExplosionParams,
    pub weapon_params: HashMap<WeaponType, WeaponParams>,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            ticks_per_second: 60.0,
            unit_size: Vec2::new(0.9, 1.8),
            unit_max_horizontal_speed: 10.0,
            unit_jump_time: 0.55,
            unit_max_health: 100,
            health_pack_health: 50,
            mine_explosion_params: ExplosionParams {
                radius: 3.0,
                damage: 50,
            },
            weapon_params: WeaponType::ALL
                .iter()
                .map(|&typ| (typ, WeaponParams::for_type(typ)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub current_tick: u64,
    pub properties: Properties,
    pub level: Level,
    pub units: Vec<Unit>,
    #[serde(default)]
    pub loot_boxes: Vec<LootBox>,
}

impl Game {
    /// Units on a different side than `unit`
    pub fn enemies_of<'a>(&'a self, unit: &'a Unit) -> impl Iterator<Item = &'a Unit> + 'a {
        self.units.iter().filter(move |other| other.is_enemy_of(unit))
    }

    /// Units on the same side as `unit`, excluding `unit` itself
    pub fn teammates_of<'a>(&'a self, unit: &'a Unit) -> impl Iterator<Item = &'a Unit> + 'a {
        self.units.iter().filter(move |other| other.is_teammate_of(unit))
    }
}
