//! Point-of-interest selection: heal, upgrade, or engage

use serde::Serialize;

use crate::config::StrategyConfig;
use crate::model::{Game, LootBox, Unit, Vec2};

/// Nearest enemy as seen from the agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyContact {
    pub id: i32,
    /// Feet position
    pub position: Vec2,
    /// Body centre, the point the agent steers and aims at
    pub center: Vec2,
    pub health: i32,
    /// Manhattan distance from the agent to `center`
    pub distance: f64,
}

/// Find the enemy closest to the agent by Manhattan distance.
/// Ties keep the first unit in snapshot order.
pub fn nearest_enemy(unit: &Unit, game: &Game) -> Option<EnemyContact> {
    let mut best: Option<EnemyContact> = None;
    for enemy in game.enemies_of(unit) {
        let center = enemy.position.offset_y(unit.size.y / 2.0);
        let distance = unit.position.manhattan(center);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(EnemyContact {
                id: enemy.id,
                position: enemy.position,
                center,
                health: enemy.health,
                distance,
            });
        }
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiKind {
    /// Healing because health is low or an enemy is healthier
    HealthPack,
    /// Better weapon on the map
    Weapon,
    /// Nearest enemy
    Enemy,
    /// No enemy left, so top up health
    FallbackHealthPack,
}

/// Where the agent is heading this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    pub kind: PoiKind,
    pub position: Vec2,
}

impl PointOfInterest {
    fn new(kind: PoiKind, position: Vec2) -> Self {
        Self { kind, position }
    }
}

/// Pick the POI for this tick; first matching rule wins.
pub fn select_target(
    unit: &Unit,
    game: &Game,
    enemy: Option<&EnemyContact>,
    config: &StrategyConfig,
) -> Option<PointOfInterest> {
    if needs_healing(unit, game) {
        if let Some(pack) = nearest_health_pack(unit, game, enemy, config.contested_pack_penalty) {
            return Some(PointOfInterest::new(PoiKind::HealthPack, pack));
        }
    }

    if let Some(weapon) = nearest_weapon(unit, game, config) {
        return Some(PointOfInterest::new(PoiKind::Weapon, weapon));
    }

    if let Some(enemy) = enemy {
        return Some(PointOfInterest::new(PoiKind::Enemy, enemy.center));
    }

    nearest_health_pack(unit, game, None, 0.0)
        .map(|pack| PointOfInterest::new(PoiKind::FallbackHealthPack, pack))
}

/// Low on health, or outgunned on health by any enemy
pub fn needs_healing(unit: &Unit, game: &Game) -> bool {
    let properties = &game.properties;
    let threshold =
        properties.unit_max_health as f64 - properties.health_pack_health as f64 / 2.0;

    (unit.health as f64) < threshold || game.enemies_of(unit).any(|e| e.health > unit.health)
}

/// Closest health pack. A pack the nearest enemy is closer to than the agent
/// has `contested_penalty` added to its distance.
fn nearest_health_pack(
    unit: &Unit,
    game: &Game,
    enemy: Option<&EnemyContact>,
    contested_penalty: f64,
) -> Option<Vec2> {
    nearest_loot(unit, game, LootBox::is_health_pack, |loot, distance| match enemy {
        Some(enemy) if enemy.position.manhattan(loot.position) < distance => {
            distance + contested_penalty
        }
        _ => distance,
    })
}

/// Closest weapon worth picking up: anything when unarmed, only the best
/// type when already armed, nothing when the best type is in hand.
fn nearest_weapon(unit: &Unit, game: &Game, config: &StrategyConfig) -> Option<Vec2> {
    let held = unit.weapon.as_ref().map(|w| w.typ);
    if held == Some(config.best_weapon) {
        return None;
    }

    nearest_loot(
        unit,
        game,
        |loot| match loot.weapon_type() {
            Some(typ) => held.is_none() || typ == config.best_weapon,
            None => false,
        },
        |_, distance| distance,
    )
}

fn nearest_loot(
    unit: &Unit,
    game: &Game,
    accept: impl Fn(&LootBox) -> bool,
    effective_distance: impl Fn(&LootBox, f64) -> f64,
) -> Option<Vec2> {
    let mut best: Option<(f64, Vec2)> = None;
    for loot in &game.loot_boxes {
        if !accept(loot) {
            continue;
        }
        let distance = effective_distance(loot, unit.position.manhattan(loot.position));
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, loot.position));
        }
    }
    best.map(|(_, position)| position)
}
