//! Weapon pickup and reload intents

use crate::config::StrategyConfig;
use crate::model::{Game, Unit, Vec2};

/// Swap when unarmed, or when the best weapon type lies within reach
pub fn should_swap(unit: &Unit, game: &Game, config: &StrategyConfig) -> bool {
    let Some(weapon) = &unit.weapon else {
        return true;
    };
    if weapon.typ == config.best_weapon {
        return false;
    }

    let (min, max) = pickup_zone(unit, config.pickup_margin);
    game.loot_boxes
        .iter()
        .any(|loot| loot.weapon_type() == Some(config.best_weapon) && loot.intersects(min, max))
}

/// Reload a half-empty magazine, but never on a tick we fire
pub fn should_reload(unit: &Unit, shoot: bool) -> bool {
    if shoot {
        return false;
    }
    unit.weapon.as_ref().map_or(false, |w| w.is_half_empty())
}

/// Agent bounding box grown by `margin` on every side
fn pickup_zone(unit: &Unit, margin: f64) -> (Vec2, Vec2) {
    let half_width = unit.size.x / 2.0 + margin;
    let min = Vec2::new(unit.position.x - half_width, unit.position.y - margin);
    let max = Vec2::new(
        unit.position.x + half_width,
        unit.position.y + unit.size.y + margin,
    );
    (min, max)
}
