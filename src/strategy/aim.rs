//! Lead-compensated aiming at the nearest enemy

use crate::config::StrategyConfig;
use crate::model::{Properties, Unit, Vec2};

use super::memory::PersistentMemory;
use super::target::EnemyContact;

/// Aim computed for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimSolution {
    /// Offset from the weapon origin to `target`
    pub aim: Vec2,
    /// Predicted enemy position at impact
    pub target: Vec2,
    /// Ticks of enemy motion extrapolated into `target`
    pub lead_ticks: f64,
}

/// Aim at where the enemy will be when the bullet arrives.
///
/// Enemy velocity is its displacement since this agent last saw it, divided
/// by the ticks elapsed since that sighting; the extrapolation is capped at
/// `lead_cap_ticks`. Unarmed agents aim
/// straight at the enemy. Both the aim and the enemy sighting are written
/// back to `memory`. Returns `None` without touching memory when there is
/// no enemy.
pub fn predict_aim(
    unit: &Unit,
    enemy: Option<&EnemyContact>,
    properties: &Properties,
    tick: u64,
    memory: &mut PersistentMemory,
    config: &StrategyConfig,
) -> Option<AimSolution> {
    let enemy = enemy?;
    let origin = unit.center();
    let current = enemy.center;
    let velocity = memory
        .last_sighting(unit.id, enemy.id)
        .map_or(Vec2::ZERO, |seen| seen.velocity_to(current, tick));

    let lead_ticks = match &unit.weapon {
        Some(weapon) if weapon.params.bullet.speed > 0.0 => {
            let travel_ticks =
                origin.distance(current) / weapon.params.bullet.speed * properties.ticks_per_second;
            travel_ticks.min(config.lead_cap_ticks)
        }
        _ => 0.0,
    };

    let target = current + velocity * lead_ticks;
    let aim = target - origin;

    memory.remember_aim(unit.id, aim);
    memory.remember_enemy(unit.id, enemy.id, current, tick);

    Some(AimSolution {
        aim,
        target,
        lead_ticks,
    })
}
