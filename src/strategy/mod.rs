//! Per-tick decision policy for one controlled unit
//!
//! Each tick runs the stages in order:
//! - target: pick a point of interest (heal, upgrade, engage)
//! - aim: lead the nearest enemy using its last observed motion
//! - movement: velocity and jump flags toward the point of interest
//! - weapon: pickup and reload intents
//! - shot: ray-march the aim line for walls, map edges and teammates
//!
//! The only state that survives a tick lives in [`PersistentMemory`], which
//! the caller owns. Every visible enemy is recorded there each tick.

pub mod aim;
pub mod debug;
pub mod memory;
pub mod movement;
pub mod shot;
pub mod target;
pub mod weapon;

use tracing::trace;

use crate::config::StrategyConfig;
use crate::model::{ColorF32, CustomData, Game, Unit, UnitAction, Vec2};

pub use debug::{DebugSink, NoopDebug, RecordingDebug};
pub use memory::{PersistentMemory, Sighting};
pub use target::{EnemyContact, PoiKind, PointOfInterest};

const POI_COLOR: ColorF32 = ColorF32::new(0.2, 0.9, 0.2, 0.6);
const AIM_COLOR: ColorF32 = ColorF32::new(0.9, 0.2, 0.2, 0.8);
const POI_MARKER: Vec2 = Vec2::new(0.5, 0.5);

/// Decision policy. Holds only immutable tunables, so one instance can
/// serve any number of matches.
#[derive(Debug, Clone, Default)]
pub struct Strategy {
    config: StrategyConfig,
}

impl Strategy {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Decide the action of `unit` for the current tick
    pub fn get_action(
        &self,
        unit: &Unit,
        game: &Game,
        memory: &mut PersistentMemory,
        debug: &mut dyn DebugSink,
    ) -> UnitAction {
        let config = &self.config;

        let enemy = target::nearest_enemy(unit, game);
        let poi = target::select_target(unit, game, enemy.as_ref(), config);

        let tick = game.current_tick;
        let aim = match aim::predict_aim(
            unit,
            enemy.as_ref(),
            &game.properties,
            tick,
            memory,
            config,
        ) {
            Some(solution) => solution.aim,
            None => memory.last_aim(unit.id),
        };
        // Every enemy, not only the one aimed at
        for other in game.enemies_of(unit) {
            let center = other.position.offset_y(unit.size.y / 2.0);
            memory.remember_enemy(unit.id, other.id, center, tick);
        }

        let plan = movement::plan_movement(unit, game, poi.as_ref(), enemy.as_ref(), config);
        let swap_weapon = weapon::should_swap(unit, game, config);
        let shoot = shot::can_shoot(unit, game, enemy.as_ref(), aim, config);
        let reload = weapon::should_reload(unit, shoot);

        // Applied last: only the jump flag may change
        let jump = movement::stabilize_jump(unit, game, plan.jump, config);

        let action = UnitAction {
            velocity: plan.velocity,
            jump,
            jump_down: plan.jump_down,
            aim,
            shoot,
            reload,
            swap_weapon,
            // Mine planting stays off; no placement policy exists yet
            plant_mine: false,
        };

        draw_decision(debug, unit, poi.as_ref(), aim);

        trace!(
            tick,
            unit_id = unit.id,
            poi = ?poi.map(|p| p.kind),
            enemy_id = ?enemy.map(|e| e.id),
            velocity = action.velocity,
            jump = action.jump,
            jump_down = action.jump_down,
            shoot = action.shoot,
            reload = action.reload,
            swap_weapon = action.swap_weapon,
            "Unit decision"
        );

        action
    }
}

fn draw_decision(debug: &mut dyn DebugSink, unit: &Unit, poi: Option<&PointOfInterest>, aim: Vec2) {
    match poi {
        Some(poi) => {
            debug.draw(CustomData::Log {
                text: format!(
                    "unit {}: {:?} at ({:.2}, {:.2})",
                    unit.id, poi.kind, poi.position.x, poi.position.y
                ),
            });
            debug.draw(CustomData::Rect {
                pos: poi.position - POI_MARKER * 0.5,
                size: POI_MARKER,
                color: POI_COLOR,
            });
        }
        None => debug.draw(CustomData::Log {
            text: format!("unit {}: patrolling", unit.id),
        }),
    }

    let origin = unit.center();
    debug.draw(CustomData::Line {
        p1: origin,
        p2: origin + aim,
        width: 0.1,
        color: AIM_COLOR,
    });
}
