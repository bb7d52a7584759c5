//! Horizontal velocity and jump flags toward the point of interest

use crate::config::StrategyConfig;
use crate::model::{Game, Level, Tile, Unit, Vec2};

use super::target::{EnemyContact, PointOfInterest};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementPlan {
    pub velocity: f64,
    pub jump: bool,
    pub jump_down: bool,
}

/// Steer toward the POI, or patrol back and forth when there is none
pub fn plan_movement(
    unit: &Unit,
    game: &Game,
    poi: Option<&PointOfInterest>,
    enemy: Option<&EnemyContact>,
    config: &StrategyConfig,
) -> MovementPlan {
    let properties = &game.properties;
    let max_speed = properties.unit_max_horizontal_speed;

    let Some(poi) = poi else {
        let period = config.patrol_period_ticks.max(1);
        let velocity = if game.current_tick % period < period / 2 {
            -max_speed
        } else {
            max_speed
        };
        return MovementPlan {
            velocity,
            jump: true,
            jump_down: false,
        };
    };

    let target = poi.position;
    let velocity =
        ((target.x - unit.position.x) * properties.ticks_per_second).clamp(-max_speed, max_speed);

    let jump = target.y > unit.position.y
        || wall_ahead(unit, &game.level, target, config.arrival_margin)
        || enemy.map_or(false, |e| {
            e.center.distance(unit.center()) < config.close_combat_distance
        });

    MovementPlan {
        velocity,
        jump,
        jump_down: !jump && target.y < unit.position.y,
    }
}

/// Wall in the next column toward the target, ignoring targets within
/// `margin` horizontally
fn wall_ahead(unit: &Unit, level: &Level, target: Vec2, margin: f64) -> bool {
    let position = unit.position;
    if position.x < target.x - margin {
        level.is_wall(position + Vec2::new(1.0, 0.0))
    } else if position.x > target.x + margin {
        level.is_wall(position - Vec2::new(1.0, 0.0))
    } else {
        false
    }
}

/// Drop a jump request while the agent stands in open space on top of a
/// platform early in its jump window. Stops endless micro-hops on
/// platform edges.
///
/// The window is the agent's own `max_time`, or `unit_jump_time` when the
/// runner did not report one.
pub fn stabilize_jump(unit: &Unit, game: &Game, jump: bool, config: &StrategyConfig) -> bool {
    if !jump {
        return false;
    }

    let level = &game.level;
    let standing_on_platform = level.tile(unit.position.offset_y(-1.0)) == Some(Tile::Platform)
        && level.tile(unit.position) == Some(Tile::Empty);

    let max_time = if unit.jump_state.max_time > 0.0 {
        unit.jump_state.max_time
    } else {
        game.properties.unit_jump_time
    };
    let early_in_jump = unit.jump_state.elapsed < config.jump_stabilize_ratio * max_time;

    !(standing_on_platform && early_in_jump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JumpState, Properties};
    use crate::strategy::target::PoiKind;

    fn agent(x: f64, y: f64) -> Unit {
        Unit {
            player_id: 1,
            id: 1,
            health: 100,
            position: Vec2::new(x, y),
            size: Vec2::new(0.9, 1.8),
            jump_state: JumpState {
                can_jump: true,
                can_cancel: true,
                speed: 10.0,
                elapsed: 0.0,
                max_time: 0.55,
            },
            weapon: None,
        }
    }

    fn flat_game(tick: u64) -> Game {
        let mut level = Level::filled(30, 20, Tile::Empty);
        for x in 0..30 {
            level.set(x, 0, Tile::Wall);
        }
        Game {
            current_tick: tick,
            properties: Properties::default(),
            level,
            units: vec![],
            loot_boxes: vec![],
        }
    }

    fn poi(x: f64, y: f64) -> PointOfInterest {
        PointOfInterest {
            kind: PoiKind::HealthPack,
            position: Vec2::new(x, y),
        }
    }

    fn plan(unit: &Unit, game: &Game, target: Option<PointOfInterest>) -> MovementPlan {
        plan_movement(unit, game, target.as_ref(), None, &StrategyConfig::default())
    }

    #[test]
    fn patrol_flips_direction_halfway_through_window() {
        let unit = agent(10.0, 1.0);
        let left = plan(&unit, &flat_game(10), None);
        let right = plan(&unit, &flat_game(60), None);
        let left_again = plan(&unit, &flat_game(120), None);

        assert_eq!(left.velocity, -10.0);
        assert_eq!(right.velocity, 10.0);
        assert_eq!(left_again.velocity, -10.0);
        assert!(left.jump && !left.jump_down);
    }

    #[test]
    fn velocity_decelerates_near_target() {
        let unit = agent(10.0, 1.0);
        let game = flat_game(0);

        assert_eq!(plan(&unit, &game, Some(poi(20.0, 1.0))).velocity, 10.0);
        assert_eq!(plan(&unit, &game, Some(poi(2.0, 1.0))).velocity, -10.0);

        let near = plan(&unit, &game, Some(poi(10.1, 1.0))).velocity;
        assert!((near - 6.0).abs() < 1e-9);
        assert_eq!(plan(&unit, &game, Some(poi(10.0, 1.0))).velocity, 0.0);
    }

    #[test]
    fn jumps_toward_higher_target_and_drops_to_lower() {
        let unit = agent(10.0, 5.0);
        let game = flat_game(0);

        let up = plan(&unit, &game, Some(poi(12.0, 7.0)));
        assert!(up.jump && !up.jump_down);

        let down = plan(&unit, &game, Some(poi(12.0, 1.0)));
        assert!(!down.jump && down.jump_down);

        let level = plan(&unit, &game, Some(poi(12.0, 5.0)));
        assert!(!level.jump && !level.jump_down);
    }

    #[test]
    fn wall_ahead_triggers_jump_only_in_travel_direction() {
        let unit = agent(10.5, 1.0);
        let mut game = flat_game(0);
        game.level.set(11, 1, Tile::Wall);

        assert!(plan(&unit, &game, Some(poi(15.0, 1.0))).jump);
        assert!(!plan(&unit, &game, Some(poi(5.0, 1.0))).jump);
        // Inside the arrival dead zone
        assert!(!plan(&unit, &game, Some(poi(10.9, 1.0))).jump);
    }

    #[test]
    fn wall_probe_at_map_edge_is_safe() {
        let unit = agent(0.5, 1.0);
        let game = flat_game(0);
        let result = plan(&unit, &game, Some(poi(-3.0, 1.0)));
        assert!(!result.jump);
        assert_eq!(result.velocity, -10.0);
    }

    #[test]
    fn close_enemy_forces_jump() {
        let unit = agent(9.0, 1.0);
        let game = flat_game(0);
        let enemy = EnemyContact {
            id: 2,
            position: Vec2::new(10.0, 1.0),
            center: Vec2::new(10.0, 1.9),
            health: 100,
            distance: 1.9,
        };
        let target = poi(4.0, 1.0);
        let result = plan_movement(
            &unit,
            &game,
            Some(&target),
            Some(&enemy),
            &StrategyConfig::default(),
        );
        assert!(result.jump);
        assert!(!result.jump_down);
    }

    #[test]
    fn platform_hop_is_suppressed_early_in_jump() {
        let mut game = flat_game(0);
        game.level.set(10, 4, Tile::Platform);
        let config = StrategyConfig::default();

        let mut unit = agent(10.5, 5.0);
        assert!(!stabilize_jump(&unit, &game, true, &config));

        unit.jump_state.elapsed = 0.5;
        assert!(stabilize_jump(&unit, &game, true, &config));

        let off_platform = agent(15.5, 5.0);
        assert!(stabilize_jump(&off_platform, &game, true, &config));
        assert!(!stabilize_jump(&off_platform, &game, false, &config));
    }

    #[test]
    fn missing_jump_window_falls_back_to_game_jump_time() {
        let mut game = flat_game(0);
        game.level.set(10, 4, Tile::Platform);
        let config = StrategyConfig::default();

        let mut unit = agent(10.5, 5.0);
        unit.jump_state = JumpState::default();
        unit.jump_state.elapsed = 0.3;

        // 0.3 is early against 0.8 * 0.55
        assert!(!stabilize_jump(&unit, &game, true, &config));

        game.properties.unit_jump_time = 0.3;
        assert!(stabilize_jump(&unit, &game, true, &config));
    }
}
