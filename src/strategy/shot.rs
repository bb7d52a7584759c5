//! Line-of-fire validation by ray marching through the tile grid

use crate::config::StrategyConfig;
use crate::model::{Game, Tile, Unit, Vec2};

use super::target::EnemyContact;

/// March from `origin` along `direction` (its full length) in `steps`
/// equal increments. Fails on leaving the grid, entering a wall, or
/// touching a teammate of `shooter`.
pub fn ray_is_clear(origin: Vec2, direction: Vec2, shooter: &Unit, game: &Game, steps: u32) -> bool {
    let steps = steps.max(1);
    for i in 0..=steps {
        let point = origin + direction * (f64::from(i) / f64::from(steps));
        match game.level.tile(point) {
            None | Some(Tile::Wall) => return false,
            Some(Tile::Empty) | Some(Tile::Platform) => {}
        }
        if game.teammates_of(shooter).any(|mate| mate.contains(point)) {
            return false;
        }
    }
    true
}

/// Whether firing along `aim` is allowed this tick
pub fn can_shoot(
    unit: &Unit,
    game: &Game,
    enemy: Option<&EnemyContact>,
    aim: Vec2,
    config: &StrategyConfig,
) -> bool {
    if enemy.is_none() {
        return false;
    }

    let origin = unit.center();
    if !ray_is_clear(origin, aim, unit, game, config.ray_steps) {
        return false;
    }

    if config.check_spread_edges {
        let spread = unit.weapon.as_ref().map_or(0.0, |w| w.spread);
        if spread > 0.0 {
            return ray_is_clear(origin, aim.rotated(spread), unit, game, config.ray_steps)
                && ray_is_clear(origin, aim.rotated(-spread), unit, game, config.ray_steps);
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JumpState, Level, Properties, Weapon, WeaponType};

    fn unit(player_id: i32, id: i32, x: f64, y: f64) -> Unit {
        Unit {
            player_id,
            id,
            health: 100,
            position: Vec2::new(x, y),
            size: Vec2::new(0.9, 1.8),
            jump_state: JumpState::default(),
            weapon: Some(Weapon::new(WeaponType::AssaultRifle)),
        }
    }

    fn open_game(units: Vec<Unit>) -> Game {
        Game {
            current_tick: 0,
            properties: Properties::default(),
            level: Level::filled(20, 12, Tile::Empty),
            units,
            loot_boxes: vec![],
        }
    }

    fn contact(target: &Unit) -> EnemyContact {
        EnemyContact {
            id: target.id,
            position: target.position,
            center: target.center(),
            health: target.health,
            distance: 0.0,
        }
    }

    #[test]
    fn wall_cell_blocks_ray() {
        let mut game = open_game(vec![unit(1, 1, 5.0, 4.1)]);
        game.level.set(6, 5, Tile::Wall);
        let shooter = &game.units[0];

        assert!(!ray_is_clear(Vec2::new(5.0, 5.0), Vec2::new(2.0, 0.0), shooter, &game, 1000));
        assert!(ray_is_clear(Vec2::new(5.0, 5.0), Vec2::new(0.0, 2.0), shooter, &game, 1000));
    }

    #[test]
    fn platforms_do_not_block() {
        let mut game = open_game(vec![unit(1, 1, 5.0, 4.1)]);
        game.level.set(6, 5, Tile::Platform);
        let shooter = &game.units[0];
        assert!(ray_is_clear(Vec2::new(5.0, 5.0), Vec2::new(2.0, 0.0), shooter, &game, 1000));
    }

    #[test]
    fn ray_leaving_map_is_rejected() {
        let game = open_game(vec![unit(1, 1, 18.0, 1.0)]);
        let shooter = &game.units[0];
        assert!(!ray_is_clear(shooter.center(), Vec2::new(5.0, 0.0), shooter, &game, 1000));
        assert!(!ray_is_clear(shooter.center(), Vec2::new(0.0, -3.0), shooter, &game, 1000));
    }

    #[test]
    fn teammate_in_line_of_fire_blocks_shot() {
        let game = open_game(vec![
            unit(1, 1, 2.0, 1.0),
            unit(1, 2, 5.0, 1.0),
            unit(2, 3, 9.0, 1.0),
        ]);
        let me = &game.units[0];
        let enemy = contact(&game.units[2]);
        let aim = enemy.center - me.center();
        assert!(!can_shoot(me, &game, Some(&enemy), aim, &StrategyConfig::default()));

        let over_head = Vec2::new(7.0, 6.0);
        assert!(ray_is_clear(me.center(), over_head, me, &game, 1000));
    }

    #[test]
    fn no_enemy_means_no_fire() {
        let game = open_game(vec![unit(1, 1, 2.0, 1.0)]);
        let me = &game.units[0];
        assert!(!can_shoot(me, &game, None, Vec2::new(3.0, 0.0), &StrategyConfig::default()));
    }

    #[test]
    fn spread_edges_catch_walls_beside_the_centre_ray() {
        let mut game = open_game(vec![unit(1, 1, 2.0, 4.0), unit(2, 2, 12.0, 4.0)]);
        // Wall just above the centre line, halfway to the enemy
        game.level.set(7, 5, Tile::Wall);
        let me = &game.units[0];
        let enemy = contact(&game.units[1]);
        let aim = enemy.center - me.center();

        let centre_only = StrategyConfig::default();
        assert!(can_shoot(me, &game, Some(&enemy), aim, &centre_only));

        let with_edges = StrategyConfig {
            check_spread_edges: true,
            ..StrategyConfig::default()
        };
        assert!(!can_shoot(me, &game, Some(&enemy), aim, &with_edges));
    }
}
