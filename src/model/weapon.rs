//! Weapon types and their static parameters

use serde::{Deserialize, Serialize};

/// Weapon types. There is no ordering among them: the policy only tells the
/// configured best type apart from the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    /// Accurate but slow to fire
    Pistol,
    /// Single heavy round with splash damage
    RocketLauncher,
    /// High rate of fire, large magazine
    AssaultRifle,
}

impl WeaponType {
    pub const ALL: [WeaponType; 3] = [
        WeaponType::Pistol,
        WeaponType::RocketLauncher,
        WeaponType::AssaultRifle,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletParams {
    /// Units per second
    pub speed: f64,
    pub size: f64,
    pub damage: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionParams {
    pub radius: f64,
    pub damage: i32,
}

/// Static per-type weapon parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponParams {
    pub magazine_size: i32,
    /// Seconds between shots
    pub fire_rate: f64,
    /// Seconds
    pub reload_time: f64,
    /// Radians
    pub min_spread: f64,
    /// Radians
    pub max_spread: f64,
    pub recoil: f64,
    pub aim_speed: f64,
    pub bullet: BulletParams,
    pub explosion: Option<ExplosionParams>,
}

impl WeaponParams {
    /// Stock parameters for a weapon type
    pub fn for_type(typ: WeaponType) -> Self {
        match typ {
            WeaponType::Pistol => Self {
                magazine_size: 8,
                fire_rate: 0.4,
                reload_time: 1.0,
                min_spread: 0.05,
                max_spread: 0.5,
                recoil: 0.5,
                aim_speed: 1.0,
                bullet: BulletParams {
                    speed: 50.0,
                    size: 0.2,
                    damage: 20,
                },
                explosion: None,
            },
            WeaponType::AssaultRifle => Self {
                magazine_size: 20,
                fire_rate: 0.1,
                reload_time: 1.0,
                min_spread: 0.1,
                max_spread: 0.5,
                recoil: 0.2,
                aim_speed: 1.9,
                bullet: BulletParams {
                    speed: 50.0,
                    size: 0.2,
                    damage: 5,
                },
                explosion: None,
            },
            WeaponType::RocketLauncher => Self {
                magazine_size: 1,
                fire_rate: 1.0,
                reload_time: 1.0,
                min_spread: 0.1,
                max_spread: 0.5,
                recoil: 1.0,
                aim_speed: 1.0,
                bullet: BulletParams {
                    speed: 20.0,
                    size: 0.4,
                    damage: 30,
                },
                explosion: Some(ExplosionParams {
                    radius: 3.0,
                    damage: 50,
                }),
            },
        }
    }
}

/// Weapon currently held by a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub typ: WeaponType,
    pub params: WeaponParams,
    /// Rounds left in the magazine
    pub magazine: i32,
    /// Current spread angle in radians
    pub spread: f64,
    /// Seconds until the next shot is possible, if cooling down
    #[serde(default)]
    pub fire_timer: Option<f64>,
}

impl Weapon {
    /// Freshly picked-up weapon with a full magazine
    pub fn new(typ: WeaponType) -> Self {
        let params = WeaponParams::for_type(typ);
        Self {
            typ,
            params,
            magazine: params.magazine_size,
            spread: params.min_spread,
            fire_timer: None,
        }
    }

    /// Whether the magazine is at or below half capacity
    pub fn is_half_empty(&self) -> bool {
        2 * self.magazine <= self.params.magazine_size
    }
}
