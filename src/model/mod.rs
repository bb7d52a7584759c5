//! Plain data records describing the world, as delivered by the match runner

pub mod action;
pub mod game;
pub mod level;
pub mod unit;
pub mod vec2;
pub mod weapon;

pub use action::{ColorF32, CustomData, UnitAction};
pub use game::{Game, Item, LootBox, Properties};
pub use level::{Level, Tile};
pub use unit::{JumpState, Unit};
pub use vec2::Vec2;
pub use weapon::{BulletParams, ExplosionParams, Weapon, WeaponParams, WeaponType};
