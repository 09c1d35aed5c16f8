//! Moving things: the player, enemies, bullets and pickups

pub mod player;
pub mod enemy;
pub mod bullet;
pub mod powerup;

pub use player::Player;
pub use enemy::{Enemy, EnemySnapshot, Surroundings};
pub use bullet::Bullet;
pub use powerup::Powerup;
