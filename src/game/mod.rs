//! Game foundation
//!
//! Small building blocks the simulation is made of:
//! - Rect / collision: axis-aligned boxes and separated-axis movement
//! - Abilities: powerup stacks turned into player stats
//! - Camera: smooth follow and world <-> screen mapping
//! - Events: decoupled reporting from the simulation to the app and HUD
//! - Runtime: frame pacing

pub mod abilities;
pub mod camera;
pub mod collision;
pub mod constants;
pub mod event;
pub mod rect;
pub mod runtime;

pub use abilities::{diminishing_returns, Abilities, AbilityBase};
pub use camera::Camera;
pub use constants::*;
pub use event::*;
pub use rect::Rect;
pub use runtime::{limit_frame, FpsLimit};
