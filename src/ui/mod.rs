//! Screen-space UI: shared theme and the in-game HUD

pub mod hud;
pub mod theme;

pub use hud::{Hud, Overlay};
