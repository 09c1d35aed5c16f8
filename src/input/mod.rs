//! Input handling with gamepad support
//!
//! Action-based input over keyboard/mouse and gamepad, collapsed into a
//! per-frame `FrameInput` snapshot.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: keyboard and mouse only

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use gamepad::{Gamepad, ButtonMask, button};
pub use state::*;
