//! Game action definitions and their default bindings
//!
//! Button mappings (Xbox/PlayStation):
//! - A/Cross = Jump
//! - B/Circle = Dash
//! - X/Square, RB/R1 = Shoot
//! - Start = Pause
//! - Select = Restart

use macroquad::prelude::KeyCode;
use super::gamepad::button;

/// All possible game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (also left stick / D-pad)
    MoveLeft,
    MoveRight,

    Jump,
    Dash,
    Shoot,

    // System
    Pause,
    Restart,
    Quit,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Dash,
        Action::Shoot,
        Action::Pause,
        Action::Restart,
        Action::Quit,
    ];

    /// Keyboard keys bound to this action
    pub fn keys(&self) -> &'static [KeyCode] {
        match self {
            Action::MoveLeft => &[KeyCode::A, KeyCode::Left],
            Action::MoveRight => &[KeyCode::D, KeyCode::Right],
            Action::Jump => &[KeyCode::Space, KeyCode::W, KeyCode::Up],
            Action::Dash => &[KeyCode::LeftShift, KeyCode::RightShift],
            Action::Shoot => &[KeyCode::J, KeyCode::K],
            Action::Pause => &[KeyCode::P],
            Action::Restart => &[KeyCode::R, KeyCode::Enter],
            Action::Quit => &[KeyCode::Escape],
        }
    }

    /// Gamepad buttons bound to this action
    pub fn buttons(&self) -> &'static [u32] {
        match self {
            Action::MoveLeft => &[button::DPAD_LEFT],
            Action::MoveRight => &[button::DPAD_RIGHT],
            Action::Jump => &[button::A],
            Action::Dash => &[button::B],
            Action::Shoot => &[button::X, button::RB],
            Action::Pause => &[button::START],
            Action::Restart => &[button::SELECT],
            Action::Quit => &[],
        }
    }
}
