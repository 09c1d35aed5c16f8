//! Input state management
//!
//! Polls keyboard/mouse (macroquad) and gamepad (gilrs) and folds them into
//! one `FrameInput` per frame. Simulation code only ever sees `FrameInput`,
//! so it runs the same in tests with no window.

use macroquad::prelude::*;
use crate::game::Camera;
use super::{Action, Gamepad};

/// Stick deflection that counts as a digital direction
const STICK_THRESHOLD: f32 = 0.5;

/// Everything the game needs to know about input for one frame.
///
/// "pressed"/"released" are one-frame edges, the rest are levels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub jump_held: bool,
    pub dash_pressed: bool,
    pub shoot_held: bool,
    /// World-space mouse position while the mouse button is held
    pub aim: Option<Vec2>,
    pub pause_pressed: bool,
    pub restart_pressed: bool,
    pub quit_pressed: bool,
}

impl FrameInput {
    /// -1, 0 or 1
    pub fn move_dir(&self) -> f32 {
        let mut m = 0.0;
        if self.left {
            m -= 1.0;
        }
        if self.right {
            m += 1.0;
        }
        m
    }
}

/// Unified input state that handles both keyboard/mouse and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame before checking actions
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        let pad = self.gamepad.buttons();
        action.keys().iter().any(|&k| is_key_down(k))
            || action.buttons().iter().any(|&b| pad.down(b))
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        let pad = self.gamepad.buttons();
        action.keys().iter().any(|&k| is_key_pressed(k))
            || action.buttons().iter().any(|&b| pad.pressed(b))
    }

    /// Check if action was just released this frame
    pub fn action_released(&self, action: Action) -> bool {
        let pad = self.gamepad.buttons();
        action.keys().iter().any(|&k| is_key_released(k))
            || action.buttons().iter().any(|&b| pad.released(b))
    }

    /// Poll and build this frame's snapshot. The camera maps the mouse into
    /// world space for aiming.
    pub fn snapshot(&mut self, camera: &Camera) -> FrameInput {
        self.poll();

        let stick = self.gamepad.left_stick();
        let mouse_held = is_mouse_button_down(MouseButton::Left);
        let aim = mouse_held.then(|| {
            let (mx, my) = mouse_position();
            camera.to_world(Vec2::new(mx, my))
        });

        FrameInput {
            left: self.action_down(Action::MoveLeft) || stick.x < -STICK_THRESHOLD,
            right: self.action_down(Action::MoveRight) || stick.x > STICK_THRESHOLD,
            jump_pressed: self.action_pressed(Action::Jump),
            jump_released: self.action_released(Action::Jump),
            jump_held: self.action_down(Action::Jump),
            dash_pressed: self.action_pressed(Action::Dash),
            shoot_held: self.action_down(Action::Shoot) || mouse_held,
            aim,
            pause_pressed: self.action_pressed(Action::Pause),
            restart_pressed: self.action_pressed(Action::Restart),
            quit_pressed: self.action_pressed(Action::Quit),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_dir() {
        let mut f = FrameInput::default();
        assert_eq!(f.move_dir(), 0.0);
        f.left = true;
        assert_eq!(f.move_dir(), -1.0);
        f.right = true;
        assert_eq!(f.move_dir(), 0.0);
        f.left = false;
        assert_eq!(f.move_dir(), 1.0);
    }
}
