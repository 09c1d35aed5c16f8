//! Gamepad support
//!
//! Native: gilrs, first connected pad only
//! WASM: no gamepad (always reports disconnected)

use macroquad::prelude::Vec2;

// Standard gamepad button indices (Web Gamepad API standard mapping, Xbox layout)
pub mod button {
    pub const A: u32 = 0;           // South
    pub const B: u32 = 1;           // East
    pub const X: u32 = 2;           // West
    pub const Y: u32 = 3;           // North
    pub const LB: u32 = 4;
    pub const RB: u32 = 5;
    pub const SELECT: u32 = 8;      // Back/Select
    pub const START: u32 = 9;       // Start/Options
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

/// Button bit masks for this frame and the last one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonMask {
    pub current: u32,
    pub previous: u32,
}

impl ButtonMask {
    /// Shift in a new frame's mask
    pub fn push(&mut self, mask: u32) {
        self.previous = self.current;
        self.current = mask;
    }

    pub fn down(&self, button: u32) -> bool {
        self.current & (1 << button) != 0
    }

    pub fn pressed(&self, button: u32) -> bool {
        self.down(button) && self.previous & (1 << button) == 0
    }

    pub fn released(&self, button: u32) -> bool {
        !self.down(button) && self.previous & (1 << button) != 0
    }
}

// ============================================================================
// WASM Implementation (no gamepad)
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad {
        buttons: ButtonMask,
    }

    impl Gamepad {
        pub fn new() -> Self {
            Self { buttons: ButtonMask::default() }
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn buttons(&self) -> ButtonMask {
            self.buttons
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Gilrs, Button as GilrsButton, Axis};

    pub struct Gamepad {
        /// None when the backend failed to start (no gamepad support)
        gilrs: Option<Gilrs>,
        deadzone: f32,
        buttons: ButtonMask,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    tracing::warn!(error = %e, "gamepad backend unavailable");
                    None
                }
            };
            Self {
                gilrs,
                deadzone: 0.15,
                buttons: ButtonMask::default(),
            }
        }

        /// Drain backend events and latch this frame's buttons
        pub fn poll(&mut self) {
            if let Some(gilrs) = self.gilrs.as_mut() {
                while let Some(event) = gilrs.next_event() {
                    match event.event {
                        gilrs::EventType::Connected => tracing::info!(id = ?event.id, "gamepad connected"),
                        gilrs::EventType::Disconnected => tracing::info!(id = ?event.id, "gamepad disconnected"),
                        _ => {}
                    }
                }
            }
            let mask = self.read_button_mask();
            self.buttons.push(mask);
        }

        pub fn has_gamepad(&self) -> bool {
            self.active_gamepad().is_some()
        }

        fn active_gamepad(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn read_button_mask(&self) -> u32 {
            let Some(gp) = self.active_gamepad() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::East) { mask |= 1 << button::B; }
            if gp.is_pressed(GilrsButton::West) { mask |= 1 << button::X; }
            if gp.is_pressed(GilrsButton::North) { mask |= 1 << button::Y; }
            if gp.is_pressed(GilrsButton::LeftTrigger) { mask |= 1 << button::LB; }
            if gp.is_pressed(GilrsButton::RightTrigger) { mask |= 1 << button::RB; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << button::SELECT; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadDown) { mask |= 1 << button::DPAD_DOWN; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        pub fn buttons(&self) -> ButtonMask {
            self.buttons
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active_gamepad() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = -gp.value(Axis::LeftStickY); // screen space: down is +y
            apply_deadzone(x, y, self.deadzone)
        }
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Apply radial deadzone with linear rescaling
pub fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

// Re-export the platform-specific implementation
pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges() {
        let mut m = ButtonMask::default();
        m.push(1 << button::A);
        assert!(m.pressed(button::A));
        assert!(m.down(button::A));
        m.push(1 << button::A);
        assert!(!m.pressed(button::A));
        m.push(0);
        assert!(m.released(button::A));
        assert!(!m.down(button::A));
    }

    #[test]
    fn test_deadzone() {
        assert_eq!(apply_deadzone(0.1, 0.0, 0.15), Vec2::ZERO);
        let full = apply_deadzone(1.0, 0.0, 0.15);
        assert!((full.x - 1.0).abs() < 1e-5);
    }
}
