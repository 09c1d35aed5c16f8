//! Theme - Shared colors and styling constants
//!
//! Centralized color definitions for the world, entities and HUD.

use macroquad::prelude::Color;

// =============================================================================
// World
// =============================================================================

/// Clear color behind everything
pub const BG_COLOR: Color = Color::new(0.071, 0.071, 0.094, 1.0); // ~18, 18, 24

pub const TILE_COLOR: Color = Color::new(0.275, 0.275, 0.345, 1.0); // ~70, 70, 88

/// Top edge highlight on tiles
pub const TILE_EDGE: Color = Color::new(0.361, 0.361, 0.447, 1.0); // ~92, 92, 114

pub const SPIKE_COLOR: Color = Color::new(0.922, 0.353, 0.353, 1.0); // ~235, 90, 90

pub const STAR_COLOR: Color = Color::new(0.471, 0.471, 0.627, 1.0); // ~120, 120, 160

pub const WORLD_BORDER: Color = Color::new(0.176, 0.176, 0.235, 1.0); // ~45, 45, 60

// =============================================================================
// Entities
// =============================================================================

pub const PLAYER_COLOR: Color = Color::new(0.863, 0.863, 1.0, 1.0); // ~220, 220, 255

/// Player body while dashing
pub const PLAYER_DASH_COLOR: Color = Color::new(0.667, 0.784, 1.0, 1.0); // ~170, 200, 255

pub const BULLET_COLOR: Color = Color::new(0.863, 0.863, 0.471, 1.0); // ~220, 220, 120

/// Dark outline for pickups
pub const OUTLINE_DARK: Color = Color::new(0.078, 0.078, 0.102, 1.0); // ~20, 20, 26

// Enemy health bar
pub const BAR_BG: Color = Color::new(0.157, 0.157, 0.216, 1.0); // ~40, 40, 55
pub const ENEMY_BAR_FILL: Color = Color::new(0.863, 0.314, 0.314, 1.0); // ~220, 80, 80
pub const ENEMY_BAR_BORDER: Color = Color::new(0.902, 0.902, 0.941, 1.0); // ~230, 230, 240

// =============================================================================
// HUD
// =============================================================================

/// Primary text color
pub const HUD_COLOR: Color = Color::new(0.961, 0.961, 1.0, 1.0); // ~245, 245, 255

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.706, 0.706, 0.745, 1.0); // ~180, 180, 190

pub const HP_FILL: Color = Color::new(0.314, 0.863, 0.471, 1.0); // ~80, 220, 120

/// Dims the world behind overlays
pub const OVERLAY_SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.55);

pub const DEFEAT_COLOR: Color = Color::new(1.0, 0.431, 0.431, 1.0); // ~255, 110, 110
pub const VICTORY_COLOR: Color = Color::new(1.0, 0.863, 0.471, 1.0); // ~255, 220, 120

// =============================================================================
// Font Sizes
// =============================================================================

/// Overlay title text size
pub const FONT_SIZE_HEADER: f32 = 40.0;

/// Standard HUD text size
pub const FONT_SIZE_CONTENT: f32 = 22.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 18.0;

/// Per-enemy-kind body color
pub fn enemy_color(kind: crate::world::EnemyKind) -> Color {
    use crate::world::EnemyKind;
    match kind {
        EnemyKind::Basic => Color::from_rgba(240, 120, 120, 255),
        EnemyKind::Jumper => Color::from_rgba(255, 170, 90, 255),
        EnemyKind::Tank => Color::from_rgba(190, 90, 160, 255),
    }
}

/// Copy of a color with a new alpha
pub fn with_alpha(c: Color, a: f32) -> Color {
    Color::new(c.r, c.g, c.b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let c = with_alpha(HUD_COLOR, 0.25);
        assert_eq!((c.r, c.g, c.b), (HUD_COLOR.r, HUD_COLOR.g, HUD_COLOR.b));
        assert_eq!(c.a, 0.25);
    }
}
