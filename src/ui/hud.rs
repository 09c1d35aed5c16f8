//! HUD - health, wave progress, stacks, toasts and the end/pause overlays
//!
//! Everything here is drawn in screen space after the world.

use macroquad::prelude::*;
use crate::world::{Level, WaveManager};
use super::theme::*;

/// Seconds a toast stays on screen
pub const TOAST_LIFE: f32 = 2.0;
/// Oldest toasts are dropped past this many
const MAX_TOASTS: usize = 6;

const BAR_W: f32 = 220.0;
const BAR_H: f32 = 18.0;
const MARGIN: f32 = 10.0;
const LINE_H: f32 = 22.0;

pub const HELP_TEXT: &str = "Shoot: J/K or Left Click  Dash: Shift  Pause: P";

/// Full-screen message on top of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Paused,
    Defeat,
    Victory,
}

impl Overlay {
    pub fn text(&self) -> &'static str {
        match self {
            Overlay::Paused => "PAUSED",
            Overlay::Defeat => "YOU DIED - press R to restart",
            Overlay::Victory => "VICTORY - press R for a new cave",
        }
    }

    fn color(&self) -> Color {
        match self {
            Overlay::Paused => HUD_COLOR,
            Overlay::Defeat => DEFEAT_COLOR,
            Overlay::Victory => VICTORY_COLOR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub color: Color,
    pub age: f32,
}

impl Toast {
    /// 1.0 when fresh, fading linearly to 0.0
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / TOAST_LIFE).clamp(0.0, 1.0)
    }
}

/// `Wave n/N` plus what the player is waiting on
pub fn wave_line(waves: &WaveManager, alive: usize) -> String {
    let total = waves.total_waves();
    if waves.is_finished() {
        return format!("Wave {}/{}  cleared", total, total);
    }
    let n = waves.wave_number();
    if waves.is_active() {
        return format!("Wave {}/{}  enemies left: {}", n, total, alive);
    }
    let t = waves.countdown().unwrap_or(0.0);
    format!("Wave {}/{}  next in {:.1}s", n, total, t)
}

#[derive(Debug, Default)]
pub struct Hud {
    toasts: Vec<Toast>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toast(&mut self, text: impl Into<String>, color: Color) {
        self.toasts.push(Toast { text: text.into(), color, age: 0.0 });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Age toasts and drop the expired ones
    pub fn update(&mut self, dt: f32) {
        for t in self.toasts.iter_mut() {
            t.age += dt;
        }
        self.toasts.retain(|t| t.age < TOAST_LIFE);
    }

    pub fn draw(&self, level: &Level, overlay: Option<Overlay>) {
        let player = &level.player;
        let x = MARGIN;
        let mut y = MARGIN;

        // HP bar
        let max = player.max_health().max(1);
        let frac = (player.health as f32 / max as f32).clamp(0.0, 1.0);
        draw_rectangle(x, y, BAR_W, BAR_H, BAR_BG);
        draw_rectangle(x, y, (BAR_W * frac).trunc(), BAR_H, HP_FILL);
        draw_rectangle_lines(x, y, BAR_W, BAR_H, 2.0, HUD_COLOR);
        y += BAR_H + LINE_H;

        let lines = [
            format!("HP: {}/{}", player.health, max),
            wave_line(&level.waves, level.alive_enemies()),
            format!("Kills: {}", level.kills),
        ];
        for line in &lines {
            draw_text(line, x, y, FONT_SIZE_CONTENT, HUD_COLOR);
            y += LINE_H;
        }

        // Collected stacks, in pickup colors
        y += 4.0;
        for (kind, n) in player.abilities.stacks() {
            draw_text(&format!("{} x{}", kind.name(), n), x, y, FONT_SIZE_SMALL, kind.color());
            y += FONT_SIZE_SMALL;
        }

        // Toasts stack up from the top right
        let sw = screen_width();
        let sh = screen_height();
        let mut ty = MARGIN + FONT_SIZE_CONTENT;
        for toast in self.toasts.iter().rev() {
            let dims = measure_text(&toast.text, None, FONT_SIZE_CONTENT as u16, 1.0);
            let tx = (sw - dims.width - MARGIN).round();
            draw_text(&toast.text, tx, ty, FONT_SIZE_CONTENT, with_alpha(toast.color, toast.alpha()));
            ty += LINE_H;
        }

        draw_text(HELP_TEXT, x, sh - MARGIN, FONT_SIZE_SMALL, TEXT_DIM);

        if let Some(overlay) = overlay {
            draw_overlay(overlay);
        }
    }
}

fn draw_overlay(overlay: Overlay) {
    let (sw, sh) = (screen_width(), screen_height());
    draw_rectangle(0.0, 0.0, sw, sh, OVERLAY_SHADE);

    let text = overlay.text();
    let dims = measure_text(text, None, FONT_SIZE_HEADER as u16, 1.0);
    let tx = ((sw - dims.width) * 0.5).round();
    let ty = ((sh + dims.height) * 0.5).round();
    draw_text(text, tx, ty, FONT_SIZE_HEADER, overlay.color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{EnemyKind, WaveDef};

    fn waves() -> WaveManager {
        WaveManager::new(
            vec![WaveDef::new("A", &[(EnemyKind::Basic, 2)]), WaveDef::new("B", &[(EnemyKind::Tank, 1)])],
            1.0,
            0.5,
        )
    }

    #[test]
    fn test_toasts_fade_and_expire() {
        let mut hud = Hud::new();
        hud.toast("+ Sprint Core", WHITE);
        hud.update(1.0);
        assert_eq!(hud.toasts().len(), 1);
        assert!((hud.toasts()[0].alpha() - 0.5).abs() < 1e-5);
        hud.update(1.0);
        assert!(hud.toasts().is_empty());
    }

    #[test]
    fn test_toast_cap_drops_oldest() {
        let mut hud = Hud::new();
        for i in 0..(MAX_TOASTS + 2) {
            hud.toast(format!("t{}", i), WHITE);
        }
        assert_eq!(hud.toasts().len(), MAX_TOASTS);
        assert_eq!(hud.toasts()[0].text, "t2");
    }

    #[test]
    fn test_wave_line_states() {
        let mut w = waves();
        assert_eq!(wave_line(&w, 0), "Wave 1/2  next in 0.5s");
        assert!(w.update(0.6, 0));
        assert_eq!(wave_line(&w, 2), "Wave 1/2  enemies left: 2");
        w.update(0.1, 0);
        assert!(w.update(1.1, 0));
        w.update(0.1, 0);
        assert_eq!(wave_line(&w, 0), "Wave 2/2  cleared");
    }

    #[test]
    fn test_overlay_text() {
        assert_eq!(Overlay::Defeat.text(), "YOU DIED - press R to restart");
        assert_eq!(Overlay::Victory.text(), "VICTORY - press R for a new cave");
    }
}
