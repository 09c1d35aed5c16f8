//! Frame pacing
//!
//! macroquad presents with vsync where the platform allows, but that isn't
//! guaranteed (and is often off on Linux), so the main loop caps the frame
//! rate itself.

use serde::{Serialize, Deserialize};

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    /// 30 FPS
    Fps30,
    /// 60 FPS (smooth gameplay)
    #[default]
    Fps60,
    /// Unlocked (as fast as possible)
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }

    /// Parse a CLI value: `30`, `60` or `unlocked`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "30" => Some(FpsLimit::Fps30),
            "60" => Some(FpsLimit::Fps60),
            "unlocked" | "0" | "off" => Some(FpsLimit::Unlocked),
            _ => None,
        }
    }
}

/// Block until the frame that started at `frame_start` (from `get_time()`)
/// has taken at least the limit's frame time.
pub fn limit_frame(limit: FpsLimit, frame_start: f64) {
    let Some(target_frame_time) = limit.frame_time() else {
        return;
    };
    let now = macroquad::prelude::get_time;

    #[cfg(not(target_arch = "wasm32"))]
    {
        // Native: use sleep for bulk, then spin-wait for precision
        let spin_margin = 0.002; // 2ms
        while now() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while now() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        // WASM: just spin-wait (no thread::sleep available)
        while now() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time() {
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
        let t = FpsLimit::Fps30.frame_time().unwrap();
        assert!((t - 1.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_and_label() {
        assert_eq!(FpsLimit::parse("60"), Some(FpsLimit::Fps60));
        assert_eq!(FpsLimit::parse("Unlocked"), Some(FpsLimit::Unlocked));
        assert_eq!(FpsLimit::parse("144"), None);
        assert_eq!(FpsLimit::Fps30.label(), "30");
    }
}
