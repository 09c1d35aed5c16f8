//! Wave system
//!
//! Waves are plain data (a name plus "spawn N of kind K" entries) so they can
//! live in the config file. The manager only decides *when* a wave starts;
//! the level does the spawning.
//!
//! Timeline: initial delay → wave 1 spawns → wait until every enemy is dead
//! → cooldown → wave 2 spawns → ... → finished.

use serde::{Serialize, Deserialize};

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Baseline chaser
    Basic,
    /// Small, fast, high jumps
    Jumper,
    /// Big, slow, soaks bullets
    Tank,
}

/// Per-kind stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub radius: f32,
    pub health: i32,
    pub speed: f32,
    pub jump_speed: f32,
}

impl EnemyKind {
    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats { radius: 16.0, health: 60, speed: 230.0, jump_speed: 780.0 },
            EnemyKind::Jumper => EnemyStats { radius: 13.0, health: 40, speed: 260.0, jump_speed: 980.0 },
            EnemyKind::Tank => EnemyStats { radius: 24.0, health: 180, speed: 150.0, jump_speed: 620.0 },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Jumper => "jumper",
            EnemyKind::Tank => "tank",
        }
    }
}

/// "Spawn `count` enemies of `kind`"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    #[serde(alias = "type")]
    pub kind: EnemyKind,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDef {
    pub name: String,
    pub entries: Vec<WaveEntry>,
}

impl WaveDef {
    pub fn new(name: impl Into<String>, entries: &[(EnemyKind, u32)]) -> Self {
        Self {
            name: name.into(),
            entries: entries.iter().map(|&(kind, count)| WaveEntry { kind, count }).collect(),
        }
    }

    pub fn enemy_count(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }
}

/// The stock ten-wave run
pub fn default_waves() -> Vec<WaveDef> {
    use EnemyKind::*;
    vec![
        WaveDef::new("Wave 1", &[(Basic, 10)]),
        WaveDef::new("Wave 2", &[(Basic, 14)]),
        WaveDef::new("Wave 3", &[(Basic, 18)]),
        WaveDef::new("Wave 4", &[(Basic, 12), (Jumper, 4)]),
        WaveDef::new("Wave 5", &[(Basic, 14), (Jumper, 6)]),
        WaveDef::new("Wave 6", &[(Basic, 10), (Tank, 2)]),
        WaveDef::new("Wave 7", &[(Jumper, 10), (Tank, 2)]),
        WaveDef::new("Wave 8", &[(Basic, 16), (Jumper, 6), (Tank, 2)]),
        WaveDef::new("Wave 9", &[(Basic, 12), (Jumper, 8), (Tank, 4)]),
        WaveDef::new("Wave 10", &[(Basic, 20), (Jumper, 10), (Tank, 5)]),
    ]
}

pub struct WaveManager {
    defs: Vec<WaveDef>,
    cooldown: f32,
    /// 0-based internally
    index: usize,
    active: bool,
    timer: f32,
}

impl WaveManager {
    /// `first_delay` keeps the game from opening in instant chaos
    pub fn new(defs: Vec<WaveDef>, cooldown: f32, first_delay: f32) -> Self {
        Self {
            defs,
            cooldown,
            index: 0,
            active: false,
            timer: first_delay,
        }
    }

    /// 1-based wave number (one past the end once finished)
    pub fn wave_number(&self) -> usize {
        self.index + 1
    }

    pub fn total_waves(&self) -> usize {
        self.defs.len()
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.defs.len()
    }

    /// Is a wave currently in progress?
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_wave_def(&self) -> Option<&WaveDef> {
        self.defs.get(self.index)
    }

    /// Seconds until the next wave spawns (None while a wave is running)
    pub fn countdown(&self) -> Option<f32> {
        if self.active || self.is_finished() {
            None
        } else {
            Some(self.timer.max(0.0))
        }
    }

    /// Returns true if a new wave should spawn now.
    pub fn update(&mut self, dt: f32, alive_enemies: usize) -> bool {
        if self.is_finished() {
            return false;
        }

        if !self.active {
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.active = true;
                return true;
            }
            return false;
        }

        // Active wave: wait until all enemies are dead
        if alive_enemies == 0 {
            self.active = false;
            self.timer = self.cooldown;
            self.index += 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> WaveManager {
        WaveManager::new(
            vec![WaveDef::new("A", &[(EnemyKind::Basic, 2)]), WaveDef::new("B", &[(EnemyKind::Tank, 1)])],
            1.0,
            0.5,
        )
    }

    #[test]
    fn test_first_wave_after_delay() {
        let mut w = manager();
        assert!(!w.update(0.3, 0));
        let left = w.countdown().unwrap();
        assert!((left - 0.2).abs() < 1e-5);
        assert!(w.update(0.3, 0));
        assert!(w.is_active());
        assert_eq!(w.wave_number(), 1);
        assert_eq!(w.current_wave_def().unwrap().name, "A");
    }

    #[test]
    fn test_wave_advances_only_when_cleared() {
        let mut w = manager();
        assert!(w.update(1.0, 0));
        // Enemies still alive
        assert!(!w.update(5.0, 2));
        assert_eq!(w.wave_number(), 1);
        // Cleared: advance, start cooldown, no spawn this frame
        assert!(!w.update(0.016, 0));
        assert_eq!(w.wave_number(), 2);
        assert_eq!(w.countdown(), Some(1.0));
        assert!(!w.update(0.5, 0));
        assert!(w.update(0.5, 0));
        assert_eq!(w.current_wave_def().unwrap().name, "B");
    }

    #[test]
    fn test_finished_never_spawns() {
        let mut w = manager();
        w.update(1.0, 0);
        w.update(0.0, 0);
        w.update(2.0, 0);
        w.update(0.0, 0);
        assert!(w.is_finished());
        assert!(w.current_wave_def().is_none());
        assert!(!w.update(100.0, 0));
        assert_eq!(w.countdown(), None);
    }

    #[test]
    fn test_entry_accepts_type_alias() {
        let entry: WaveEntry = serde_json::from_str(r#"{"type": "basic", "count": 8}"#).unwrap();
        assert_eq!(entry, WaveEntry { kind: EnemyKind::Basic, count: 8 });
    }

    #[test]
    fn test_default_waves_start_like_classic() {
        let waves = default_waves();
        assert_eq!(waves.len(), 10);
        assert_eq!(waves[0].enemy_count(), 10);
        assert_eq!(waves[1].enemy_count(), 14);
        assert_eq!(waves[2].enemy_count(), 18);
    }
}
