//! Powerup catalogue and the default per-wave drop table

use macroquad::prelude::Color;
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerupKind {
    Speed,
    HpUp,
    Damage,
    Armor,
    Frenzy,
    DashCore,
    Jump,
    Wing,
    Regen,
    SpikeResist,
    Tenacity,
    Range,
    Agility,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 13] = [
        PowerupKind::Speed,
        PowerupKind::HpUp,
        PowerupKind::Damage,
        PowerupKind::Armor,
        PowerupKind::Frenzy,
        PowerupKind::DashCore,
        PowerupKind::Jump,
        PowerupKind::Wing,
        PowerupKind::Regen,
        PowerupKind::SpikeResist,
        PowerupKind::Tenacity,
        PowerupKind::Range,
        PowerupKind::Agility,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            PowerupKind::Speed => "Sprint Core",
            PowerupKind::HpUp => "Heart Shard",
            PowerupKind::Damage => "Rifle Rune",
            PowerupKind::Armor => "Plating",
            PowerupKind::Frenzy => "Trigger Relay",
            PowerupKind::DashCore => "Dash Core",
            PowerupKind::Jump => "Spring Coil",
            PowerupKind::Wing => "Wing Sigil",
            PowerupKind::Regen => "Regen Node",
            PowerupKind::SpikeResist => "Spike Insulation",
            PowerupKind::Tenacity => "Tenacity",
            PowerupKind::Range => "Ballistics",
            PowerupKind::Agility => "Agility",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PowerupKind::Speed => "+Run speed (stacks)",
            PowerupKind::HpUp => "+Max HP (stacks)",
            PowerupKind::Damage => "+Bullet damage (stacks)",
            PowerupKind::Armor => "-Damage taken (stacks)",
            PowerupKind::Frenzy => "+Fire rate (stacks)",
            PowerupKind::DashCore => "-Dash CD, +dash speed",
            PowerupKind::Jump => "+Jump power (stacks)",
            PowerupKind::Wing => "+Extra jumps (threshold)",
            PowerupKind::Regen => "+HP regen (stacks)",
            PowerupKind::SpikeResist => "-Spike damage (stacks)",
            PowerupKind::Tenacity => "+I-frames (stacks)",
            PowerupKind::Range => "+Bullet speed (stacks)",
            PowerupKind::Agility => "+Air control (stacks)",
        }
    }

    pub fn color(&self) -> Color {
        let (r, g, b) = match self {
            PowerupKind::Speed => (90, 220, 255),
            PowerupKind::HpUp => (255, 90, 120),
            PowerupKind::Damage => (255, 200, 80),
            PowerupKind::Armor => (160, 170, 190),
            PowerupKind::Frenzy => (255, 140, 60),
            PowerupKind::DashCore => (180, 120, 255),
            PowerupKind::Jump => (120, 255, 140),
            PowerupKind::Wing => (120, 190, 255),
            PowerupKind::Regen => (80, 255, 150),
            PowerupKind::SpikeResist => (255, 110, 110),
            PowerupKind::Tenacity => (255, 255, 140),
            PowerupKind::Range => (140, 255, 220),
            PowerupKind::Agility => (170, 255, 170),
        };
        Color::from_rgba(r, g, b, 255)
    }
}

/// Wave number → powerups dropped when that wave starts
pub fn default_wave_powerups() -> BTreeMap<u32, Vec<PowerupKind>> {
    use PowerupKind::*;
    BTreeMap::from([
        (1, vec![Speed]),
        (2, vec![HpUp]),
        (3, vec![Damage]),
        (4, vec![DashCore]),
        (5, vec![Armor, Frenzy]),
        (8, vec![HpUp, Damage, Range]),
        (10, vec![Wing]),
    ])
}
