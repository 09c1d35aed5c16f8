//! Abilities - powerup stacks turned into player stats
//!
//! Everything the player can do (run, jump, dash, shoot, survive) reads its
//! numbers from here rather than from constants, so collecting a powerup
//! changes behavior everywhere at once.

use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use crate::world::PowerupKind;

/// Smooth diminishing returns: `cap * (1 - (1 - per_stack/cap)^stacks)`.
///
/// The first stack is worth roughly `per_stack`, later stacks approach `cap`.
pub fn diminishing_returns(stacks: u32, per_stack: f32, cap: f32) -> f32 {
    if stacks == 0 {
        return 0.0;
    }
    let per_stack = per_stack.max(0.0);
    let cap = cap.max(0.00001);
    let base = (1.0 - per_stack / cap).clamp(0.0, 1.0);
    cap * (1.0 - base.powi(stacks as i32))
}

/// Base stats before any powerups
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityBase {
    // Movement
    pub run_speed: f32,
    pub air_control: f32,
    pub jump_speed: f32,
    pub max_jumps: u32,

    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,
    pub air_dashes_max: u32,

    // Combat
    pub bullet_damage: i32,
    pub bullet_speed: f32,
    /// Seconds between shots
    pub fire_rate: f32,

    // Survivability
    pub max_health: i32,
    pub spike_damage: i32,
    /// Lower is better
    pub damage_taken_mult: f32,
    pub regen_per_sec: f32,
    pub i_frames: f32,
}

impl Default for AbilityBase {
    fn default() -> Self {
        Self {
            run_speed: 230.0,
            air_control: 1.0,
            jump_speed: 820.0,
            max_jumps: 2,

            dash_speed: 560.0,
            dash_time: 0.14,
            dash_cooldown: 0.55,
            air_dashes_max: 1,

            bullet_damage: 20,
            bullet_speed: 820.0,
            fire_rate: 0.18,

            max_health: 100,
            spike_damage: 30,
            damage_taken_mult: 1.0,
            regen_per_sec: 0.0,
            i_frames: 0.18,
        }
    }
}

/// Powerup stacks plus the base they modify
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Abilities {
    pub base: AbilityBase,
    stacks: BTreeMap<PowerupKind, u32>,
}

impl Abilities {
    pub fn new(base: AbilityBase) -> Self {
        Self { base, stacks: BTreeMap::new() }
    }

    pub fn stack(&self, kind: PowerupKind) -> u32 {
        self.stacks.get(&kind).copied().unwrap_or(0)
    }

    /// Add stacks, returning the new count
    pub fn add_stack(&mut self, kind: PowerupKind, amount: u32) -> u32 {
        let entry = self.stacks.entry(kind).or_insert(0);
        *entry += amount;
        *entry
    }

    /// All non-zero stacks in a stable order (for the HUD)
    pub fn stacks(&self) -> impl Iterator<Item = (PowerupKind, u32)> + '_ {
        self.stacks.iter().filter(|(_, &n)| n > 0).map(|(&k, &n)| (k, n))
    }

    fn dr(&self, kind: PowerupKind, per_stack: f32, cap: f32) -> f32 {
        diminishing_returns(self.stack(kind), per_stack, cap)
    }

    // =========================================================================
    // Derived stats
    // =========================================================================

    pub fn max_health(&self) -> i32 {
        (self.base.max_health as f32 + self.dr(PowerupKind::HpUp, 20.0, 140.0)) as i32
    }

    pub fn run_speed(&self) -> f32 {
        self.base.run_speed
            + self.dr(PowerupKind::Speed, 35.0, 220.0)
            + self.dr(PowerupKind::Agility, 18.0, 120.0)
    }

    pub fn air_control(&self) -> f32 {
        self.base.air_control + self.dr(PowerupKind::Agility, 0.10, 0.50)
    }

    pub fn jump_speed(&self) -> f32 {
        self.base.jump_speed + self.dr(PowerupKind::Jump, 40.0, 200.0)
    }

    /// Wing sigils work on thresholds rather than a curve
    pub fn max_jumps(&self) -> u32 {
        let s = self.stack(PowerupKind::Wing);
        let extra = if s >= 5 {
            2
        } else if s >= 2 {
            1
        } else {
            0
        };
        self.base.max_jumps + extra
    }

    pub fn dash_cooldown(&self) -> f32 {
        (self.base.dash_cooldown - self.dr(PowerupKind::DashCore, 0.07, 0.30)).max(0.18)
    }

    pub fn dash_speed(&self) -> f32 {
        self.base.dash_speed + self.dr(PowerupKind::DashCore, 35.0, 160.0)
    }

    pub fn dash_time(&self) -> f32 {
        self.base.dash_time + self.dr(PowerupKind::DashCore, 0.01, 0.04)
    }

    pub fn air_dashes_max(&self) -> u32 {
        self.base.air_dashes_max + u32::from(self.stack(PowerupKind::DashCore) >= 4)
    }

    pub fn bullet_damage(&self) -> i32 {
        let bonus = self.dr(PowerupKind::Damage, 6.0, 45.0) + self.dr(PowerupKind::Frenzy, 3.0, 20.0);
        (self.base.bullet_damage as f32 + bonus) as i32
    }

    pub fn bullet_speed(&self) -> f32 {
        self.base.bullet_speed + self.dr(PowerupKind::Range, 90.0, 420.0)
    }

    pub fn fire_rate(&self) -> f32 {
        (self.base.fire_rate - self.dr(PowerupKind::Frenzy, 0.020, 0.090)).max(0.07)
    }

    pub fn damage_taken_mult(&self) -> f32 {
        (self.base.damage_taken_mult - self.dr(PowerupKind::Armor, 0.06, 0.45)).max(0.55)
    }

    /// Regen comes only from Regen Nodes; the base value adds on top
    pub fn regen_per_sec(&self) -> f32 {
        self.base.regen_per_sec + self.dr(PowerupKind::Regen, 1.5, 6.0)
    }

    pub fn spike_damage(&self) -> i32 {
        let reduced = self.base.spike_damage as f32 - self.dr(PowerupKind::SpikeResist, 5.0, 22.0);
        (reduced as i32).max(8)
    }

    pub fn i_frames(&self) -> f32 {
        self.base.i_frames + self.dr(PowerupKind::Tenacity, 0.05, 0.20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_diminishing_returns_curve() {
        assert_eq!(diminishing_returns(0, 20.0, 140.0), 0.0);
        assert!(approx(diminishing_returns(1, 20.0, 140.0), 20.0));
        let two = diminishing_returns(2, 20.0, 140.0);
        assert!(two > 20.0 && two < 40.0);
        // Never exceeds the cap
        assert!(diminishing_returns(200, 20.0, 140.0) <= 140.0);
    }

    #[test]
    fn test_diminishing_returns_per_stack_above_cap() {
        // Base clamps to 0, so a single stack saturates at the cap
        assert!(approx(diminishing_returns(1, 50.0, 10.0), 10.0));
    }

    #[test]
    fn test_base_stats_without_stacks() {
        let a = Abilities::default();
        assert_eq!(a.max_health(), 100);
        assert_eq!(a.max_jumps(), 2);
        assert_eq!(a.bullet_damage(), 20);
        assert_eq!(a.spike_damage(), 30);
        assert!(approx(a.regen_per_sec(), 0.0));
        assert!(approx(a.run_speed(), 230.0));
    }

    #[test]
    fn test_regen_adds_base_to_stacks() {
        let mut a = Abilities::new(AbilityBase { regen_per_sec: 1.0, ..AbilityBase::default() });
        assert!(approx(a.regen_per_sec(), 1.0));
        a.add_stack(PowerupKind::Regen, 2);
        assert!(approx(a.regen_per_sec(), 1.0 + diminishing_returns(2, 1.5, 6.0)));
    }

    #[test]
    fn test_wing_thresholds() {
        let mut a = Abilities::default();
        a.add_stack(PowerupKind::Wing, 1);
        assert_eq!(a.max_jumps(), 2);
        a.add_stack(PowerupKind::Wing, 1);
        assert_eq!(a.max_jumps(), 3);
        assert_eq!(a.add_stack(PowerupKind::Wing, 3), 5);
        assert_eq!(a.max_jumps(), 4);
    }

    #[test]
    fn test_floors_hold_with_many_stacks() {
        let mut a = Abilities::default();
        for kind in [PowerupKind::Frenzy, PowerupKind::Armor, PowerupKind::DashCore, PowerupKind::SpikeResist] {
            a.add_stack(kind, 50);
        }
        assert!(a.fire_rate() >= 0.07);
        assert!(a.damage_taken_mult() >= 0.55);
        assert!(a.dash_cooldown() >= 0.18);
        assert!(a.spike_damage() >= 8);
        assert_eq!(a.air_dashes_max(), 2);
    }

    #[test]
    fn test_hp_up_raises_max_health() {
        let mut a = Abilities::default();
        a.add_stack(PowerupKind::HpUp, 1);
        assert_eq!(a.max_health(), 120);
    }

    #[test]
    fn test_stacks_iterates_collected_only() {
        let mut a = Abilities::default();
        a.add_stack(PowerupKind::Speed, 2);
        a.add_stack(PowerupKind::Damage, 1);
        let list: Vec<_> = a.stacks().collect();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&(PowerupKind::Speed, 2)));
    }
}
