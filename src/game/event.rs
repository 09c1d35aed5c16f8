//! Per-frame event queues
//!
//! `Level::update` records what happened (hits, kills, pickups, waves,
//! respawns, death) into `Events`. `Game::frame` drains every queue once
//! the update is done and turns them into log lines, toasts and camera
//! snaps. Nothing here outlives a frame.

use macroquad::prelude::Vec2;
use crate::world::{EnemyKind, PowerupKind};

/// FIFO of one event type
#[derive(Debug)]
pub struct EventQueue<T> {
    pending: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.pending.push(event);
    }

    /// Peek without consuming
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.pending.iter()
    }

    /// Take everything, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One queue per kind of thing the level reports
#[derive(Debug, Default)]
pub struct Events {
    /// Player took damage
    pub damage: EventQueue<DamageEvent>,

    /// An enemy died
    pub enemy_killed: EventQueue<EnemyKilledEvent>,

    /// Player picked up a powerup
    pub powerup_collected: EventQueue<PowerupCollectedEvent>,

    /// A new wave spawned
    pub wave_started: EventQueue<WaveStartedEvent>,

    /// Player health reached zero
    pub player_died: EventQueue<PlayerDiedEvent>,

    /// Player fell out of the world and was put back
    pub respawned: EventQueue<RespawnEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.damage.clear();
        self.enemy_killed.clear();
        self.powerup_collected.clear();
        self.wave_started.clear();
        self.player_died.clear();
        self.respawned.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// What hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Spike,
    Enemy,
}

#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Damage actually applied (after armor)
    pub amount: i32,
    pub source: DamageSource,
    /// Health left after the hit
    pub remaining: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyKilledEvent {
    pub kind: EnemyKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub struct PowerupCollectedEvent {
    pub kind: PowerupKind,
    /// Stack count after pickup
    pub stacks: u32,
}

#[derive(Debug, Clone)]
pub struct WaveStartedEvent {
    /// 1-based wave number
    pub number: usize,
    pub name: String,
    pub enemies: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerDiedEvent {
    pub wave: usize,
    pub kills: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct RespawnEvent {
    pub position: Vec2,
}
