//! Game state and core simulation types
//!
//! Everything the per-frame loop mutates lives here: the phase machine,
//! the entity collections, the session RNG, and the tick-driven clock.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::enemy::{Enemy, EnemyKind};
use super::player::Player;
use super::spawner::Spawner;
use crate::consts::*;

/// Axis-aligned bounding box, the spatial base of every entity.
///
/// Coordinates are pixel-scale plane units, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Non-positive dimensions are a fatal precondition violation.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "rect dimensions must be positive ({width}x{height})"
        );
        Self { x, y, width, height }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict AABB overlap; touching edges do not collide.
    pub fn collides_with(&self, other: &Rect) -> bool {
        super::collision::rects_overlap(self, other)
    }
}

/// Passive pickup dropped by dying enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    pub collected: bool,
    pub value: u64,
    /// Per-instance phase shift for the floating animation
    pub animation_offset: f32,
}

impl Coin {
    pub fn new(pos: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, COIN_SIZE, COIN_SIZE),
            collected: false,
            value: COIN_VALUE,
            animation_offset: rng.random::<f32>() * TAU,
        }
    }

    /// Vertical oscillation. Unbounded drift is fine: coins are short-lived
    /// and the collision box rides along.
    pub fn update(&mut self, now_ms: f64) {
        if self.collected {
            return;
        }
        let t = (now_ms / 500.0) as f32 + self.animation_offset;
        self.rect.y += t.sin() * 0.5;
    }
}

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Between-stage rest screen, simulation frozen
    StageClear,
    /// Run ended, terminal until restart
    GameOver,
    /// External customize overlay, simulation suspended
    Customizing,
}

/// Fire-and-forget cue for external collaborators (audio, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Coin collected
    Coin,
    /// Enemy killed by an attack
    EnemyDeath { kind: EnemyKind },
    /// Player reached a new level
    LevelUp { level: u32 },
    /// Run ended
    GameOver,
    /// Stage timer expired or next stage began
    StageClear,
    /// Background music should start/resume
    BgmStart,
    /// Background music should stop
    BgmStop,
}

/// Complete simulation state for one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG (enemy types, coin drops, random-walk directions)
    pub rng: Pcg32,
    /// Simulated wall clock in milliseconds, advanced by the tick
    pub clock_ms: f64,
    /// Current playable viewport size
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    pub stage: u32,
    /// Stage length in seconds
    pub stage_time_secs: u32,
    /// Seconds left in the current stage (HUD-facing)
    pub remaining_secs: u32,
    /// Clock value when the current stage began
    pub stage_start_ms: f64,
    /// When the next stage begins, while in StageClear
    pub next_stage_start_ms: f64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub spawners: Vec<Spawner>,
    /// Pending cues, drained by collaborators via take_events
    pub events: Vec<GameEvent>,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Create a session. The viewport must be known up front; a game
    /// cannot run without one.
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "viewport dimensions must be positive ({width}x{height})"
        );
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock_ms: 0.0,
            bounds: Vec2::new(width, height),
            phase: GamePhase::Playing,
            score: 0,
            stage: 1,
            stage_time_secs: STAGE_TIME_SECS,
            remaining_secs: STAGE_TIME_SECS,
            stage_start_ms: 0.0,
            next_stage_start_ms: 0.0,
            player: Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)),
            enemies: Vec::new(),
            coins: Vec::new(),
            spawners: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        super::tick::setup_spawners(&mut state);
        state.events.push(GameEvent::BgmStart);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Viewport changed: clamp nothing here (the tick does), but re-anchor
    /// the spawners to the new corners.
    pub fn resize(&mut self, width: f32, height: f32) {
        assert!(
            width > 0.0 && height > 0.0,
            "viewport dimensions must be positive ({width}x{height})"
        );
        self.bounds = Vec2::new(width, height);
        let anchors = super::tick::spawner_anchors(self.bounds);
        for (spawner, anchor) in self.spawners.iter_mut().zip(anchors) {
            spawner.rect.x = anchor.x;
            spawner.rect.y = anchor.y;
        }
    }

    /// Drain pending cues for the audio/UI collaborators
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
