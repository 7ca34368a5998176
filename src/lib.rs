//! Blade Arena - a top-down sword-slashing arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `presets`: Cosmetic player color palettes
//!
//! Rendering, audio, and raw input capture are external collaborators:
//! they feed [`sim::TickInput`] in and consume [`sim::Snapshot`] and
//! [`sim::GameEvent`] cues out.

pub mod presets;
pub mod sim;

pub use presets::{PlayerColors, PlayerPreset};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the nominal arcade frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    pub const PLAYER_SPAWN_Y: f32 = 50.0;

    /// Sword attack
    pub const ATTACK_DURATION_MS: f32 = 200.0;
    pub const ATTACK_RANGE: f32 = 80.0;
    pub const AUTO_ATTACK_RANGE: f32 = 150.0;
    pub const AUTO_ATTACK_COOLDOWN_MS: f64 = 500.0;
    pub const AUTO_ATTACK_COOLDOWN_FLOOR_MS: f64 = 200.0;

    /// Leveling curve
    pub const EXP_TO_FIRST_LEVEL: f32 = 100.0;
    pub const EXP_CURVE_FACTOR: f32 = 1.5;
    /// Exp awarded per point of enemy score value
    pub const EXP_PER_SCORE: f32 = 0.4;

    /// Enemy lifecycle
    pub const SPAWN_IN_DURATION_MS: f64 = 500.0;
    /// How long a dead enemy stays in the collection for death rendering
    pub const DEATH_GRACE_MS: f64 = 1000.0;

    /// Coins
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_VALUE: u64 = 10;
    pub const COIN_DROP_CHANCE: f64 = 0.5;
    pub const COIN_EXP: f32 = 30.0;

    /// Stage timing
    pub const STAGE_TIME_SECS: u32 = 60;
    pub const STAGE_CLEAR_DELAY_MS: f64 = 5000.0;

    /// Spawners
    pub const SPAWNER_SIZE: f32 = 40.0;
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 1000.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 200.0;
    pub const BASE_MAX_ALIVE: usize = 5;
    pub const MAX_MAX_ALIVE: usize = 8;
    /// Per-spawner stagger applied to spawn timers and activation
    pub const SPAWNER_STAGGER_MS: f64 = 500.0;
    /// Delay before spawners wake after setup/restart/stage advance
    pub const SPAWNER_WAKE_DELAY_MS: f64 = 2000.0;
    /// How often a spawner re-counts its live offspring
    pub const CENSUS_INTERVAL_MS: f64 = 500.0;
    /// Spawner anchor offset from viewport center, as a fraction of each axis
    pub const SPAWNER_ANCHOR_FRACTION: f32 = 0.35;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Minimal absolute difference between two angles, wrap-aware.
///
/// Always in [0, π].
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    use std::f32::consts::TAU;
    let diff = (a - b).rem_euclid(TAU);
    diff.min(TAU - diff)
}
