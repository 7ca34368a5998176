//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable entity ordering (insertion order, ids monotonic)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod player;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{in_attack_cone, rects_overlap};
pub use enemy::{Enemy, EnemyKind, MovePattern};
pub use player::{Facing, Player};
pub use snapshot::Snapshot;
pub use spawner::Spawner;
pub use state::{Coin, GameEvent, GamePhase, GameState, Rect};
pub use tick::{TickInput, tick};
