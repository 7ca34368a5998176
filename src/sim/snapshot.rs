//! Read-only, serializable view of the simulation for external renderers.
//!
//! A snapshot is a plain value: it carries resolved animation progress
//! (spawn-in, death fade, attack swing) so consumers never need the clock.

use serde::Serialize;

use super::state::{GamePhase, GameState, Rect};
use super::{EnemyKind, Facing};
use crate::consts::*;
use crate::presets::PlayerColors;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub facing: Facing,
    pub level: u32,
    pub exp: f32,
    pub exp_to_next_level: f32,
    pub attacking: bool,
    /// Swing progress in [0, 1]; 0 when idle
    pub attack_progress: f32,
    pub attack_range: f32,
    pub colors: PlayerColors,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub rect: Rect,
    pub kind: EnemyKind,
    pub alive: bool,
    /// Spawn-in progress in [0, 1]; 1 once fully materialized
    pub spawn_progress: f32,
    /// Death fade progress in [0, 1]; 0 while alive
    pub death_progress: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinView {
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpawnerView {
    pub rect: Rect,
    pub active: bool,
    /// Charge toward the next spawn, in [0, 1]
    pub progress: f32,
    /// Pulse intensity from the last spawn, in [0, 1]
    pub spawn_effect: f32,
}

/// One frame's complete render/HUD state
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub stage: u32,
    pub remaining_secs: u32,
    /// Seconds until the next stage begins; only meaningful in StageClear
    pub next_stage_in_secs: u32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub coins: Vec<CoinView>,
    pub spawners: Vec<SpawnerView>,
}

impl GameState {
    /// Capture the current frame for rendering. Entity order is stable
    /// (insertion order), so consumers can diff successive snapshots.
    pub fn snapshot(&self) -> Snapshot {
        let now = self.clock_ms;

        let attack_progress = if self.player.attacking {
            (1.0 - self.player.attack_timer_ms / ATTACK_DURATION_MS).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let next_stage_in_secs = if self.phase == GamePhase::StageClear {
            ((self.next_stage_start_ms - now).max(0.0) / 1000.0).ceil() as u32
        } else {
            0
        };

        Snapshot {
            phase: self.phase,
            score: self.score,
            stage: self.stage,
            remaining_secs: self.remaining_secs,
            next_stage_in_secs,
            player: PlayerView {
                rect: self.player.rect,
                facing: self.player.facing,
                level: self.player.level,
                exp: self.player.exp,
                exp_to_next_level: self.player.exp_to_next_level,
                attacking: self.player.attacking,
                attack_progress,
                attack_range: self.player.attack_range,
                colors: self.player.colors.clone(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    rect: e.rect,
                    kind: e.kind,
                    alive: e.alive,
                    spawn_progress: e.spawn_progress(now),
                    death_progress: match e.death_ms {
                        Some(died) => {
                            (((now - died) / DEATH_GRACE_MS).clamp(0.0, 1.0)) as f32
                        }
                        None => 0.0,
                    },
                })
                .collect(),
            coins: self
                .coins
                .iter()
                .filter(|c| !c.collected)
                .map(|c| CoinView { rect: c.rect })
                .collect(),
            spawners: self
                .spawners
                .iter()
                .map(|s| SpawnerView {
                    rect: s.rect,
                    active: s.active,
                    progress: s.progress,
                    spawn_effect: s.spawn_effect,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_snapshot_reflects_new_session() {
        let state = GameState::new(800.0, 600.0, 11);
        let snap = state.snapshot();

        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.stage, 1);
        assert_eq!(snap.remaining_secs, STAGE_TIME_SECS);
        assert_eq!(snap.next_stage_in_secs, 0);
        assert_eq!(snap.spawners.len(), 4);
        assert!(snap.enemies.is_empty());
        assert_eq!(snap.player.level, 1);
        assert!(!snap.player.attacking);
        assert_eq!(snap.player.attack_progress, 0.0);
    }

    #[test]
    fn test_attack_progress_advances_during_swing() {
        let mut state = GameState::new(800.0, 600.0, 11);
        let input = TickInput {
            attack: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        let early = state.snapshot().player.attack_progress;
        assert!(early > 0.0 && early < 0.5);

        tick(&mut state, &TickInput::default(), SIM_DT);
        let later = state.snapshot().player.attack_progress;
        assert!(later > early);
    }

    #[test]
    fn test_snapshot_counts_down_to_next_stage() {
        let mut state = GameState::new(800.0, 600.0, 11);
        state.stage_start_ms = state.clock_ms - STAGE_TIME_SECS as f64 * 1000.0;
        tick(&mut state, &TickInput::default(), SIM_DT);

        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::StageClear);
        assert!(snap.next_stage_in_secs > 0);
        assert!(snap.next_stage_in_secs <= (STAGE_CLEAR_DELAY_MS / 1000.0) as u32);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let state = GameState::new(800.0, 600.0, 11);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\""));
        assert!(json.contains("\"spawners\""));
    }
}
