//! Enemy entities: typed stats, spawn-in lifecycle, movement patterns
//!
//! The five kinds differ only in data; behavior dispatches over a closed
//! pattern enum once per tick.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use super::state::Rect;
use crate::consts::*;

/// Enemy variant. Stats are a pure function of the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
    Hunter,
    Random,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Hunter,
        EnemyKind::Random,
    ];

    /// Pixels per nominal 60 Hz tick
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Normal => 3.0,
            EnemyKind::Fast => 5.0,
            EnemyKind::Tank => 1.5,
            EnemyKind::Hunter => 2.5,
            EnemyKind::Random => 3.0,
        }
    }

    /// Pattern excursion limit from the spawn anchor
    pub fn move_range(&self) -> f32 {
        match self {
            EnemyKind::Normal => 200.0,
            EnemyKind::Fast => 150.0,
            EnemyKind::Tank => 100.0,
            EnemyKind::Hunter => 300.0,
            EnemyKind::Random => 200.0,
        }
    }

    pub fn score_value(&self) -> u64 {
        match self {
            EnemyKind::Normal => 50,
            EnemyKind::Fast => 80,
            EnemyKind::Tank => 150,
            EnemyKind::Hunter => 120,
            EnemyKind::Random => 100,
        }
    }

    /// Bounding box side length (tanks are bigger)
    pub fn size(&self) -> f32 {
        match self {
            EnemyKind::Tank => 40.0,
            _ => 30.0,
        }
    }
}

/// Per-kind movement algorithm with its mutable per-instance state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovePattern {
    /// Orbit around the spawn anchor; position is a pure function of the clock
    Circle,
    /// Angle accumulator sweep, mirrored at the range limit
    Zigzag { angle: f32 },
    /// Straight toward the player's center
    Chase,
    /// Fixed direction re-rolled every second, reflected at viewport edges
    Random { dir: Vec2, reroll_in: f32 },
    /// Linear back-and-forth around the spawn anchor
    Horizontal { direction: f32 },
}

impl MovePattern {
    fn for_kind(kind: EnemyKind, rng: &mut Pcg32) -> Self {
        match kind {
            EnemyKind::Normal => MovePattern::Circle,
            EnemyKind::Fast => MovePattern::Zigzag { angle: 0.0 },
            EnemyKind::Tank => MovePattern::Horizontal { direction: 1.0 },
            EnemyKind::Hunter => MovePattern::Chase,
            EnemyKind::Random => MovePattern::Random {
                dir: random_direction(rng),
                reroll_in: 1.0,
            },
        }
    }
}

fn random_direction(rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random::<f32>() * 2.0 - 1.0,
        rng.random::<f32>() * 2.0 - 1.0,
    )
}

/// A spawned enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub kind: EnemyKind,
    pub alive: bool,
    /// Spawn anchor the patterns orbit/oscillate around
    pub start: Vec2,
    pub spawning: bool,
    pub spawn_started_ms: f64,
    /// Lineage back-reference to the spawner that created this enemy
    pub spawner_id: u32,
    /// Set on death; the enemy stays around for a short grace window
    pub death_ms: Option<f64>,
    pub pattern: MovePattern,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, kind: EnemyKind, now_ms: f64, rng: &mut Pcg32) -> Self {
        let size = kind.size();
        Self {
            id,
            rect: Rect::new(pos.x, pos.y, size, size),
            kind,
            alive: true,
            start: pos,
            spawning: true,
            spawn_started_ms: now_ms,
            spawner_id: 0,
            death_ms: None,
            pattern: MovePattern::for_kind(kind, rng),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Spawn-in animation progress in [0, 1]
    pub fn spawn_progress(&self, now_ms: f64) -> f32 {
        (((now_ms - self.spawn_started_ms) / SPAWN_IN_DURATION_MS).clamp(0.0, 1.0)) as f32
    }

    pub fn kill(&mut self, now_ms: f64) {
        self.alive = false;
        self.death_ms = Some(now_ms);
    }

    /// Dead and past the death-animation grace window
    pub fn should_prune(&self, now_ms: f64) -> bool {
        if self.alive {
            return false;
        }
        match self.death_ms {
            Some(died) => now_ms - died >= DEATH_GRACE_MS,
            None => true,
        }
    }

    /// Advance one tick of movement. Position is frozen during spawn-in,
    /// and dead enemies do not move.
    pub fn update(
        &mut self,
        player_center: Vec2,
        bounds: Vec2,
        now_ms: f64,
        dt: f32,
        rng: &mut Pcg32,
    ) {
        if !self.alive {
            return;
        }

        if self.spawning {
            if self.spawn_progress(now_ms) >= 1.0 {
                self.spawning = false;
            }
            return;
        }

        let speed = self.kind.speed();
        let range = self.kind.move_range();
        let scale = dt * 60.0;

        let mut pattern = self.pattern;
        match &mut pattern {
            MovePattern::Circle => {
                let phase = ((now_ms / 1000.0) % TAU as f64) as f32;
                self.rect.x = self.start.x + phase.cos() * range / 2.0;
                self.rect.y = self.start.y + phase.sin() * range / 2.0;
            }

            MovePattern::Zigzag { angle } => {
                *angle += 0.1 * scale;
                self.rect.x += speed * angle.cos() * scale;
                self.rect.y += speed * 0.5 * (2.0 * *angle).sin() * scale;
                if (self.rect.x - self.start.x).abs() > range {
                    // Direction reversal, not a teleport: re-anchor and mirror
                    self.start.x = self.rect.x;
                    *angle = PI - *angle;
                }
            }

            MovePattern::Chase => {
                let delta = player_center - self.center();
                let distance = delta.length();
                if distance > 0.0 {
                    let step = delta / distance * speed * scale;
                    self.rect.x += step.x;
                    self.rect.y += step.y;
                }
            }

            MovePattern::Random { dir, reroll_in } => {
                *reroll_in -= dt;
                if *reroll_in <= 0.0 {
                    *dir = random_direction(rng);
                    *reroll_in = 1.0;
                }
                self.rect.x += dir.x * speed * scale;
                self.rect.y += dir.y * speed * scale;
                if self.rect.x < 0.0 || self.rect.x > bounds.x - self.rect.width {
                    dir.x = -dir.x;
                }
                if self.rect.y < 0.0 || self.rect.y > bounds.y - self.rect.height {
                    dir.y = -dir.y;
                }
            }

            MovePattern::Horizontal { direction } => {
                self.rect.x += speed * *direction * scale;
                if (self.rect.x - self.start.x).abs() > range {
                    *direction = -*direction;
                }
            }
        }
        self.pattern = pattern;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;
    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn spawned(kind: EnemyKind, pos: Vec2, rng: &mut Pcg32) -> Enemy {
        let mut enemy = Enemy::new(1, pos, kind, 0.0, rng);
        enemy.spawning = false;
        enemy
    }

    #[test]
    fn test_stats_are_fixed_per_kind() {
        for kind in EnemyKind::ALL {
            let (sv, sp, mr) = (kind.score_value(), kind.speed(), kind.move_range());
            // Construction never changes the table
            assert_eq!(kind.score_value(), sv);
            assert_eq!(kind.speed(), sp);
            assert_eq!(kind.move_range(), mr);
        }
        assert_eq!(EnemyKind::Tank.size(), 40.0);
        assert_eq!(EnemyKind::Hunter.size(), 30.0);
        assert_eq!(EnemyKind::Normal.score_value(), 50);
        assert_eq!(EnemyKind::Fast.speed(), 5.0);
    }

    #[test]
    fn test_spawn_in_freezes_position_then_activates() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 100.0), EnemyKind::Hunter, 0.0, &mut rng);
        assert!(enemy.spawning);

        enemy.update(Vec2::new(400.0, 400.0), BOUNDS, 250.0, DT, &mut rng);
        assert!(enemy.spawning);
        assert_eq!(enemy.rect.pos(), Vec2::new(100.0, 100.0));
        assert!((enemy.spawn_progress(250.0) - 0.5).abs() < 1e-6);

        enemy.update(Vec2::new(400.0, 400.0), BOUNDS, 500.0, DT, &mut rng);
        assert!(!enemy.spawning);
    }

    #[test]
    fn test_chase_moves_toward_player() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = spawned(EnemyKind::Hunter, Vec2::new(100.0, 100.0), &mut rng);
        let player = Vec2::new(400.0, 100.0 + enemy.rect.height / 2.0);

        let before = (player - enemy.center()).length();
        enemy.update(player, BOUNDS, 1000.0, DT, &mut rng);
        let after = (player - enemy.center()).length();
        assert!((before - after - EnemyKind::Hunter.speed()).abs() < 1e-3);
    }

    #[test]
    fn test_chase_zero_distance_is_noop() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = spawned(EnemyKind::Hunter, Vec2::new(100.0, 100.0), &mut rng);
        let pos = enemy.rect.pos();
        enemy.update(enemy.center(), BOUNDS, 1000.0, DT, &mut rng);
        assert_eq!(enemy.rect.pos(), pos);
        assert!(enemy.rect.x.is_finite() && enemy.rect.y.is_finite());
    }

    #[test]
    fn test_horizontal_reverses_at_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = spawned(EnemyKind::Tank, Vec2::new(300.0, 300.0), &mut rng);
        let range = EnemyKind::Tank.move_range();

        // Walk right until the bound flips the direction
        for _ in 0..200 {
            enemy.update(Vec2::ZERO, BOUNDS, 1000.0, DT, &mut rng);
        }
        // Never strays much past start ± range
        assert!((enemy.rect.x - enemy.start.x).abs() <= range + EnemyKind::Tank.speed() + 1e-3);
        match enemy.pattern {
            MovePattern::Horizontal { direction } => assert_eq!(direction.abs(), 1.0),
            other => panic!("pattern changed: {other:?}"),
        }
    }

    #[test]
    fn test_circle_orbits_spawn_anchor() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = spawned(EnemyKind::Normal, Vec2::new(400.0, 300.0), &mut rng);
        let radius = EnemyKind::Normal.move_range() / 2.0;

        for step in 1..8 {
            let now = step as f64 * 333.0;
            enemy.update(Vec2::ZERO, BOUNDS, now, DT, &mut rng);
            let offset = enemy.rect.pos() - enemy.start;
            assert!((offset.length() - radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_random_reflects_at_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = spawned(EnemyKind::Random, Vec2::new(1.0, 300.0), &mut rng);
        enemy.pattern = MovePattern::Random {
            dir: Vec2::new(-1.0, 0.0),
            reroll_in: 100.0, // no reroll during the test
        };

        enemy.update(Vec2::ZERO, BOUNDS, 1000.0, DT, &mut rng);
        match enemy.pattern {
            MovePattern::Random { dir, .. } => assert!(dir.x > 0.0),
            other => panic!("pattern changed: {other:?}"),
        }
    }

    #[test]
    fn test_death_grace_window() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = spawned(EnemyKind::Normal, Vec2::new(100.0, 100.0), &mut rng);
        enemy.kill(1000.0);
        assert!(!enemy.alive);
        assert!(!enemy.should_prune(1500.0));
        assert!(enemy.should_prune(2000.0));

        // Dead enemies do not move
        let pos = enemy.rect.pos();
        enemy.update(Vec2::new(500.0, 500.0), BOUNDS, 1500.0, DT, &mut rng);
        assert_eq!(enemy.rect.pos(), pos);
    }
}
