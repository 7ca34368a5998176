//! Rate-limited, capacity-bounded enemy factories anchored at the map corners
//!
//! A spawner tracks lineage through enemy ids only; the enemies themselves
//! live in the game's shared collection.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::enemy::{Enemy, EnemyKind};
use super::state::Rect;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Spawner {
    pub id: u32,
    pub rect: Rect,
    pub spawn_interval_ms: f64,
    pub last_spawn_ms: f64,
    pub active: bool,
    /// Pending delayed activation; checked during the tick, cleared on
    /// deactivation so a stale schedule can never fire
    pub wake_at_ms: Option<f64>,
    pub max_alive: usize,
    /// Non-owning ids of enemies this spawner created
    pub lineage: Vec<u32>,
    /// Live offspring count, refreshed by the periodic census
    pub alive_count: usize,
    /// Charge toward the next spawn, in [0, 1]; pins to 0 while full
    pub progress: f32,
    /// Visual pulse emitted on spawn, decays over ~1/3 s
    pub spawn_effect: f32,
    last_census_ms: f64,
}

impl Spawner {
    pub fn new(id: u32, pos: Vec2, spawn_interval_ms: f64) -> Self {
        Self {
            id,
            rect: Rect::new(pos.x, pos.y, SPAWNER_SIZE, SPAWNER_SIZE),
            spawn_interval_ms,
            last_spawn_ms: 0.0,
            active: false,
            wake_at_ms: None,
            max_alive: BASE_MAX_ALIVE,
            lineage: Vec::new(),
            alive_count: 0,
            progress: 0.0,
            spawn_effect: 0.0,
            last_census_ms: 0.0,
        }
    }

    /// Stop spawning and forget lineage. Also cancels any pending wake;
    /// stage transitions rely on this to suppress stale activations.
    pub fn deactivate_and_clear(&mut self) {
        self.active = false;
        self.wake_at_ms = None;
        self.lineage.clear();
        self.alive_count = 0;
        self.progress = 0.0;
    }

    pub fn schedule_wake(&mut self, at_ms: f64) {
        self.wake_at_ms = Some(at_ms);
    }

    /// One tick: wake check, effect decay, census, throttled spawning.
    pub fn update(
        &mut self,
        now_ms: f64,
        dt: f32,
        enemies: &mut Vec<Enemy>,
        rng: &mut Pcg32,
        next_id: &mut u32,
    ) {
        if let Some(wake) = self.wake_at_ms {
            if now_ms >= wake {
                self.active = true;
                self.wake_at_ms = None;
            }
        }
        if !self.active {
            return;
        }

        if self.spawn_effect > 0.0 {
            self.spawn_effect = (self.spawn_effect - 3.0 * dt).max(0.0);
        }

        // Periodic lineage census; staleness up to the interval is fine
        // because spawn() keeps the count current on the way up.
        if now_ms - self.last_census_ms >= CENSUS_INTERVAL_MS {
            self.lineage
                .retain(|id| enemies.iter().any(|e| e.id == *id && e.alive));
            self.alive_count = self.lineage.len();
            self.last_census_ms = now_ms;
        }

        if self.alive_count < self.max_alive {
            self.progress =
                (((now_ms - self.last_spawn_ms) / self.spawn_interval_ms).clamp(0.0, 1.0)) as f32;
            if self.progress >= 1.0 {
                self.spawn(now_ms, enemies, rng, next_id);
            }
        } else {
            self.progress = 0.0;
        }
    }

    fn spawn(&mut self, now_ms: f64, enemies: &mut Vec<Enemy>, rng: &mut Pcg32, next_id: &mut u32) {
        let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];
        let pos = self.rect.center() - Vec2::splat(kind.size() / 2.0);

        let id = *next_id;
        *next_id += 1;
        let mut enemy = Enemy::new(id, pos, kind, now_ms, rng);
        enemy.spawner_id = self.id;

        self.lineage.push(id);
        self.alive_count += 1;
        enemies.push(enemy);

        self.last_spawn_ms = now_ms;
        self.progress = 0.0;
        self.spawn_effect = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn active_spawner(interval_ms: f64) -> Spawner {
        let mut spawner = Spawner::new(0, Vec2::new(100.0, 100.0), interval_ms);
        spawner.active = true;
        spawner
    }

    fn run(spawner: &mut Spawner, enemies: &mut Vec<Enemy>, ticks: u32, start_ms: f64) -> f64 {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut next_id = 1;
        let mut now = start_ms;
        for _ in 0..ticks {
            now += 1000.0 * DT as f64;
            spawner.update(now, DT, enemies, &mut rng, &mut next_id);
        }
        now
    }

    #[test]
    fn test_spawns_one_enemy_per_interval() {
        let mut spawner = active_spawner(1000.0);
        let mut enemies = Vec::new();
        // A hair over one interval
        run(&mut spawner, &mut enemies, 61, 0.0);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].spawner_id, 0);
        assert!(enemies[0].spawning);
        assert!(spawner.spawn_effect > 0.9);
    }

    #[test]
    fn test_population_cap_is_never_exceeded() {
        let mut spawner = active_spawner(100.0);
        let mut enemies = Vec::new();
        // Many intervals worth of time; nothing dies, so the cap binds
        run(&mut spawner, &mut enemies, 1200, 0.0);

        assert_eq!(enemies.len(), BASE_MAX_ALIVE);
        let live_lineage = spawner
            .lineage
            .iter()
            .filter(|id| enemies.iter().any(|e| e.id == **id && e.alive))
            .count();
        assert!(live_lineage <= spawner.max_alive);
    }

    #[test]
    fn test_progress_pins_to_zero_while_full() {
        let mut spawner = active_spawner(100.0);
        let mut enemies = Vec::new();
        run(&mut spawner, &mut enemies, 1200, 0.0);
        assert_eq!(spawner.progress, 0.0);
    }

    #[test]
    fn test_census_frees_capacity_after_deaths() {
        let mut spawner = active_spawner(100.0);
        let mut enemies = Vec::new();
        let now = run(&mut spawner, &mut enemies, 1200, 0.0);
        assert_eq!(enemies.len(), BASE_MAX_ALIVE);

        for enemy in enemies.iter_mut() {
            enemy.kill(now);
        }
        // After a census interval the spawner notices and resumes
        run(&mut spawner, &mut enemies, 120, now);
        assert!(enemies.iter().any(|e| e.alive));
    }

    #[test]
    fn test_inactive_spawner_does_nothing() {
        let mut spawner = Spawner::new(0, Vec2::new(100.0, 100.0), 100.0);
        let mut enemies = Vec::new();
        run(&mut spawner, &mut enemies, 600, 0.0);
        assert!(enemies.is_empty());
        assert_eq!(spawner.progress, 0.0);
    }

    #[test]
    fn test_wake_at_activates_and_deactivate_cancels() {
        let mut spawner = Spawner::new(0, Vec2::new(100.0, 100.0), 1000.0);
        let mut enemies = Vec::new();
        spawner.schedule_wake(500.0);

        run(&mut spawner, &mut enemies, 10, 0.0); // ~167ms
        assert!(!spawner.active);

        // Deactivation cancels the pending wake entirely
        spawner.deactivate_and_clear();
        run(&mut spawner, &mut enemies, 60, 167.0); // past 500ms
        assert!(!spawner.active);

        spawner.schedule_wake(1200.0);
        run(&mut spawner, &mut enemies, 60, 1167.0);
        assert!(spawner.active);
    }
}
