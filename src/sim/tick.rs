//! Fixed timestep simulation tick
//!
//! The per-frame update contract, in strict order: phase gates, stage
//! timer, player, spawners, enemies (combat), coins, pruning.

use glam::Vec2;

use super::spawner::Spawner;
use super::state::{Coin, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Manual sword swing
    pub attack: bool,
    /// Restart from the game-over screen
    pub restart: bool,
    /// Toggle the external customize overlay (suspends simulation)
    pub customize: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Customize overlay: an external-UI state that merely suspends the sim
    if input.customize {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Customizing;
                return;
            }
            GamePhase::Customizing => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Customizing => return,
        GamePhase::GameOver => {
            // Terminal until an explicit restart; the clock stays frozen
            if input.restart {
                restart(state);
            }
            return;
        }
        _ => {}
    }

    state.clock_ms += dt as f64 * 1000.0;
    let now = state.clock_ms;

    if state.phase == GamePhase::StageClear {
        // Simulation frozen during the clear screen
        if now >= state.next_stage_start_ms {
            advance_stage(state);
        }
        return;
    }

    // Stage timer
    let elapsed_secs = ((now - state.stage_start_ms).max(0.0) / 1000.0) as u32;
    state.remaining_secs = state.stage_time_secs.saturating_sub(elapsed_secs);
    if state.remaining_secs == 0 {
        log::info!("stage {} timer expired, clearing field", state.stage);
        state.phase = GamePhase::StageClear;
        state.next_stage_start_ms = now + STAGE_CLEAR_DELAY_MS;
        state.enemies.clear();
        state.coins.clear();
        for spawner in &mut state.spawners {
            spawner.deactivate_and_clear();
        }
        state.events.push(GameEvent::StageClear);
        return;
    }

    let bounds = state.bounds;

    // Player: movement, targeting, swing bookkeeping
    {
        let GameState {
            player, enemies, ..
        } = state;
        player.update(input, bounds, enemies, now, dt);
    }

    // Spawners feed the shared enemy collection
    {
        let GameState {
            spawners,
            enemies,
            rng,
            next_id,
            ..
        } = state;
        for spawner in spawners.iter_mut() {
            spawner.update(now, dt, enemies, rng, next_id);
        }
    }

    // Enemies: pattern updates and combat resolution
    let player_center = state.player.center();
    let mut lethal_contact = false;
    {
        let GameState {
            player,
            enemies,
            coins,
            rng,
            score,
            events,
            ..
        } = state;

        for enemy in enemies.iter_mut() {
            if !enemy.alive {
                continue;
            }
            enemy.update(player_center, bounds, now, dt, rng);

            if player.check_attack_collision(enemy) {
                enemy.kill(now);
                *score += enemy.kind.score_value();
                let levels = player.gain_exp(enemy.kind.score_value() as f32 * EXP_PER_SCORE);
                if levels > 0 {
                    events.push(GameEvent::LevelUp {
                        level: player.level,
                    });
                }
                events.push(GameEvent::EnemyDeath { kind: enemy.kind });

                if roll_coin_drop(rng) {
                    coins.push(Coin::new(enemy.rect.pos(), rng));
                }
            }

            // An enemy that survived the swing and touches the player ends
            // the run
            if enemy.alive && player.rect.collides_with(&enemy.rect) {
                lethal_contact = true;
            }
        }
    }

    // Coins: float animation and collection
    {
        let GameState {
            player,
            coins,
            score,
            events,
            ..
        } = state;

        for coin in coins.iter_mut() {
            if coin.collected {
                continue;
            }
            coin.update(now);
            if player.rect.collides_with(&coin.rect) {
                coin.collected = true;
                *score += coin.value;
                let levels = player.gain_exp(COIN_EXP);
                if levels > 0 {
                    events.push(GameEvent::LevelUp {
                        level: player.level,
                    });
                }
                events.push(GameEvent::Coin);
            }
        }
    }

    // Prune: dead-and-past-grace enemies, collected coins
    state.enemies.retain(|e| !e.should_prune(now));
    state.coins.retain(|c| !c.collected);

    if lethal_contact {
        log::info!(
            "player down on stage {} with score {}",
            state.stage,
            state.score
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::BgmStop);
        state.events.push(GameEvent::GameOver);
    }
}

fn roll_coin_drop(rng: &mut rand_pcg::Pcg32) -> bool {
    use rand::Rng;
    rng.random_bool(COIN_DROP_CHANCE)
}

/// The four corner anchor positions for the current viewport
pub fn spawner_anchors(bounds: Vec2) -> [Vec2; 4] {
    let center = bounds / 2.0;
    let offset = bounds * SPAWNER_ANCHOR_FRACTION;
    let half = SPAWNER_SIZE / 2.0;
    [
        Vec2::new(center.x - offset.x - half, center.y - offset.y - half),
        Vec2::new(center.x + offset.x - half, center.y - offset.y - half),
        Vec2::new(center.x - offset.x - half, center.y + offset.y - half),
        Vec2::new(center.x + offset.x - half, center.y + offset.y - half),
    ]
}

/// Create the corner spawners: staggered spawn timers, staggered wakes.
pub fn setup_spawners(state: &mut GameState) {
    let now = state.clock_ms;
    state.spawners = spawner_anchors(state.bounds)
        .into_iter()
        .enumerate()
        .map(|(i, anchor)| {
            let id = i as u32;
            let mut spawner = Spawner::new(id, anchor, BASE_SPAWN_INTERVAL_MS);
            spawner.last_spawn_ms = now + id as f64 * SPAWNER_STAGGER_MS;
            spawner.schedule_wake(now + SPAWNER_WAKE_DELAY_MS + id as f64 * SPAWNER_STAGGER_MS);
            spawner
        })
        .collect();
}

/// Begin the next stage: fresh field, tighter spawn parameters.
pub fn advance_stage(state: &mut GameState) {
    let now = state.clock_ms;

    state.enemies.clear();
    state.coins.clear();

    state.stage += 1;
    state.remaining_secs = state.stage_time_secs;
    state.phase = GamePhase::Playing;
    state.stage_start_ms = now;

    let stage = state.stage;
    for spawner in &mut state.spawners {
        spawner.deactivate_and_clear();
        spawner.spawn_interval_ms = (BASE_SPAWN_INTERVAL_MS
            - (stage - 1) as f64 * SPAWN_INTERVAL_STEP_MS)
            .max(MIN_SPAWN_INTERVAL_MS);
        spawner.max_alive = (BASE_MAX_ALIVE + (stage as usize - 1) / 2).min(MAX_MAX_ALIVE);
        spawner.last_spawn_ms = now + spawner.id as f64 * SPAWNER_STAGGER_MS;
        spawner.schedule_wake(now + SPAWNER_WAKE_DELAY_MS);
    }

    log::info!("stage {stage} begins");
    state.events.push(GameEvent::StageClear);
}

/// Full reset from the game-over screen. The player is replaced wholesale.
pub fn restart(state: &mut GameState) {
    let now = state.clock_ms;

    state.phase = GamePhase::Playing;
    state.score = 0;
    state.stage = 1;
    state.remaining_secs = state.stage_time_secs;
    state.stage_start_ms = now;
    state.player = super::player::Player::new(Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
    state.enemies.clear();
    state.coins.clear();

    for spawner in &mut state.spawners {
        spawner.deactivate_and_clear();
        spawner.spawn_interval_ms = BASE_SPAWN_INTERVAL_MS;
        spawner.max_alive = BASE_MAX_ALIVE;
        spawner.last_spawn_ms = now + spawner.id as f64 * SPAWNER_STAGGER_MS;
        spawner.schedule_wake(
            now + SPAWNER_WAKE_DELAY_MS + spawner.id as f64 * SPAWNER_STAGGER_MS,
        );
    }

    log::info!("session restarted");
    state.events.push(GameEvent::BgmStart);
}
