//! Blade Arena entry point
//!
//! Headless demo driver: runs a scripted session at the fixed timestep,
//! logs the cues the simulation emits, and prints a final snapshot as
//! JSON. Real frontends drive `sim::tick` the same way from their own
//! frame loop.

use blade_arena::consts::{MAX_SUBSTEPS, SIM_DT};
use blade_arena::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB1ADE);
    let seconds: f64 = std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(30.0);

    log::info!("Blade Arena (headless) starting, seed {seed}");
    let mut state = GameState::new(1280.0, 720.0, seed);

    // Emulate a 30 Hz frontend frame loop over the 60 Hz simulation,
    // the same accumulator/substep pattern a renderer would use.
    let frame_dt = SIM_DT * 2.0;
    let frames = (seconds / frame_dt as f64) as u64;
    let mut accumulator = 0.0f32;

    for frame in 0..frames {
        let input = scripted_input(frame);

        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in state.take_events() {
            match event {
                GameEvent::LevelUp { level } => log::info!("level up -> {level}"),
                GameEvent::EnemyDeath { kind } => log::debug!("killed {kind:?}"),
                GameEvent::Coin => log::debug!("coin collected"),
                other => log::info!("cue: {other:?}"),
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "session over: stage {}, score {}, level {}",
        state.stage,
        state.score,
        state.player.level
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}

/// A simple wandering-swordsman script: sweep across the arena and swing
/// periodically.
fn scripted_input(frame: u64) -> TickInput {
    let phase = frame % 240;
    TickInput {
        right: phase < 80,
        down: (40..120).contains(&phase),
        left: (120..200).contains(&phase),
        up: phase >= 160,
        attack: frame % 15 == 0,
        ..Default::default()
    }
}
