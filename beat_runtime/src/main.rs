//! beat_replay: replay a recorded event script and report the outcome.
//!
//! Usage: beat_replay <script.json>
//!
//! The script is `{"launch": "?godmode=1", "hand": "left", "events": [...]}`
//! where each event is `{"name": ..., "payload": ...}`. Set `RUST_LOG=debug`
//! to trace every dispatch.

use std::fs;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use beat_runtime::replay::{rebuild_state, verify_determinism, ReplayScript};
use beat_runtime::RuntimeError;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: beat_replay <script.json>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[FAIL] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<(), RuntimeError> {
    let text = fs::read_to_string(path)
        .map_err(|e| RuntimeError::Script(format!("cannot read {}: {}", path, e)))?;
    let script = ReplayScript::from_json(&text)?;

    let hash = verify_determinism(&script)?;
    let (state, _) = rebuild_state(&script)?;
    let score = &state.score;

    println!("events:     {}", script.events.len());
    println!("challenge:  {:?}", state.challenge.id);
    println!(
        "score:      {} (hit {}, missed {}, max combo {})",
        score.score, score.beats_hit, score.beats_missed, score.max_combo
    );
    if state.is_victory {
        println!("accuracy:   {} rank {:?}", score.accuracy, score.rank);
    }
    if state.is_game_over {
        println!("result:     game over");
    }
    println!("hash:       {}", hash);
    Ok(())
}
