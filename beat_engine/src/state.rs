/// BeatEngine v1: Initial State Construction

use crate::config::LaunchConfig;
use crate::derive::compute_state;
use crate::domain::{GameState, Hand};

/// Fresh state tree from the persisted hand preference and launch config.
/// Derived fields are already computed.
pub fn create_initial_state(active_hand: Hand, config: &LaunchConfig) -> GameState {
    let mut state = GameState {
        active_hand,
        ..GameState::default()
    };
    if let Some(id) = &config.challenge_id {
        state.challenge.id = id.clone();
    }
    compute_state(&mut state);
    state
}
