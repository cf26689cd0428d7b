/// BeatEngine v1: Derived-Field Computer
///
/// Recomputes every field that is a function of other fields. Runs after
/// every dispatch; idempotent.

use crate::domain::{GameState, Hand};

pub const LOADING_TEXT_DOWNLOADING: &str = "Downloading song...";
pub const LOADING_TEXT_PROCESSING: &str = "Processing song...";

pub fn compute_state(state: &mut GameState) {
    state.is_playing = !state.menu_active
        && !state.is_paused
        && !state.is_victory
        && !state.is_game_over
        && !state.challenge.is_loading
        && !state.is_song_loading;

    let any_menu_open =
        state.menu_active || state.is_paused || state.is_victory || state.is_game_over;
    state.left_raycaster_active =
        any_menu_open && state.active_hand == Hand::Left && state.in_vr;
    state.right_raycaster_active =
        any_menu_open && state.active_hand == Hand::Right && state.in_vr;

    // Loading but no longer fetching means the song is decoding.
    state.loading_text = match (state.is_song_loading, state.is_song_fetching) {
        (true, true) => LOADING_TEXT_DOWNLOADING.to_string(),
        (true, false) => LOADING_TEXT_PROCESSING.to_string(),
        (false, _) => String::new(),
    };

    state.multiplier_text = format!("{}x", state.score.multiplier);
}
