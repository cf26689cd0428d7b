/// BeatEngine v1: Centralized Transition Logic
///
/// ALL state-mutation logic lives here. Handlers mutate a working copy of
/// the tree; the store commits it only after derivation and validation.
/// Handlers never write derived fields and never dispatch.

use tracing::info;

use crate::cache::ChallengeCache;
use crate::config::LaunchConfig;
use crate::domain::{
    ChallengeRecord, Difficulty, GameState, SearchResult, TransitionResult, PAGE_SIZE,
};
use crate::error::EngineError;
use crate::events::GameEvent;
use crate::format::{
    asset_url, downloads_text, short_song_name, short_song_sub_name, song_info_text,
    sort_difficulties, UNKNOWN_ARTIST,
};
use crate::pagination::{compute_search_pagination, compute_selected_index};
use crate::scoring::{
    accuracy_percent, rank_for, register_hit, reset_score, take_damage, DamageOutcome,
};

/// Cover image file name within the asset bucket.
const COVER_IMAGE: &str = "image.jpg";

/// A transition that has been computed but not yet committed.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    /// Records to insert into the challenge cache on commit.
    pub cache_writes: Vec<ChallengeRecord>,
    pub result: TransitionResult,
}

// ---------------------------------------------------------------------------
// Public dispatcher
// ---------------------------------------------------------------------------

/// Apply *event* to *state* and return the uncommitted transition.
/// The original state is never mutated; a clone is made first.
pub fn apply_event(
    state: &GameState,
    cache: &ChallengeCache,
    config: &LaunchConfig,
    event: GameEvent,
) -> Result<Transition, EngineError> {
    let mut s = state.clone();
    let mut result = TransitionResult {
        event_type: event.name().to_string(),
        ..Default::default()
    };
    let mut cache_writes = Vec::new();

    match event {
        GameEvent::ActiveHandSwap => {
            s.active_hand = s.active_hand.swapped();
            result.persist_hand = Some(s.active_hand);
        }
        GameEvent::BeatHit => register_hit(&mut s),
        GameEvent::BeatMiss | GameEvent::BeatWrong => {
            s.score.beats_missed += 1;
            record_damage(&mut result, take_damage(&mut s, config.god_mode));
        }
        GameEvent::MineHit | GameEvent::WallHitStart => {
            record_damage(&mut result, take_damage(&mut s, config.god_mode));
        }
        GameEvent::BeatLoaderFinish { num_beats } => apply_beat_loader_finish(&mut s, num_beats),
        GameEvent::BeatLoaderPreloadFinish => s.challenge.is_beats_preloaded = true,
        GameEvent::BeatLoaderStart => apply_beat_loader_start(&mut s),
        GameEvent::GameMenuResume => s.is_paused = false,
        GameEvent::GameMenuRestart => apply_game_menu_restart(&mut s),
        GameEvent::GameMenuExit => apply_game_menu_exit(&mut s),
        GameEvent::KeyboardClose => s.is_searching = false,
        GameEvent::KeyboardOpen => {
            s.is_searching = true;
            unstage_challenge(&mut s);
        }
        GameEvent::MenuChallengeSelect { id } => {
            apply_menu_challenge_select(&mut s, cache, config, &id)?
        }
        GameEvent::MenuChallengeUnselect => unstage_challenge(&mut s),
        GameEvent::MenuDifficultySelect { difficulty } => {
            s.menu_selected_challenge.difficulty = Some(difficulty);
        }
        GameEvent::MenuSelectedChallengeSongLength { seconds } => {
            s.menu_selected_challenge.song_length = Some(seconds);
            compute_song_info_text(&mut s);
        }
        GameEvent::PauseGame => {
            if s.is_playing {
                s.is_paused = true;
            }
        }
        GameEvent::PlayButtonClick => apply_play_button_click(&mut s),
        GameEvent::SearchPrevPage => apply_search_prev_page(&mut s),
        GameEvent::SearchNextPage => apply_search_next_page(&mut s),
        GameEvent::SearchResults { results } => {
            cache_writes = apply_search_results(&mut s, results);
            result.cached_records = cache_writes.len();
        }
        GameEvent::SongFetchFinish => s.is_song_fetching = false,
        GameEvent::SongLoadFinish => {
            s.is_song_fetching = false;
            s.is_song_loading = false;
        }
        GameEvent::SongLoadStart => {
            s.is_song_fetching = true;
            s.is_song_loading = true;
        }
        GameEvent::EnterVr => s.in_vr = true,
        GameEvent::ExitVr => s.in_vr = false,
        GameEvent::Victory => apply_victory(&mut s),
    }

    Ok(Transition {
        state: s,
        cache_writes,
        result,
    })
}

// ---------------------------------------------------------------------------
// Individual transition handlers (private)
// ---------------------------------------------------------------------------

fn record_damage(result: &mut TransitionResult, outcome: DamageOutcome) {
    result.damage_taken = outcome.applied;
    result.game_over = outcome.game_over;
    if outcome.game_over {
        info!("damage limit reached, game over");
    }
}

fn apply_beat_loader_start(s: &mut GameState) {
    s.challenge.is_beats_preloaded = false;
    s.challenge.is_loading = true;
    let staged = &mut s.menu_selected_challenge;
    staged.song_info_text.clear();
    staged.num_beats = None;
    staged.song_length = None;
}

fn apply_beat_loader_finish(s: &mut GameState, num_beats: u32) {
    s.challenge.is_loading = false;
    s.menu_selected_challenge.num_beats = Some(num_beats);
    compute_song_info_text(s);
}

fn apply_game_menu_restart(s: &mut GameState) {
    reset_score(s);
    s.challenge.is_beats_preloaded = false;
    s.is_game_over = false;
    s.is_paused = false;
    s.is_victory = false;
    s.is_song_loading = true;
}

fn apply_game_menu_exit(s: &mut GameState) {
    reset_score(s);
    s.challenge.is_beats_preloaded = false;
    s.is_game_over = false;
    s.is_paused = false;
    s.is_victory = false;
    s.menu_active = true;
    s.challenge.id.clear();
}

/// Copy cached metadata onto the staged challenge.
fn apply_menu_challenge_select(
    s: &mut GameState,
    cache: &ChallengeCache,
    config: &LaunchConfig,
    id: &str,
) -> Result<(), EngineError> {
    let record = cache
        .get(id)
        .ok_or_else(|| EngineError::UnknownChallenge(id.to_string()))?;

    let mut difficulties: Vec<Difficulty> = record.difficulties.clone();
    sort_difficulties(&mut difficulties);

    let staged = &mut s.menu_selected_challenge;
    staged.id = record.id.clone();
    staged.author = record.author.clone();
    staged.song_name = record.song_name.clone();
    staged.song_sub_name = record.song_sub_name.clone();
    staged.downloads = record.downloads;
    staged.downloads_text = downloads_text(record.downloads);
    staged.difficulty = difficulties.first().copied();
    staged.image = asset_url(&config.asset_base_url, id, COVER_IMAGE);
    s.menu_difficulties = difficulties;

    compute_selected_index(s);
    s.is_searching = false;
    Ok(())
}

/// Commit the staged challenge for play.
fn apply_play_button_click(s: &mut GameState) {
    reset_score(s);

    let staged = &s.menu_selected_challenge;
    s.challenge.author = staged.author.clone();
    s.challenge.difficulty = staged.difficulty;
    s.challenge.id = staged.id.clone();
    s.challenge.image = staged.image.clone();
    s.challenge.song_name = staged.song_name.clone();
    s.challenge.song_sub_name = staged.song_sub_name.clone();
    s.challenge.song_length = staged.song_length.unwrap_or(0);
    info!(challenge = %s.challenge.id, difficulty = ?s.challenge.difficulty, "play started");

    s.menu_active = false;
    unstage_challenge(s);
    s.is_searching = false;
    s.is_song_loading = true;
}

fn apply_search_prev_page(s: &mut GameState) {
    if s.search.page == 0 {
        return;
    }
    s.search.page -= 1;
    compute_search_pagination(s);
}

fn apply_search_next_page(s: &mut GameState) {
    // One page more permissive than the page count: from the last page a
    // further step to an empty page is still allowed.
    if s.search.page > s.search.results.len() / PAGE_SIZE {
        return;
    }
    s.search.page += 1;
    compute_search_pagination(s);
}

/// Replace the result list and return the records to cache.
fn apply_search_results(s: &mut GameState, results: Vec<SearchResult>) -> Vec<ChallengeRecord> {
    let records: Vec<ChallengeRecord> = results.into_iter().map(ingest_search_result).collect();
    s.search.page = 0;
    s.search.results = records.clone();
    compute_search_pagination(s);
    records
}

fn ingest_search_result(result: SearchResult) -> ChallengeRecord {
    let song_sub_name = result
        .song_sub_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
    ChallengeRecord {
        short_song_name: short_song_name(&result.song_name),
        short_song_sub_name: short_song_sub_name(&song_sub_name),
        id: result.id,
        song_name: result.song_name,
        song_sub_name,
        author: result.author,
        downloads: result.downloads,
        difficulties: result.difficulties,
    }
}

fn apply_victory(s: &mut GameState) {
    s.is_victory = true;
    let hit = s.score.beats_hit;
    let missed = s.score.beats_missed;
    s.score.accuracy = format!("{}%", accuracy_percent(hit, missed));
    let rank = rank_for(hit, missed);
    s.score.rank = Some(rank);
    info!(beats_hit = hit, beats_missed = missed, ?rank, "victory");
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unstage_challenge(s: &mut GameState) {
    s.menu_selected_challenge.id.clear();
    compute_selected_index(s);
}

fn compute_song_info_text(s: &mut GameState) {
    let staged = &mut s.menu_selected_challenge;
    if let Some(text) = song_info_text(staged.num_beats, staged.song_length) {
        staged.song_info_text = text;
    }
}
