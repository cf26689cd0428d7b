//! End-to-end scenarios driven through `GameStore::dispatch`.

use serde_json::json;

use beat_engine::domain::{Difficulty, Hand, Rank, DAMAGE_SCALE};
use beat_engine::{EngineError, GameEvent, GameStore, LaunchConfig};

fn store() -> GameStore {
    GameStore::new(LaunchConfig::default(), Hand::Right)
}

fn dispatch(store: &mut GameStore, event: GameEvent) {
    store
        .dispatch(event)
        .unwrap_or_else(|e| panic!("dispatch failed: {}", e));
}

fn results_payload(n: usize) -> serde_json::Value {
    let results: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "id": format!("c{}", i),
                "songName": format!("Song number {}", i),
                "downloads": i * 10,
                "difficulties": ["Expert", "Normal"],
            })
        })
        .collect();
    json!({ "results": results })
}

/// Search, select, play, finish loading.
fn start_playing(store: &mut GameStore) {
    store
        .dispatch_named("searchresults", &results_payload(3))
        .unwrap();
    dispatch(store, GameEvent::MenuChallengeSelect { id: "c1".to_string() });
    dispatch(store, GameEvent::PlayButtonClick);
    dispatch(store, GameEvent::BeatLoaderStart);
    dispatch(store, GameEvent::SongLoadStart);
    dispatch(store, GameEvent::BeatLoaderFinish { num_beats: 100 });
    dispatch(store, GameEvent::SongLoadFinish);
    assert!(store.state().is_playing);
}

// ─────────────────────────────────────────────────────────────
// Scoring & damage
// ─────────────────────────────────────────────────────────────

#[test]
fn eight_hits_reach_max_multiplier() {
    let mut s = store();
    for _ in 0..8 {
        dispatch(&mut s, GameEvent::BeatHit);
    }
    let score = &s.state().score;
    assert_eq!(score.multiplier, 8);
    assert_eq!(score.max_combo, 8);
    assert_eq!(score.score, 8);
    assert_eq!(s.state().multiplier_text, "8x");
}

#[test]
fn miss_at_nine_damage_triggers_game_over() {
    let mut s = store();
    start_playing(&mut s);
    for _ in 0..9 {
        dispatch(&mut s, GameEvent::BeatMiss);
    }
    assert_eq!(s.state().damage, 9 * DAMAGE_SCALE);
    assert!(!s.state().is_game_over);

    let result = s.dispatch(GameEvent::BeatMiss).unwrap();
    assert!(result.game_over);
    assert_eq!(s.state().damage, 0);
    assert!(s.state().is_game_over);
    assert!(!s.state().is_playing);
    assert_eq!(s.state().score.beats_missed, 10);

    // Game over: further damage is ignored.
    let result = s.dispatch(GameEvent::WallHitStart).unwrap();
    assert!(!result.damage_taken);
    assert_eq!(s.state().damage, 0);
}

#[test]
fn god_mode_suppresses_damage() {
    let mut s = GameStore::new(LaunchConfig::from_query("godmode=1"), Hand::Right);
    start_playing(&mut s);
    dispatch(&mut s, GameEvent::BeatHit);
    dispatch(&mut s, GameEvent::BeatHit);
    for _ in 0..20 {
        dispatch(&mut s, GameEvent::MineHit);
    }
    assert_eq!(s.state().damage, 0);
    assert_eq!(s.state().score.combo, 2);
    assert!(!s.state().is_game_over);
}

#[test]
fn damage_breaks_combo_and_hits_decay_it() {
    let mut s = store();
    start_playing(&mut s);
    for _ in 0..5 {
        dispatch(&mut s, GameEvent::BeatHit);
    }
    dispatch(&mut s, GameEvent::BeatWrong);
    assert_eq!(s.state().score.beats_missed, 1);
    assert_eq!(s.state().score.combo, 0);
    assert_eq!(s.state().score.multiplier, 1);
    assert_eq!(s.state().score.max_combo, 5);
    assert_eq!(s.state().damage, DAMAGE_SCALE);

    dispatch(&mut s, GameEvent::BeatHit);
    assert_eq!(s.state().damage, 75);
    for _ in 0..10 {
        dispatch(&mut s, GameEvent::BeatHit);
    }
    assert_eq!(s.state().damage, 0);
}

#[test]
fn victory_ranks_ninety_percent_as_a() {
    let mut s = store();
    start_playing(&mut s);
    for _ in 0..18 {
        dispatch(&mut s, GameEvent::BeatHit);
    }
    for _ in 0..2 {
        dispatch(&mut s, GameEvent::BeatMiss);
    }
    dispatch(&mut s, GameEvent::Victory);
    let st = s.state();
    assert!(st.is_victory);
    assert_eq!(st.score.accuracy, "90%");
    assert_eq!(st.score.rank, Some(Rank::A));
    assert!(!st.is_playing);
}

#[test]
fn victory_without_attempts_is_zero_and_f() {
    let mut s = store();
    dispatch(&mut s, GameEvent::Victory);
    assert_eq!(s.state().score.accuracy, "0%");
    assert_eq!(s.state().score.rank, Some(Rank::F));
}

// ─────────────────────────────────────────────────────────────
// Search & selection
// ─────────────────────────────────────────────────────────────

#[test]
fn thirteen_results_paginate_into_three_pages() {
    let mut s = store();
    s.dispatch_named("searchresults", &results_payload(13)).unwrap();
    assert!(s.state().search.has_next);
    assert!(!s.state().search.has_prev);
    assert_eq!(s.state().search_results_page.len(), 6);

    dispatch(&mut s, GameEvent::SearchNextPage);
    dispatch(&mut s, GameEvent::SearchNextPage);
    let search = &s.state().search;
    assert_eq!(search.page, 2);
    assert!(!search.has_next);
    assert!(search.has_prev);
    assert_eq!(s.state().search_results_page.len(), 1);
    assert_eq!(s.state().search_results_page[0].record.id, "c12");
}

#[test]
fn next_page_guard_allows_one_empty_page() {
    let mut s = store();
    s.dispatch_named("searchresults", &results_payload(13)).unwrap();
    for _ in 0..3 {
        dispatch(&mut s, GameEvent::SearchNextPage);
    }
    assert_eq!(s.state().search.page, 3);
    assert!(s.state().search_results_page.is_empty());

    // 3 > 13 / 6: no further advance.
    dispatch(&mut s, GameEvent::SearchNextPage);
    assert_eq!(s.state().search.page, 3);

    for _ in 0..5 {
        dispatch(&mut s, GameEvent::SearchPrevPage);
    }
    assert_eq!(s.state().search.page, 0);
    assert_eq!(s.state().search_results_page.len(), 6);
}

#[test]
fn next_page_guard_allows_two_empty_pages_on_exact_multiple() {
    let mut s = store();
    s.dispatch_named("searchresults", &results_payload(12)).unwrap();
    for _ in 0..6 {
        dispatch(&mut s, GameEvent::SearchNextPage);
    }
    let search = &s.state().search;
    assert_eq!(search.page, 3);
    assert!(!search.has_next);
    assert!(search.has_prev);
    assert!(s.state().search_results_page.is_empty());
    assert_eq!(s.state().search.song_name_texts, "");
}

#[test]
fn search_results_fill_defaults_and_display_strings() {
    let mut s = store();
    let payload = json!({"results": [
        {"id": "a", "songName": "An Extremely Long Song Title Indeed", "songSubName": ""},
        {"id": "b", "songName": "Short", "songSubName": "Some Band"},
    ]});
    let result = s.dispatch_named("searchresults", &payload).unwrap().unwrap();
    assert_eq!(result.cached_records, 2);

    let st = s.state();
    assert_eq!(st.search.results[0].song_sub_name, "Unknown Artist");
    assert_eq!(st.search.results[0].short_song_name, "AN EXTREMELY LONG SON...");
    assert_eq!(st.search.song_name_texts, "AN EXTREMELY LONG SON...\nSHORT\n");
    assert_eq!(st.search.song_sub_name_texts, "Unknown Artist\nSome Band\n");
    assert!(s.cache().contains("a"));
    assert!(s.cache().contains("b"));
}

#[test]
fn selecting_challenge_sorts_difficulties() {
    let mut s = store();
    let payload = json!({"results": [
        {"id": "w", "songName": "W", "difficulties": ["Normal"]},
        {"id": "x", "songName": "X", "author": "mapper", "downloads": 42,
         "difficulties": ["Hard", "Easy"]},
    ]});
    s.dispatch_named("searchresults", &payload).unwrap();
    dispatch(&mut s, GameEvent::KeyboardOpen);
    assert!(s.state().is_searching);

    s.dispatch_named("menuchallengeselect", &json!("x")).unwrap();
    let st = s.state();
    assert_eq!(st.menu_difficulties, vec![Difficulty::Easy, Difficulty::Hard]);
    let staged = &st.menu_selected_challenge;
    assert_eq!(staged.difficulty, Some(Difficulty::Easy));
    assert_eq!(staged.index, 1);
    assert_eq!(staged.author, "mapper");
    assert_eq!(staged.downloads_text, "42 Plays");
    assert_eq!(
        staged.image,
        "https://s3-us-west-2.amazonaws.com/supersaber/x-image.jpg"
    );
    assert!(!st.is_searching);

    s.dispatch_named("menudifficultyselect", &json!("Hard")).unwrap();
    assert_eq!(
        s.state().menu_selected_challenge.difficulty,
        Some(Difficulty::Hard)
    );
}

#[test]
fn selecting_unknown_challenge_fails_fast() {
    let mut s = store();
    let err = s
        .dispatch_named("menuchallengeselect", &json!("ghost"))
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownChallenge(_)));
    assert_eq!(s.state().menu_selected_challenge.id, "");
}

#[test]
fn new_results_keep_staged_index_consistent() {
    let mut s = store();
    s.dispatch_named("searchresults", &results_payload(3)).unwrap();
    dispatch(&mut s, GameEvent::MenuChallengeSelect { id: "c2".to_string() });
    assert_eq!(s.state().menu_selected_challenge.index, 2);

    let payload = json!({"results": [{"id": "c2", "songName": "Again"}]});
    s.dispatch_named("searchresults", &payload).unwrap();
    assert_eq!(s.state().menu_selected_challenge.index, 0);
    assert_eq!(
        s.cache().get("c2").map(|r| r.song_name.as_str()),
        Some("Again")
    );

    dispatch(&mut s, GameEvent::MenuChallengeUnselect);
    assert_eq!(s.state().menu_selected_challenge.index, -1);
}

// ─────────────────────────────────────────────────────────────
// Session lifecycle
// ─────────────────────────────────────────────────────────────

#[test]
fn play_commits_staged_challenge() {
    let mut s = store();
    s.dispatch_named("searchresults", &results_payload(3)).unwrap();
    dispatch(&mut s, GameEvent::MenuChallengeSelect { id: "c1".to_string() });
    s.dispatch_named("menuselectedchallengesonglength", &json!(125.2))
        .unwrap();
    dispatch(&mut s, GameEvent::PlayButtonClick);

    let st = s.state();
    assert_eq!(st.challenge.id, "c1");
    assert_eq!(st.challenge.song_name, "Song number 1");
    assert_eq!(st.challenge.difficulty, Some(Difficulty::Normal));
    assert_eq!(st.challenge.song_length, 125);
    assert!(!st.menu_active);
    assert!(st.is_song_loading);
    assert_eq!(st.menu_selected_challenge.id, "");
    assert_eq!(st.menu_selected_challenge.index, -1);
    assert_eq!(st.loading_text, "Processing song...");
    assert!(!st.is_playing);
}

#[test]
fn loading_flags_gate_playing() {
    let mut s = store();
    s.dispatch_named("searchresults", &results_payload(1)).unwrap();
    dispatch(&mut s, GameEvent::MenuChallengeSelect { id: "c0".to_string() });
    dispatch(&mut s, GameEvent::PlayButtonClick);
    dispatch(&mut s, GameEvent::SongLoadStart);
    assert_eq!(s.state().loading_text, "Downloading song...");
    dispatch(&mut s, GameEvent::SongFetchFinish);
    assert_eq!(s.state().loading_text, "Processing song...");
    dispatch(&mut s, GameEvent::BeatLoaderStart);
    dispatch(&mut s, GameEvent::SongLoadFinish);
    assert_eq!(s.state().loading_text, "");
    assert!(!s.state().is_playing, "beats still loading");

    s.dispatch_named("beatloaderfinish", &json!({"numBeats": 321}))
        .unwrap();
    assert!(s.state().is_playing);
    dispatch(&mut s, GameEvent::BeatLoaderPreloadFinish);
    assert!(s.state().challenge.is_beats_preloaded);
}

#[test]
fn song_info_text_needs_beats_and_length() {
    let mut s = store();
    s.dispatch_named("searchresults", &results_payload(1)).unwrap();
    dispatch(&mut s, GameEvent::MenuChallengeSelect { id: "c0".to_string() });
    dispatch(&mut s, GameEvent::BeatLoaderStart);
    dispatch(&mut s, GameEvent::BeatLoaderFinish { num_beats: 250 });
    assert_eq!(s.state().menu_selected_challenge.song_info_text, "");
    dispatch(&mut s, GameEvent::MenuSelectedChallengeSongLength { seconds: 185 });
    assert_eq!(
        s.state().menu_selected_challenge.song_info_text,
        "3:5 / 250 beats"
    );

    dispatch(&mut s, GameEvent::BeatLoaderStart);
    let staged = &s.state().menu_selected_challenge;
    assert_eq!(staged.song_info_text, "");
    assert_eq!(staged.num_beats, None);
    assert_eq!(staged.song_length, None);
}

#[test]
fn pause_only_while_playing() {
    let mut s = store();
    dispatch(&mut s, GameEvent::PauseGame);
    assert!(!s.state().is_paused);

    start_playing(&mut s);
    dispatch(&mut s, GameEvent::PauseGame);
    assert!(s.state().is_paused);
    assert!(!s.state().is_playing);

    dispatch(&mut s, GameEvent::GameMenuResume);
    assert!(!s.state().is_paused);
    assert!(s.state().is_playing);
}

#[test]
fn restart_and_exit_reset_score() {
    let mut s = store();
    start_playing(&mut s);
    for _ in 0..4 {
        dispatch(&mut s, GameEvent::BeatHit);
    }
    dispatch(&mut s, GameEvent::MineHit);
    dispatch(&mut s, GameEvent::PauseGame);

    dispatch(&mut s, GameEvent::GameMenuRestart);
    let st = s.state();
    assert_eq!(st.score.score, 0);
    assert_eq!(st.damage, 0);
    assert!(!st.is_paused);
    assert!(st.is_song_loading);
    assert!(!st.menu_active);

    dispatch(&mut s, GameEvent::SongLoadFinish);
    dispatch(&mut s, GameEvent::BeatHit);
    dispatch(&mut s, GameEvent::Victory);
    dispatch(&mut s, GameEvent::GameMenuExit);
    let st = s.state();
    assert!(st.menu_active);
    assert!(!st.is_victory);
    assert_eq!(st.challenge.id, "");
    assert_eq!(st.score.beats_hit, 0);
    assert!(!st.is_playing);
}

#[test]
fn restart_from_victory_returns_to_play() {
    let mut s = store();
    start_playing(&mut s);
    for _ in 0..3 {
        dispatch(&mut s, GameEvent::BeatHit);
    }
    dispatch(&mut s, GameEvent::BeatMiss);
    dispatch(&mut s, GameEvent::Victory);
    assert!(s.state().is_victory);

    dispatch(&mut s, GameEvent::GameMenuRestart);
    assert!(!s.state().is_victory);
    assert!(!s.state().challenge.is_beats_preloaded);
    dispatch(&mut s, GameEvent::SongLoadFinish);
    let st = s.state();
    assert!(st.is_playing);
    assert_eq!(st.score.beats_hit, 0);
    assert_eq!(st.score.beats_missed, 0);
    // Result screen values stay until the next victory.
    assert_eq!(st.score.accuracy, "75%");
    assert_eq!(st.score.rank, Some(Rank::C));
}

#[test]
fn hand_swap_requests_persistence_and_moves_raycaster() {
    let mut s = store();
    dispatch(&mut s, GameEvent::EnterVr);
    assert!(s.state().right_raycaster_active);

    let result = s.dispatch(GameEvent::ActiveHandSwap).unwrap();
    assert_eq!(result.persist_hand, Some(Hand::Left));
    assert!(s.state().left_raycaster_active);
    assert!(!s.state().right_raycaster_active);

    dispatch(&mut s, GameEvent::ExitVr);
    assert!(!s.state().left_raycaster_active);
}

#[test]
fn launch_challenge_id_seeds_initial_state() {
    let s = GameStore::new(LaunchConfig::from_query("?challenge=311-abc"), Hand::Left);
    assert_eq!(s.state().challenge.id, "311-abc");
    assert_eq!(s.state().active_hand, Hand::Left);
}
