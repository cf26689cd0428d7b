/// BeatEngine v1: Invariant Checks
///
/// Run on every candidate tree before it is committed.
/// Returns the first failure; `Ok(())` if all pass.

use crate::derive::compute_state;
use crate::domain::{GameState, DAMAGE_MAX, PAGE_SIZE};
use crate::error::EngineError;
use crate::pagination::{num_pages, selected_index};
use crate::scoring::multiplier_for_combo;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn validate_invariants(state: &GameState) -> Result<(), EngineError> {
    check_damage_range(state)?;
    check_combo(state)?;
    check_page_window(state)?;
    check_page_flags(state)?;
    check_selected_index(state)?;
    check_derived_fields(state)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

/// Damage stays in [0, DAMAGE_MAX): reaching the max resets it.
fn check_damage_range(state: &GameState) -> Result<(), EngineError> {
    if !(0..DAMAGE_MAX).contains(&state.damage) {
        return Err(EngineError::invariant(
            "damage_range",
            format!("damage={} outside [0, {})", state.damage, DAMAGE_MAX),
        ));
    }
    Ok(())
}

/// combo <= max_combo, and the multiplier matches the combo tier.
fn check_combo(state: &GameState) -> Result<(), EngineError> {
    let score = &state.score;
    if score.combo > score.max_combo {
        return Err(EngineError::invariant(
            "combo_bound",
            format!("combo={} > max_combo={}", score.combo, score.max_combo),
        ));
    }
    let expected = multiplier_for_combo(score.combo);
    if score.multiplier != expected {
        return Err(EngineError::invariant(
            "multiplier_tier",
            format!(
                "multiplier={} but combo={} requires {}",
                score.multiplier, score.combo, expected
            ),
        ));
    }
    Ok(())
}

/// The visible page is the slice of results for the current page.
fn check_page_window(state: &GameState) -> Result<(), EngineError> {
    let page = &state.search_results_page;
    if page.len() > PAGE_SIZE {
        return Err(EngineError::invariant(
            "page_size",
            format!("page holds {} entries, limit {}", page.len(), PAGE_SIZE),
        ));
    }
    let start = state.search.page.saturating_mul(PAGE_SIZE);
    for (i, entry) in page.iter().enumerate() {
        if entry.index != i {
            return Err(EngineError::invariant(
                "page_index",
                format!("entry at {} carries index {}", i, entry.index),
            ));
        }
        if state.search.results.get(start + i) != Some(&entry.record) {
            return Err(EngineError::invariant(
                "page_window",
                format!("entry {:?} is not results[{}]", entry.record.id, start + i),
            ));
        }
    }
    Ok(())
}

fn check_page_flags(state: &GameState) -> Result<(), EngineError> {
    let search = &state.search;
    let pages = num_pages(search.results.len());
    if search.has_prev != (search.page > 0) || search.has_next != (search.page + 1 < pages) {
        return Err(EngineError::invariant(
            "page_flags",
            format!(
                "page={} of {} has_prev={} has_next={}",
                search.page, pages, search.has_prev, search.has_next
            ),
        ));
    }
    Ok(())
}

fn check_selected_index(state: &GameState) -> Result<(), EngineError> {
    let expected = selected_index(state);
    if state.menu_selected_challenge.index != expected {
        return Err(EngineError::invariant(
            "selected_index",
            format!(
                "staged {:?} has index {}, page position is {}",
                state.menu_selected_challenge.id, state.menu_selected_challenge.index, expected
            ),
        ));
    }
    Ok(())
}

/// Derived fields agree with a fresh derivation.
fn check_derived_fields(state: &GameState) -> Result<(), EngineError> {
    let mut fresh = state.clone();
    compute_state(&mut fresh);
    if fresh != *state {
        return Err(EngineError::invariant(
            "derived_fields",
            format!(
                "is_playing={} (expected {}), loading_text={:?} (expected {:?})",
                state.is_playing, fresh.is_playing, state.loading_text, fresh.loading_text
            ),
        ));
    }
    Ok(())
}
