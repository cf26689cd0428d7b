/// BeatEngine v1: Search Pagination
///
/// Page window and staged-selection index.

use crate::domain::{GameState, PageEntry, PAGE_SIZE};

/// `ceil(n / PAGE_SIZE)`.
pub fn num_pages(result_count: usize) -> usize {
    result_count.div_ceil(PAGE_SIZE)
}

/// Rebuild the visible page, the prev/next flags, the joined display
/// strings, and the staged challenge's index from `search.results` and
/// `search.page`.
pub fn compute_search_pagination(state: &mut GameState) {
    let search = &mut state.search;
    let total = search.results.len();
    let pages = num_pages(total);

    search.has_prev = search.page > 0;
    search.has_next = search.page + 1 < pages;

    let start = search.page.saturating_mul(PAGE_SIZE).min(total);
    let end = (start + PAGE_SIZE).min(total);

    search.song_name_texts.clear();
    search.song_sub_name_texts.clear();
    state.search_results_page.clear();

    for (index, record) in search.results[start..end].iter().enumerate() {
        search.song_name_texts.push_str(&record.short_song_name);
        search.song_name_texts.push('\n');
        search.song_sub_name_texts.push_str(&record.short_song_sub_name);
        search.song_sub_name_texts.push('\n');
        state.search_results_page.push(PageEntry {
            index,
            record: record.clone(),
        });
    }

    compute_selected_index(state);
}

/// Position of the staged challenge within the visible page, or -1.
pub fn selected_index(state: &GameState) -> i64 {
    let id = &state.menu_selected_challenge.id;
    state
        .search_results_page
        .iter()
        .position(|entry| &entry.record.id == id)
        .map_or(-1, |i| i as i64)
}

pub fn compute_selected_index(state: &mut GameState) {
    state.menu_selected_challenge.index = selected_index(state);
}
