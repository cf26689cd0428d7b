/// BeatEngine v1: Formatting Helpers
///
/// Pure functions, no state.

use crate::domain::Difficulty;

/// Display limit for song names on the results page.
pub const SONG_NAME_TRUNCATE: usize = 24;

/// Display limit for song sub-names (artist line).
pub const SONG_SUB_NAME_TRUNCATE: usize = 32;

/// Sub-name shown for results that arrive without one.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

const ELLIPSIS: &str = "...";

/// Cut `text` to at most `limit` characters. When it is longer, the last
/// three characters of the kept window become an ellipsis.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Upper-cased, truncated song name for the results list.
pub fn short_song_name(song_name: &str) -> String {
    truncate(song_name, SONG_NAME_TRUNCATE).to_uppercase()
}

/// Truncated sub-name for the results list.
pub fn short_song_sub_name(song_sub_name: &str) -> String {
    truncate(song_sub_name, SONG_SUB_NAME_TRUNCATE)
}

/// Ascending by difficulty rank. `sort_by_key` is stable, so equal ranks
/// keep their relative order.
pub fn sort_difficulties(difficulties: &mut [Difficulty]) {
    difficulties.sort_by_key(|d| d.rank());
}

/// `m:s` with whole minutes and remaining seconds, unpadded.
pub fn format_song_length(seconds: u32) -> String {
    format!("{}:{}", seconds / 60, seconds % 60)
}

/// `"{m:s} / {n} beats"` once both values are known and non-zero.
pub fn song_info_text(num_beats: Option<u32>, song_length: Option<u32>) -> Option<String> {
    match (num_beats, song_length) {
        (Some(beats), Some(length)) if beats > 0 && length > 0 => {
            Some(format!("{} / {} beats", format_song_length(length), beats))
        }
        _ => None,
    }
}

/// `"{downloads} Plays"`.
pub fn downloads_text(downloads: u64) -> String {
    format!("{} Plays", downloads)
}

/// Location of a per-challenge asset: `{base}/{id}-{name}`.
pub fn asset_url(base: &str, id: &str, name: &str) -> String {
    format!("{}/{}-{}", base.trim_end_matches('/'), id, name)
}
