/// BeatEngine v1: Core Domain Types
///
/// Pure data. No transition logic lives here.
/// Damage is i64 fixed-point (DAMAGE_SCALE units per damage point).

use serde::{Deserialize, Serialize};

// ── Constants ──────────────────────────────────────────────────────

/// Fixed-point scale for damage. One damage point is `DAMAGE_SCALE` units.
pub const DAMAGE_SCALE: i64 = 100;

/// Damage at which the session ends in game over (10 points).
pub const DAMAGE_MAX: i64 = 10 * DAMAGE_SCALE;

/// Damage recovered on every successful hit (0.25 points).
pub const DAMAGE_DECAY: i64 = 25;

/// Number of search results shown per page.
pub const PAGE_SIZE: usize = 6;

/// Highest combo multiplier.
pub const MAX_MULTIPLIER: u32 = 8;

// ── Enums ──────────────────────────────────────────────────────────

/// Which controller drives the menu pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    #[default]
    Right,
}

impl Hand {
    pub fn as_str(self) -> &'static str {
        match self {
            Hand::Left => "left",
            Hand::Right => "right",
        }
    }

    /// Parse a persisted preference value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Hand> {
        match value.trim() {
            "left" => Some(Hand::Left),
            "right" => Some(Hand::Right),
            _ => None,
        }
    }

    pub fn swapped(self) -> Hand {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

/// Difficulty variants a challenge may offer, in ascending rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
    ExpertPlus,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::ExpertPlus,
    ];

    /// Fixed rank used to order difficulty menus. Easy is 0.
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
            Difficulty::Expert => 3,
            Difficulty::ExpertPlus => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
            Difficulty::ExpertPlus => "ExpertPlus",
        }
    }

    pub fn parse(value: &str) -> Option<Difficulty> {
        Difficulty::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

/// Letter grade awarded on the victory screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    S,
    A,
    B,
    C,
    D,
    F,
}

// ── Challenges ─────────────────────────────────────────────────────

/// The challenge committed for play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Challenge {
    pub author: String,
    pub difficulty: Option<Difficulty>,
    pub id: String,
    pub image: String,
    pub is_loading: bool,
    pub is_beats_preloaded: bool,
    pub song_name: String,
    pub song_length: u32, // seconds
    pub song_sub_name: String,
}

/// The challenge staged in the menu, not yet committed for play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StagedChallenge {
    pub author: String,
    pub difficulty: Option<Difficulty>,
    pub downloads: u64,
    pub downloads_text: String,
    pub id: String,
    /// Position within the visible results page, or -1.
    pub index: i64,
    pub image: String,
    pub num_beats: Option<u32>,
    pub song_info_text: String,
    pub song_length: Option<u32>,
    pub song_name: String,
    pub song_sub_name: String,
}

impl Default for StagedChallenge {
    fn default() -> Self {
        Self {
            author: String::new(),
            difficulty: None,
            downloads: 0,
            downloads_text: String::new(),
            id: String::new(),
            index: -1,
            image: String::new(),
            num_beats: None,
            song_info_text: String::new(),
            song_length: None,
            song_name: String::new(),
            song_sub_name: String::new(),
        }
    }
}

/// A search hit as delivered by the search collaborator.
///
/// Fields the engine does not use are ignored on ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub song_name: String,
    #[serde(default)]
    pub song_sub_name: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub difficulties: Vec<Difficulty>,
}

/// Ingested challenge metadata: the search hit plus display strings.
/// Stored both in `search.results` and in the challenge cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRecord {
    pub id: String,
    pub song_name: String,
    pub song_sub_name: String,
    pub author: String,
    pub downloads: u64,
    pub difficulties: Vec<Difficulty>,
    pub short_song_name: String,
    pub short_song_sub_name: String,
}

/// One row of the visible results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    pub index: usize,
    #[serde(flatten)]
    pub record: ChallengeRecord,
}

// ── Score & search ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Score {
    /// Whole-percentage string, set on victory.
    pub accuracy: String,
    pub beats_hit: u32,
    pub beats_missed: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub multiplier: u32,
    /// Set on victory.
    pub rank: Option<Rank>,
    pub score: u64,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            accuracy: String::new(),
            beats_hit: 0,
            beats_missed: 0,
            combo: 0,
            max_combo: 0,
            multiplier: 1,
            rank: None,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchState {
    pub active: bool,
    /// Zero-based page index.
    pub page: usize,
    pub has_next: bool,
    pub has_prev: bool,
    pub results: Vec<ChallengeRecord>,
    pub song_name_texts: String,
    pub song_sub_name_texts: String,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            active: true,
            page: 0,
            has_next: false,
            has_prev: false,
            results: Vec::new(),
            song_name_texts: String::new(),
            song_sub_name_texts: String::new(),
        }
    }
}

// ── State tree ─────────────────────────────────────────────────────

/// The complete state tree.
///
/// `is_playing`, the raycaster flags, `loading_text` and `multiplier_text`
/// are derived fields: only `derive::compute_state` writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GameState {
    pub active_hand: Hand,
    pub challenge: Challenge,
    /// Fixed-point, see `DAMAGE_SCALE`.
    pub damage: i64,
    #[serde(rename = "inVR")]
    pub in_vr: bool,
    pub is_game_over: bool,
    pub is_paused: bool,
    pub is_playing: bool,
    pub is_searching: bool,
    pub is_song_fetching: bool,
    pub is_song_loading: bool,
    pub is_victory: bool,
    pub menu_active: bool,
    pub menu_difficulties: Vec<Difficulty>,
    pub menu_selected_challenge: StagedChallenge,
    pub score: Score,
    pub search: SearchState,
    pub search_results_page: Vec<PageEntry>,
    pub left_raycaster_active: bool,
    pub right_raycaster_active: bool,
    pub loading_text: String,
    pub multiplier_text: String,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            active_hand: Hand::default(),
            challenge: Challenge::default(),
            damage: 0,
            in_vr: false,
            is_game_over: false,
            is_paused: false,
            is_playing: false,
            is_searching: false,
            is_song_fetching: false,
            is_song_loading: false,
            is_victory: false,
            menu_active: true,
            menu_difficulties: Vec::new(),
            menu_selected_challenge: StagedChallenge::default(),
            score: Score::default(),
            search: SearchState::default(),
            search_results_page: Vec::new(),
            left_raycaster_active: false,
            right_raycaster_active: false,
            loading_text: String::new(),
            multiplier_text: "1x".to_string(),
        }
    }
}

/// Structured outcome of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransitionResult {
    pub event_type: String,
    /// A damaging event actually applied damage.
    pub damage_taken: bool,
    /// This dispatch ended the session in game over.
    pub game_over: bool,
    /// New hand preference the caller should persist.
    pub persist_hand: Option<Hand>,
    /// Number of challenge records written to the cache.
    pub cached_records: usize,
}
