/// BeatEngine v1: Event Definitions
///
/// Events are pure data: intent and payload only, zero transition logic.
/// Collaborators speak in named events with untyped JSON payloads
/// (`NamedEvent`); the engine converts them to `GameEvent` at the boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Difficulty, SearchResult};
use crate::error::EngineError;

/// Every event the engine handles, one variant per event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ActiveHandSwap,
    BeatHit,
    BeatMiss,
    BeatWrong,
    BeatLoaderFinish { num_beats: u32 },
    BeatLoaderPreloadFinish,
    BeatLoaderStart,
    GameMenuResume,
    GameMenuRestart,
    GameMenuExit,
    KeyboardClose,
    KeyboardOpen,
    MenuChallengeSelect { id: String },
    MenuChallengeUnselect,
    MenuDifficultySelect { difficulty: Difficulty },
    MenuSelectedChallengeSongLength { seconds: u32 },
    MineHit,
    PauseGame,
    PlayButtonClick,
    SearchPrevPage,
    SearchNextPage,
    SearchResults { results: Vec<SearchResult> },
    SongFetchFinish,
    SongLoadFinish,
    SongLoadStart,
    EnterVr,
    ExitVr,
    Victory,
    WallHitStart,
}

impl GameEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::ActiveHandSwap => "activehandswap",
            GameEvent::BeatHit => "beathit",
            GameEvent::BeatMiss => "beatmiss",
            GameEvent::BeatWrong => "beatwrong",
            GameEvent::BeatLoaderFinish { .. } => "beatloaderfinish",
            GameEvent::BeatLoaderPreloadFinish => "beatloaderpreloadfinish",
            GameEvent::BeatLoaderStart => "beatloaderstart",
            GameEvent::GameMenuResume => "gamemenuresume",
            GameEvent::GameMenuRestart => "gamemenurestart",
            GameEvent::GameMenuExit => "gamemenuexit",
            GameEvent::KeyboardClose => "keyboardclose",
            GameEvent::KeyboardOpen => "keyboardopen",
            GameEvent::MenuChallengeSelect { .. } => "menuchallengeselect",
            GameEvent::MenuChallengeUnselect => "menuchallengeunselect",
            GameEvent::MenuDifficultySelect { .. } => "menudifficultyselect",
            GameEvent::MenuSelectedChallengeSongLength { .. } => {
                "menuselectedchallengesonglength"
            }
            GameEvent::MineHit => "minehit",
            GameEvent::PauseGame => "pausegame",
            GameEvent::PlayButtonClick => "playbuttonclick",
            GameEvent::SearchPrevPage => "searchprevpage",
            GameEvent::SearchNextPage => "searchnextpage",
            GameEvent::SearchResults { .. } => "searchresults",
            GameEvent::SongFetchFinish => "songfetchfinish",
            GameEvent::SongLoadFinish => "songloadfinish",
            GameEvent::SongLoadStart => "songloadstart",
            GameEvent::EnterVr => "enter-vr",
            GameEvent::ExitVr => "exit-vr",
            GameEvent::Victory => "victory",
            GameEvent::WallHitStart => "wallhitstart",
        }
    }

    /// Convert a named event with a JSON payload.
    ///
    /// Returns `Ok(None)` for names the engine has no handler for.
    pub fn from_named(name: &str, payload: &Value) -> Result<Option<Self>, EngineError> {
        let event = match name {
            "activehandswap" => GameEvent::ActiveHandSwap,
            "beathit" => GameEvent::BeatHit,
            "beatmiss" => GameEvent::BeatMiss,
            "beatwrong" => GameEvent::BeatWrong,
            "beatloaderfinish" => GameEvent::BeatLoaderFinish {
                num_beats: payload_u32(payload.get("numBeats"), "beatloaderfinish")?,
            },
            "beatloaderpreloadfinish" => GameEvent::BeatLoaderPreloadFinish,
            "beatloaderstart" => GameEvent::BeatLoaderStart,
            "gamemenuresume" => GameEvent::GameMenuResume,
            "gamemenurestart" => GameEvent::GameMenuRestart,
            "gamemenuexit" => GameEvent::GameMenuExit,
            "keyboardclose" => GameEvent::KeyboardClose,
            "keyboardopen" => GameEvent::KeyboardOpen,
            "menuchallengeselect" => GameEvent::MenuChallengeSelect {
                id: payload_id(payload)?,
            },
            "menuchallengeunselect" => GameEvent::MenuChallengeUnselect,
            "menudifficultyselect" => {
                let raw = payload.as_str().ok_or_else(|| {
                    EngineError::payload("menudifficultyselect", "expected a difficulty string")
                })?;
                let difficulty = Difficulty::parse(raw).ok_or_else(|| {
                    EngineError::payload(
                        "menudifficultyselect",
                        format!("unknown difficulty {:?}", raw),
                    )
                })?;
                GameEvent::MenuDifficultySelect { difficulty }
            }
            "menuselectedchallengesonglength" => GameEvent::MenuSelectedChallengeSongLength {
                seconds: payload_seconds(payload)?,
            },
            "minehit" => GameEvent::MineHit,
            "pausegame" => GameEvent::PauseGame,
            "playbuttonclick" => GameEvent::PlayButtonClick,
            "searchprevpage" => GameEvent::SearchPrevPage,
            "searchnextpage" => GameEvent::SearchNextPage,
            "searchresults" => {
                let body: SearchResultsPayload = serde_json::from_value(payload.clone())
                    .map_err(|e| EngineError::payload("searchresults", e.to_string()))?;
                GameEvent::SearchResults {
                    results: body.results,
                }
            }
            "songfetchfinish" => GameEvent::SongFetchFinish,
            "songloadfinish" => GameEvent::SongLoadFinish,
            "songloadstart" => GameEvent::SongLoadStart,
            "enter-vr" => GameEvent::EnterVr,
            "exit-vr" => GameEvent::ExitVr,
            "victory" => GameEvent::Victory,
            "wallhitstart" => GameEvent::WallHitStart,
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// `searchresults` payload body.
#[derive(Debug, Clone, Deserialize)]
struct SearchResultsPayload {
    results: Vec<SearchResult>,
}

/// Named event as exchanged with collaborators and stored in replay scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEvent {
    pub name: String,
    #[serde(default)]
    pub payload: Value,
}

impl NamedEvent {
    pub fn new(name: &str, payload: Value) -> Self {
        Self {
            name: name.to_string(),
            payload,
        }
    }

    /// Event without a payload.
    pub fn bare(name: &str) -> Self {
        Self::new(name, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Helper: payload extraction
// ---------------------------------------------------------------------------

fn payload_u32(v: Option<&Value>, event: &'static str) -> Result<u32, EngineError> {
    v.and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| EngineError::payload(event, "expected a non-negative integer"))
}

/// Accepts a bare id string or `{ "id": ... }`.
fn payload_id(payload: &Value) -> Result<String, EngineError> {
    payload
        .as_str()
        .or_else(|| payload.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| EngineError::payload("menuchallengeselect", "expected a challenge id"))
}

/// Audio durations arrive as fractional seconds; round to whole seconds.
fn payload_seconds(payload: &Value) -> Result<u32, EngineError> {
    let seconds = payload.as_f64().filter(|s| s.is_finite() && *s >= 0.0).ok_or_else(|| {
        EngineError::payload(
            "menuselectedchallengesonglength",
            "expected a non-negative number of seconds",
        )
    })?;
    Ok(seconds.round().min(f64::from(u32::MAX)) as u32)
}
