//! Replay: rebuild state from a list of named events.
//!
//! Runs against in-memory preferences so a replay never touches disk.

use serde::Deserialize;

use beat_engine::{GameState, Hand, LaunchConfig, NamedEvent};

use crate::error::RuntimeError;
use crate::preferences::{MemoryPreferences, HAND_KEY};
use crate::session::Session;

/// A recorded session: launch query, stored hand, and events in order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    pub launch: String,
    pub hand: Option<Hand>,
    pub events: Vec<NamedEvent>,
}

impl ReplayScript {
    pub fn from_json(text: &str) -> Result<Self, RuntimeError> {
        serde_json::from_str(text).map_err(|e| RuntimeError::Script(e.to_string()))
    }

    fn session(&self) -> Session {
        let prefs = match self.hand {
            Some(hand) => MemoryPreferences::with(HAND_KEY, hand.as_str()),
            None => MemoryPreferences::new(),
        };
        Session::new(LaunchConfig::from_query(&self.launch), Box::new(prefs))
    }
}

/// Replay every event in a fresh session.
/// Returns (final_state, canonical_hash).
pub fn rebuild_state(script: &ReplayScript) -> Result<(GameState, String), RuntimeError> {
    let mut session = script.session();
    for event in &script.events {
        session.dispatch_named(&event.name, &event.payload)?;
    }
    let hash = session.current_hash()?;
    Ok((session.state().clone(), hash))
}

/// Replay twice and require identical hashes.
pub fn verify_determinism(script: &ReplayScript) -> Result<String, RuntimeError> {
    let (_, first) = rebuild_state(script)?;
    let (_, second) = rebuild_state(script)?;
    if first != second {
        return Err(RuntimeError::Determinism { first, second });
    }
    Ok(first)
}
