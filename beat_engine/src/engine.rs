/// BeatEngine v1: Game Store
///
/// The single owner of the state tree and challenge cache.
/// Top-level orchestrator. Every dispatch is a fixed pipeline:
///   1. Delegate to `transitions::apply_event` (working copy)
///   2. Recompute derived fields
///   3. Validate invariants
///   4. Commit state and staged cache writes
///
/// A failed step leaves the committed tree and cache untouched.

use serde_json::Value;
use tracing::debug;

use crate::cache::ChallengeCache;
use crate::config::LaunchConfig;
use crate::derive::compute_state;
use crate::domain::{GameState, Hand, TransitionResult};
use crate::error::EngineError;
use crate::events::{GameEvent, NamedEvent};
use crate::invariants::validate_invariants;
use crate::state::create_initial_state;
use crate::transitions::{apply_event, Transition};

pub struct GameStore {
    state: GameState,
    cache: ChallengeCache,
    config: LaunchConfig,
    initial_hand: Hand,
    dispatched: u64,
}

impl GameStore {
    /// Build the initial tree from the persisted hand and launch config.
    pub fn new(config: LaunchConfig, active_hand: Hand) -> Self {
        Self {
            state: create_initial_state(active_hand, &config),
            cache: ChallengeCache::new(),
            config,
            initial_hand: active_hand,
            dispatched: 0,
        }
    }

    /// Current committed state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn cache(&self) -> &ChallengeCache {
        &self.cache
    }

    /// Number of events committed since construction or the last replay.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Apply a single event.
    pub fn dispatch(&mut self, event: GameEvent) -> Result<TransitionResult, EngineError> {
        let name = event.name();
        let Transition {
            mut state,
            cache_writes,
            result,
        } = apply_event(&self.state, &self.cache, &self.config, event)?;

        compute_state(&mut state);
        validate_invariants(&state)?;

        self.cache.extend(cache_writes);
        self.state = state;
        self.dispatched += 1;
        debug!(
            event = name,
            seq = self.dispatched,
            playing = self.state.is_playing,
            "event committed"
        );
        Ok(result)
    }

    /// Apply an event by wire name. Names without a handler are ignored
    /// and yield `Ok(None)`.
    pub fn dispatch_named(
        &mut self,
        name: &str,
        payload: &Value,
    ) -> Result<Option<TransitionResult>, EngineError> {
        match GameEvent::from_named(name, payload)? {
            Some(event) => self.dispatch(event).map(Some),
            None => {
                debug!(event = name, "no handler, ignored");
                Ok(None)
            }
        }
    }

    /// Apply an ordered sequence of events, stopping at the first error.
    pub fn apply_sequence(&mut self, events: &[NamedEvent]) -> Result<&GameState, EngineError> {
        for event in events {
            self.dispatch_named(&event.name, &event.payload)?;
        }
        Ok(self.state())
    }

    /// Reset to the initial tree (empty cache) and replay.
    pub fn replay(&mut self, events: &[NamedEvent]) -> Result<&GameState, EngineError> {
        self.state = create_initial_state(self.initial_hand, &self.config);
        self.cache = ChallengeCache::new();
        self.dispatched = 0;
        self.apply_sequence(events)
    }
}
