//! Session: a game store wired to its collaborators.
//!
//! Dispatch order:
//!   1. store.dispatch(event)  - handler, derivation, validation, commit
//!   2. persist the hand preference, if the transition asked for it
//!   3. notify subscribers with the committed tree
//!
//! Subscribers only ever see committed trees.

use std::sync::Mutex;

use serde_json::Value;
use tracing::info;

use beat_engine::hashing::canonical_hash;
use beat_engine::{GameEvent, GameState, GameStore, LaunchConfig, TransitionResult};

use crate::error::RuntimeError;
use crate::preferences::{load_hand, save_hand, PreferenceStore};

/// Callback invoked after every committed dispatch.
pub type Subscriber = Box<dyn FnMut(&GameState) + Send>;

pub struct Session {
    store: GameStore,
    preferences: Box<dyn PreferenceStore>,
    subscribers: Vec<Subscriber>,
}

impl Session {
    /// Read the hand preference once and build the initial tree.
    pub fn new(config: LaunchConfig, preferences: Box<dyn PreferenceStore>) -> Self {
        let hand = load_hand(preferences.as_ref());
        info!(
            hand = hand.as_str(),
            god_mode = config.god_mode,
            challenge = config.challenge_id.as_deref().unwrap_or(""),
            "session started"
        );
        Self {
            store: GameStore::new(config, hand),
            preferences,
            subscribers: Vec::new(),
        }
    }

    /// Register a callback for committed state trees.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&GameState) + Send + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply a typed event. Errors leave the state untouched and notify
    /// no one.
    pub fn dispatch(&mut self, event: GameEvent) -> Result<TransitionResult, RuntimeError> {
        let result = self.store.dispatch(event)?;
        self.after_commit(&result);
        Ok(result)
    }

    /// Apply an event by wire name. Unhandled names yield `Ok(None)`.
    pub fn dispatch_named(
        &mut self,
        name: &str,
        payload: &Value,
    ) -> Result<Option<TransitionResult>, RuntimeError> {
        let result = self.store.dispatch_named(name, payload)?;
        if let Some(result) = &result {
            self.after_commit(result);
        }
        Ok(result)
    }

    fn after_commit(&mut self, result: &TransitionResult) {
        if let Some(hand) = result.persist_hand {
            save_hand(self.preferences.as_mut(), hand);
        }
        let state = self.store.state();
        for subscriber in &mut self.subscribers {
            subscriber(state);
        }
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn current_hash(&self) -> Result<String, RuntimeError> {
        Ok(canonical_hash(self.store.state())?)
    }
}

/// Thread-safe session handle using Mutex.
pub struct SharedSession {
    inner: Mutex<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        // A panic inside a subscriber must not wedge the session.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Dispatch under lock.
    pub fn dispatch_named(
        &self,
        name: &str,
        payload: &Value,
    ) -> Result<Option<TransitionResult>, RuntimeError> {
        self.lock().dispatch_named(name, payload)
    }

    pub fn dispatch(&self, event: GameEvent) -> Result<TransitionResult, RuntimeError> {
        self.lock().dispatch(event)
    }

    /// Snapshot of the committed state.
    pub fn snapshot(&self) -> GameState {
        self.lock().state().clone()
    }

    pub fn current_hash(&self) -> Result<String, RuntimeError> {
        self.lock().current_hash()
    }
}
