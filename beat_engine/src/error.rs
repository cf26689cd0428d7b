/// BeatEngine v1: Errors
///
/// Unknown event names are not errors: the store ignores them.

/// Errors surfaced synchronously by `GameStore::dispatch`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A challenge was selected that no search result ever delivered.
    #[error("challenge {0:?} is not in the challenge cache")]
    UnknownChallenge(String),

    /// A named event carried a payload of the wrong shape.
    #[error("malformed payload for {event}: {reason}")]
    MalformedPayload {
        /// Event name.
        event: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The tree failed validation after derivation. Nothing was committed.
    #[error("invariant violation [{invariant}]: {detail}")]
    InvariantViolation {
        /// Short invariant tag.
        invariant: &'static str,
        /// Offending values.
        detail: String,
    },

    /// The launch URL could not be parsed.
    #[error("invalid launch url: {0}")]
    InvalidLaunchUrl(#[from] url::ParseError),

    /// Canonical serialization failed.
    #[error("state serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn payload(event: &'static str, reason: impl Into<String>) -> Self {
        EngineError::MalformedPayload {
            event,
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(invariant: &'static str, detail: impl Into<String>) -> Self {
        EngineError::InvariantViolation {
            invariant,
            detail: detail.into(),
        }
    }
}
