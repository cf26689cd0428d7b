//! Error types for the `beat_runtime` crate.

use std::path::PathBuf;

use beat_engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The kernel rejected an event.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Reading or writing the preference file failed.
    #[error("preference file {path}: {source}")]
    PreferenceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preference file is not a JSON object of strings.
    #[error("preference file {path} is malformed: {source}")]
    PreferenceFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A replay script could not be read or parsed.
    #[error("replay script: {0}")]
    Script(String),

    /// Two replays of the same events produced different hashes.
    #[error("determinism failure: run 1 = {first}, run 2 = {second}")]
    Determinism { first: String, second: String },
}
