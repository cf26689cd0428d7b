#![forbid(unsafe_code)]

//! Runtime shell around `beat_engine`.
//!
//! Adds the preference store, subscriber notification, a mutex-guarded
//! session handle and deterministic replay. No game rules live here;
//! every transition is delegated to the kernel.

pub mod error;
pub mod preferences;
pub mod replay;
pub mod session;

pub use error::RuntimeError;
pub use session::{Session, SharedSession};
