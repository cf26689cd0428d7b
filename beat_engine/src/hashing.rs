/// BeatEngine v1: Canonical Hashing
///
/// Deterministic serialization + SHA-256. Field order is the struct
/// declaration order; collections are already ordered (Vec, BTreeMap).
/// Includes `STATE_SCHEMA_VERSION` as the first field.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::GameState;
use crate::error::EngineError;
use crate::STATE_SCHEMA_VERSION;

/// Canonical serialization of the state tree to UTF-8 JSON bytes.
pub fn canonical_serialize(state: &GameState) -> Result<Vec<u8>, EngineError> {
    let mut obj = Map::new();
    obj.insert("schema_version".to_string(), Value::from(STATE_SCHEMA_VERSION));
    obj.insert("state".to_string(), serde_json::to_value(state)?);
    Ok(serde_json::to_vec(&Value::Object(obj))?)
}

/// SHA-256 of the canonical serialization. Lowercase hex string.
pub fn canonical_hash(state: &GameState) -> Result<String, EngineError> {
    let bytes = canonical_serialize(state)?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}
