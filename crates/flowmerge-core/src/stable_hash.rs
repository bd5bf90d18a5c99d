use crate::stable_json::stable_json_bytes;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hex SHA-256 of the canonical JSON encoding of `value`.
pub fn stable_hash_hex(value: &Value) -> String {
    let digest = Sha256::digest(stable_json_bytes(value));
    format!("{digest:x}")
}

#[cfg(test)]
#[path = "stable_hash_test.rs"]
mod tests;
