// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SHA-256 content hash of a tracked file.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, crate::error::MediaforgeError> {
        let bytes = hex::decode(s)
            .map_err(|e| crate::error::MediaforgeError::ValidationError(format!("invalid content hash hex: {}", e)))?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| crate::error::MediaforgeError::ValidationError("content hash must be 32 bytes".into()))?;
        Ok(Self(array))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_hash_identically() {
        assert_eq!(ContentHash::of_bytes(b"hello"), ContentHash::of_bytes(b"hello"));
    }

    #[test]
    fn differing_bytes_hash_differently() {
        assert_ne!(ContentHash::of_bytes(b"hello"), ContentHash::of_bytes(b"world"));
    }
}
