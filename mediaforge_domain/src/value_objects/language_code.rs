// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Source/target language codes: `source_language` is an ISO code or
//! `auto`; `target_languages` is an ordered list of ISO codes.

use crate::error::MediaforgeError;
use serde::{Deserialize, Serialize};

/// Either a specific ISO-639 language code, normalized to lowercase, or
/// `auto` (source-language detection delegated to the ASR stage).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub const AUTO: &'static str = "auto";

    pub fn auto() -> Self {
        Self(Self::AUTO.to_string())
    }

    /// Parses and normalizes an ISO-639-1/-3 code or the literal `auto`.
    pub fn parse(s: &str) -> Result<Self, MediaforgeError> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(MediaforgeError::ValidationError("language code cannot be empty".into()));
        }
        if normalized == Self::AUTO {
            return Ok(Self(normalized));
        }
        if !(2..=3).contains(&normalized.len()) || !normalized.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(MediaforgeError::ValidationError(format!(
                "'{}' is not a valid ISO-639 code or 'auto'",
                s
            )));
        }
        Ok(Self(normalized))
    }

    pub fn is_auto(&self) -> bool {
        self.0 == Self::AUTO
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Deduplicates an ordered list of target languages while preserving
    /// first-seen order, rejecting `auto` as a target.
    pub fn dedup_targets(codes: Vec<LanguageCode>) -> Result<Vec<LanguageCode>, MediaforgeError> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::with_capacity(codes.len());
        for code in codes {
            if code.is_auto() {
                return Err(MediaforgeError::ValidationError("'auto' is not a valid target language".into()));
            }
            if seen.insert(code.clone()) {
                out.push(code);
            }
        }
        Ok(out)
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
