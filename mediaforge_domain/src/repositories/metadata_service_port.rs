// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Port over the external metadata/glossary-lookup collaborator used by
//! the metadata-enrichment and glossary-load stages.

use crate::error::MediaforgeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub source_term: String,
    pub target_terms: HashMap<String, String>,
}

#[async_trait]
pub trait MetadataServicePort: Send + Sync {
    async fn enrich(&self, media_identity_hex: &str) -> Result<HashMap<String, String>, MediaforgeError>;

    async fn glossary_for(&self, domain_hint: &str, target_languages: &[String]) -> Result<Vec<GlossaryTerm>, MediaforgeError>;
}
