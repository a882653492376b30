// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! [`MetadataServicePort`] over a JSON HTTP API — the external title
//! metadata and glossary lookup collaborator used by the
//! metadata-enrichment and glossary-load stages.

use async_trait::async_trait;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::{GlossaryTerm, MetadataServicePort};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub struct HttpMetadataClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetadataClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MediaforgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MediaforgeError::subsystem_error(format!("building HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

#[derive(Deserialize)]
struct GlossaryResponse {
    terms: Vec<GlossaryTerm>,
}

#[async_trait]
impl MetadataServicePort for HttpMetadataClient {
    async fn enrich(&self, media_identity_hex: &str) -> Result<HashMap<String, String>, MediaforgeError> {
        let url = format!("{}/media/{}/metadata", self.base_url, media_identity_hex);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MediaforgeError::TransientExternal(format!("requesting {url}: {e}")))?
            .error_for_status()
            .map_err(|e| MediaforgeError::TransientExternal(format!("{url} returned an error status: {e}")))?;
        response
            .json()
            .await
            .map_err(|e| MediaforgeError::SerializationError(format!("parsing metadata response from {url}: {e}")))
    }

    async fn glossary_for(&self, domain_hint: &str, target_languages: &[String]) -> Result<Vec<GlossaryTerm>, MediaforgeError> {
        let url = format!("{}/glossary", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("domain", domain_hint)])
            .query(&[("targets", target_languages.join(","))])
            .send()
            .await
            .map_err(|e| MediaforgeError::TransientExternal(format!("requesting {url}: {e}")))?
            .error_for_status()
            .map_err(|e| MediaforgeError::TransientExternal(format!("{url} returned an error status: {e}")))?;
        let body: GlossaryResponse = response
            .json()
            .await
            .map_err(|e| MediaforgeError::SerializationError(format!("parsing glossary response from {url}: {e}")))?;
        Ok(body.terms)
    }
}
