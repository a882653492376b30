// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Thin `reqwest`-backed clients for the two external HTTP
//! collaborators: media download and title/glossary metadata lookup.

mod download_client;
mod metadata_client;

pub use download_client::HttpDownloadClient;
pub use metadata_client::HttpMetadataClient;
