// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Generic ULID-Backed Identifier
//!
//! A reusable, type-safe ULID wrapper parameterized over a zero-sized marker
//! type, so each entity gets its own identifier type at compile time without
//! repeating ULID plumbing. Used by [`crate::value_objects::CacheKey`]'s
//! internal source-job reference and by test fixtures; `JobId` uses a
//! different, date/sequence-based scheme (see `job_id.rs`) because job
//! identifiers need to be sortable and unique per user per day rather than
//! purely time-ordered.

use crate::error::MediaforgeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// Per-category validation hook, implemented by marker types.
pub trait IdCategory {
    fn category_name() -> &'static str;
}

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenericId<C> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<C>,
}

impl<C: IdCategory> GenericId<C> {
    pub fn new() -> Self {
        Self {
            ulid: Ulid::new(),
            _marker: PhantomData,
        }
    }

    pub fn from_ulid(ulid: Ulid) -> Result<Self, MediaforgeError> {
        if ulid.0 == 0 {
            return Err(MediaforgeError::ValidationError(format!(
                "{} id cannot be a nil ULID",
                C::category_name()
            )));
        }
        Ok(Self {
            ulid,
            _marker: PhantomData,
        })
    }

    pub fn parse(s: &str) -> Result<Self, MediaforgeError> {
        let ulid = Ulid::from_string(s)
            .map_err(|e| MediaforgeError::ValidationError(format!("invalid {} id '{}': {}", C::category_name(), s, e)))?;
        Self::from_ulid(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<C: IdCategory> Default for GenericId<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Display for GenericId<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ulid)
    }
}

impl<C> Copy for GenericId<C> {}
