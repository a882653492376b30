// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Read-only lookup port for user profiles.

use crate::entities::UserProfile;
use crate::error::MediaforgeError;
use crate::value_objects::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn find(&self, user_id: UserId) -> Result<Option<UserProfile>, MediaforgeError>;
}
