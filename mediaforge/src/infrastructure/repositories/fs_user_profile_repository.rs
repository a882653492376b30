// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Filesystem-backed, read-only [`UserProfileRepository`]: one JSON file
//! per user, mutated only by a separate operator-facing tool — this
//! adapter never writes.

use async_trait::async_trait;
use mediaforge_domain::entities::UserProfile;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::repositories::UserProfileRepository;
use mediaforge_domain::value_objects::UserId;
use std::path::PathBuf;

pub struct FsUserProfileRepository {
    profiles_root: PathBuf,
}

impl FsUserProfileRepository {
    pub fn new(profiles_root: PathBuf) -> Self {
        Self { profiles_root }
    }

    fn profile_path(&self, user_id: UserId) -> PathBuf {
        self.profiles_root.join(format!("{}.json", user_id.get()))
    }
}

#[async_trait]
impl UserProfileRepository for FsUserProfileRepository {
    async fn find(&self, user_id: UserId) -> Result<Option<UserProfile>, MediaforgeError> {
        match tokio::fs::read(self.profile_path(user_id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MediaforgeError::io_error(format!("reading profile for user {}: {e}", user_id.get()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediaforge_domain::entities::BudgetLimits;
    use std::collections::HashMap;

    #[tokio::test]
    async fn reads_a_profile_written_as_plain_json() {
        let tmp = tempfile::tempdir().unwrap();
        let profile = UserProfile::new(UserId::new(3), HashMap::new(), BudgetLimits::unlimited(), HashMap::new());
        let path = tmp.path().join("3.json");
        tokio::fs::write(&path, serde_json::to_vec(&profile).unwrap()).await.unwrap();

        let repo = FsUserProfileRepository::new(tmp.path().to_path_buf());
        let loaded = repo.find(UserId::new(3)).await.unwrap().unwrap();
        assert_eq!(loaded.user_id(), UserId::new(3));
    }

    #[tokio::test]
    async fn missing_profile_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = FsUserProfileRepository::new(tmp.path().to_path_buf());
        assert!(repo.find(UserId::new(99)).await.unwrap().is_none());
    }
}
