// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! A single error enum for the pipeline orchestration domain. Variants match
//! the error taxonomy in the specification one-to-one so that the
//! orchestrator can surface `error.kind()` directly as the job's recorded
//! failure kind, without a secondary translation table.

use thiserror::Error;

/// Domain-specific errors for the pipeline orchestration system.
#[derive(Error, Debug, Clone)]
pub enum MediaforgeError {
    #[error("config missing: {0}")]
    ConfigMissing(String),

    #[error("credential missing: {0}")]
    CredentialMissing(String),

    #[error("budget exceeded: {0}")]
    BudgetExceeded(String),

    #[error("io error: {0}")]
    IoError(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("subsystem error: {0}")]
    SubsystemError(String),

    #[error("transient external failure: {0}")]
    TransientExternal(String),

    #[error("containment violation: {0}")]
    ContainmentViolation(String),

    #[error("abnormal termination: {0}")]
    AbnormalTermination(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl MediaforgeError {
    pub fn config_missing(msg: impl Into<String>) -> Self {
        Self::ConfigMissing(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::IoError(msg.into())
    }

    pub fn subsystem_error(msg: impl Into<String>) -> Self {
        Self::SubsystemError(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Whether the stage that raised this error is safe to retry with
    /// exponential backoff (`transient-external`).
    pub fn is_retryable(&self) -> bool {
        matches!(self, MediaforgeError::TransientExternal(_) | MediaforgeError::Timeout(_))
    }

    /// Whether this error kind permits graceful degradation for an optional
    /// stage: everything except `containment-violation` and
    /// `config-missing`.
    pub fn allows_graceful_degradation(&self) -> bool {
        !matches!(
            self,
            MediaforgeError::ContainmentViolation(_) | MediaforgeError::ConfigMissing(_)
        )
    }

    /// Stable machine-readable kind, used as the `errors[].kind` field
    /// embedded in stage manifests.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MediaforgeError::ConfigMissing(_) => ErrorKind::ConfigMissing,
            MediaforgeError::CredentialMissing(_) => ErrorKind::CredentialMissing,
            MediaforgeError::BudgetExceeded(_) => ErrorKind::BudgetExceeded,
            MediaforgeError::IoError(_) => ErrorKind::IoError,
            MediaforgeError::Timeout(_) => ErrorKind::Timeout,
            MediaforgeError::SubsystemError(_) => ErrorKind::SubsystemError,
            MediaforgeError::TransientExternal(_) => ErrorKind::TransientExternal,
            MediaforgeError::ContainmentViolation(_) => ErrorKind::ContainmentViolation,
            MediaforgeError::AbnormalTermination(_) => ErrorKind::AbnormalTermination,
            MediaforgeError::SerializationError(_) => ErrorKind::SerializationError,
            MediaforgeError::ValidationError(_) => ErrorKind::ValidationError,
            MediaforgeError::Cancelled(_) => ErrorKind::Cancelled,
            MediaforgeError::JobNotFound(_) => ErrorKind::JobNotFound,
            MediaforgeError::InternalError(_) => ErrorKind::InternalError,
        }
    }
}

/// The error taxonomy as a plain enum for serialization into manifests (as
/// opposed to `MediaforgeError`, which carries a message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    ConfigMissing,
    CredentialMissing,
    BudgetExceeded,
    IoError,
    Timeout,
    SubsystemError,
    TransientExternal,
    ContainmentViolation,
    AbnormalTermination,
    SerializationError,
    ValidationError,
    Cancelled,
    JobNotFound,
    InternalError,
}

impl From<std::io::Error> for MediaforgeError {
    fn from(err: std::io::Error) -> Self {
        MediaforgeError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for MediaforgeError {
    fn from(err: serde_json::Error) -> Self {
        MediaforgeError::SerializationError(err.to_string())
    }
}
