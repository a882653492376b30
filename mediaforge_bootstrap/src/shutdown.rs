// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Coordinates graceful shutdown across the orchestrator, the subprocess
//! executor, and any in-flight HTTP requests: a cancellation token
//! propagates the signal, and a grace period bounds how long a stage
//! subprocess is given to exit before it is killed outright.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 10;

/// Lightweight clone-able token passed to async tasks so they can observe
/// a shutdown request without holding a reference to the coordinator.
#[derive(Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves immediately if already cancelled, otherwise waits for
    /// `cancel()` to be called.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.notify.notified().await;
    }
}

pub struct ShutdownCoordinator {
    token: CancellationToken,
    grace_period: Duration,
    complete: Arc<Notify>,
    completed: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new(grace_period: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            grace_period,
            complete: Arc::new(Notify::new()),
            completed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// Signals every holder of a `CancellationToken`. Idempotent.
    pub fn initiate_shutdown(&self) {
        self.token.cancel();
    }

    /// Waits for `complete_shutdown()` to be called, bounded by the grace
    /// period. Returns `true` if shutdown completed cleanly within the
    /// grace period, `false` if the grace period elapsed first.
    pub async fn wait_for_shutdown(&self) -> bool {
        self.wait_with_timeout(self.grace_period).await
    }

    pub fn complete_shutdown(&self) {
        self.completed.store(true, Ordering::SeqCst);
        self.complete.notify_waiters();
    }

    pub async fn wait_with_timeout(&self, timeout: Duration) -> bool {
        if self.completed.load(Ordering::SeqCst) {
            return true;
        }
        tokio::select! {
            _ = self.complete.notified() => true,
            _ = tokio::time::sleep(timeout) => false,
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_GRACE_PERIOD_SECS))
    }
}
