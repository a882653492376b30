// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Cross-platform signal handling for graceful shutdown: SIGTERM, SIGINT,
//! and (on Unix) SIGHUP all trigger the same shutdown callback, so a stage
//! subprocess gets the chance to be killed cleanly before the process
//! exits.

use std::future::Future;
use std::pin::Pin;

pub type ShutdownCallback = Box<dyn FnOnce() + Send + 'static>;

/// Abstracts platform-specific signal handling so the orchestrator's
/// shutdown path can be exercised in tests without installing real OS
/// signal handlers.
pub trait SystemSignals: Send + Sync {
    fn wait_for_signal(&self, on_shutdown: ShutdownCallback) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

#[cfg(unix)]
pub struct UnixSignalHandler;

#[cfg(unix)]
impl UnixSignalHandler {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl Default for UnixSignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl SystemSignals for UnixSignalHandler {
    fn wait_for_signal(&self, on_shutdown: ShutdownCallback) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");
            let mut sigint = signal(SignalKind::interrupt()).expect("failed to register SIGINT handler");
            let mut sighup = signal(SignalKind::hangup()).expect("failed to register SIGHUP handler");

            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("received SIGTERM, initiating graceful shutdown");
                }
                _ = sigint.recv() => {
                    tracing::info!("received SIGINT, initiating graceful shutdown");
                }
                _ = sighup.recv() => {
                    tracing::info!("received SIGHUP, initiating graceful shutdown");
                }
            }

            on_shutdown();
        })
    }
}

#[cfg(windows)]
pub struct WindowsSignalHandler;

#[cfg(windows)]
impl WindowsSignalHandler {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl Default for WindowsSignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(windows)]
impl SystemSignals for WindowsSignalHandler {
    fn wait_for_signal(&self, on_shutdown: ShutdownCallback) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            tokio::signal::ctrl_c().await.expect("failed to register Ctrl+C handler");
            tracing::info!("received Ctrl+C, initiating graceful shutdown");
            on_shutdown();
        })
    }
}

/// Never fires; lets tests drive shutdown explicitly instead of racing a
/// real signal.
pub struct NoOpSignalHandler;

impl NoOpSignalHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpSignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSignals for NoOpSignalHandler {
    fn wait_for_signal(&self, _on_shutdown: ShutdownCallback) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            std::future::pending::<()>().await;
        })
    }
}

pub fn create_signal_handler() -> Box<dyn SystemSignals> {
    #[cfg(unix)]
    {
        Box::new(UnixSignalHandler::new())
    }

    #[cfg(windows)]
    {
        Box::new(WindowsSignalHandler::new())
    }

    #[cfg(not(any(unix, windows)))]
    {
        compile_error!("unsupported platform for signal handling");
    }
}
