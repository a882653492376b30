// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The composition root: parses and validates the command line, wires
//! every concrete adapter to the port it satisfies, and dispatches to
//! [`mediaforge::presentation::CliDispatcher`]. A SIGTERM/SIGINT/SIGHUP
//! during a run drops the in-flight dispatch future, which in turn
//! drops any spawned stage subprocess — `kill_on_drop(true)` on the
//! `tokio::process::Command` used by `SubprocessStageExecutor` is the
//! actual cleanup mechanism; this is just what triggers the drop.

use mediaforge::application::{CacheEvictUseCase, JobPreparationService, Orchestrator, PrepareJobUseCase, RunPipelineUseCase};
use mediaforge::infrastructure::http::HttpDownloadClient;
use mediaforge::infrastructure::logging::{self, LogFormat};
use mediaforge::infrastructure::repositories::{AppendLogCostEventSink, FsJobRepository, FsUserProfileRepository};
use mediaforge::infrastructure::{FfprobeDurationProbe, FsCacheRepository, SubprocessStageExecutor};
use mediaforge::presentation::CliDispatcher;
use mediaforge_bootstrap::{bootstrap_cli, create_platform, create_signal_handler, ExitCode};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = match bootstrap_cli() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(ExitCode::UsageError.as_i32());
        }
    };

    logging::init(LogFormat::Human, cli.verbose);

    let data_root = mediaforge_data_root();
    let jobs_root = data_root.join("jobs");
    let cache_root = data_root.join("cache");
    let downloads_root = data_root.join("downloads");
    let profiles_root = data_root.join("profiles");
    let cost_log_path = data_root.join("cost_events.jsonl");

    let job_repository = Arc::new(FsJobRepository::new(jobs_root.clone()));
    let user_profile_repository = Arc::new(FsUserProfileRepository::new(profiles_root));
    let cache_repository = Arc::new(FsCacheRepository::new(cache_root));
    let cost_event_sink = Arc::new(AppendLogCostEventSink::new(cost_log_path));
    let platform = Arc::from(create_platform());

    let download_client = match HttpDownloadClient::new() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("failed to build download client: {e}");
            std::process::exit(ExitCode::Software.as_i32());
        }
    };
    let duration_probe = Arc::new(FfprobeDurationProbe::default());
    let stage_executor = Arc::new(SubprocessStageExecutor::new(cli.config.clone(), platform));

    let orchestrator = Arc::new(Orchestrator::new(
        job_repository.clone(),
        stage_executor,
        cache_repository.clone(),
        cost_event_sink,
        jobs_root,
    ));
    let job_preparation = Arc::new(JobPreparationService::new(
        job_repository,
        user_profile_repository,
        download_client,
        duration_probe,
        downloads_root,
    ));

    let dispatcher = CliDispatcher::new(
        Arc::new(PrepareJobUseCase::new(job_preparation)),
        Arc::new(RunPipelineUseCase::new(orchestrator)),
        Arc::new(CacheEvictUseCase::new(cache_repository)),
    );

    let signals = create_signal_handler();
    let exit_code = tokio::select! {
        code = dispatcher.dispatch(cli.command) => code,
        _ = signals.wait_for_signal(Box::new(|| {})) => {
            error!("shutting down on signal before the command finished");
            ExitCode::Interrupted.as_i32()
        }
    };

    std::process::exit(exit_code);
}

/// `$MEDIAFORGE_HOME`, or `~/.local/share/mediaforge` as a stand-in for
/// the platform data directory when it isn't set.
fn mediaforge_data_root() -> PathBuf {
    if let Ok(custom) = env::var("MEDIAFORGE_HOME") {
        return PathBuf::from(custom);
    }
    dirs_fallback().join("mediaforge")
}

fn dirs_fallback() -> PathBuf {
    env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")).unwrap_or_else(|_| PathBuf::from(".")))
}
