// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! Two-phase CLI handling: `clap` parses the raw argument list into
//! [`Cli`], then [`parse_and_validate`] applies range/pattern checks and
//! produces a [`ValidatedCli`] the application layer can act on directly,
//! without re-checking argument shapes deeper in the call stack.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid value for --{arg}: {reason}")]
    InvalidValue { arg: String, reason: String },

    #[error("clap argument error: {0}")]
    Clap(#[from] clap::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mediaforge", version, about = "Transcription/translation/subtitle pipeline orchestrator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enables debug-level logging regardless of RUST_LOG.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to a system configuration file overriding the compiled-in
    /// defaults layer.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolves a raw request into a frozen job descriptor and directory.
    PrepareJob {
        /// Local file path or a supported media-service URL.
        #[arg(long)]
        media: String,

        #[arg(long, value_enum)]
        workflow: WorkflowArg,

        #[arg(long)]
        source_language: String,

        #[arg(long, value_delimiter = ',')]
        target_languages: Vec<String>,

        #[arg(long, default_value_t = 0)]
        user_id: u64,

        #[arg(long)]
        start_time: Option<String>,

        #[arg(long)]
        end_time: Option<String>,

        #[arg(long)]
        tmdb_title: Option<String>,

        #[arg(long)]
        tmdb_year: Option<i32>,

        /// Computes and prints the cost estimate without creating a job.
        #[arg(long, default_value_t = false)]
        estimate_only: bool,
    },

    /// Executes a previously prepared job's stage sequence.
    RunPipeline {
        #[arg(long)]
        job: String,

        #[arg(long, default_value_t = true)]
        resume: bool,

        #[arg(long = "no-resume", conflicts_with = "resume", default_value_t = false)]
        no_resume: bool,

        #[arg(long, value_delimiter = ',')]
        stages: Vec<String>,
    },

    /// Evicts cache entries, freeing disk space held by stage artifacts.
    CacheEvict {
        /// Cache keys to evict; evicts the entire cache if omitted.
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WorkflowArg {
    Transcribe,
    Translate,
    Subtitle,
}

/// CLI arguments after validation: ranges checked, path strings still
/// unresolved (media may be a remote URL, job directories may not exist
/// yet) since that resolution belongs to the application layer.
#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub verbose: bool,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    PrepareJob {
        media: String,
        workflow: WorkflowArg,
        source_language: String,
        target_languages: Vec<String>,
        user_id: u64,
        start_time: Option<String>,
        end_time: Option<String>,
        tmdb_title: Option<String>,
        tmdb_year: Option<i32>,
        estimate_only: bool,
    },
    RunPipeline {
        job: String,
        resume: bool,
        stages: Vec<String>,
    },
    CacheEvict {
        keys: Vec<String>,
    },
}

pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    let cli = Cli::try_parse()?;
    validate_cli(cli)
}

fn invalid(arg: &str, reason: &str) -> ParseError {
    ParseError::InvalidValue {
        arg: arg.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    let command = match cli.command {
        Commands::PrepareJob {
            media,
            workflow,
            source_language,
            target_languages,
            user_id,
            start_time,
            end_time,
            tmdb_title,
            tmdb_year,
            estimate_only,
        } => {
            if media.trim().is_empty() {
                return Err(invalid("media", "must not be empty"));
            }
            if source_language.trim().is_empty() {
                return Err(invalid("source-language", "must not be empty"));
            }
            if let (Some(ref start), Some(ref end)) = (&start_time, &end_time) {
                if parse_timestamp(start)? >= parse_timestamp(end)? {
                    return Err(invalid("end-time", "must be after --start-time"));
                }
            } else if start_time.is_some() != end_time.is_some() {
                return Err(invalid(
                    "start-time/end-time",
                    "clipping requires both --start-time and --end-time",
                ));
            }
            if let Some(year) = tmdb_year {
                if !(1870..=2100).contains(&year) {
                    return Err(invalid("tmdb-year", "must be a plausible release year"));
                }
            }

            ValidatedCommand::PrepareJob {
                media,
                workflow,
                source_language,
                target_languages,
                user_id,
                start_time,
                end_time,
                tmdb_title,
                tmdb_year,
                estimate_only,
            }
        }
        Commands::RunPipeline {
            job,
            resume,
            no_resume,
            stages,
        } => {
            if job.trim().is_empty() {
                return Err(invalid("job", "must not be empty"));
            }
            ValidatedCommand::RunPipeline {
                job,
                resume: resume && !no_resume,
                stages,
            }
        }
        Commands::CacheEvict { keys } => ValidatedCommand::CacheEvict { keys },
    };

    Ok(ValidatedCli {
        command,
        verbose: cli.verbose,
        config: cli.config,
    })
}

/// Parses `HH:MM:SS` into milliseconds, the unit `MediaProcessing::clip`
/// expects. Exposed so the application layer can reuse it once it has
/// resolved a `ValidatedCommand::PrepareJob`'s raw `start_time`/`end_time`
/// strings into clip bounds.
pub fn parse_timestamp(value: &str) -> Result<u64, ParseError> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid("start-time/end-time", "must be in HH:MM:SS format"));
    }
    let hours: u64 = parts[0].parse().map_err(|_| invalid("start-time/end-time", "invalid hours"))?;
    let minutes: u64 = parts[1].parse().map_err(|_| invalid("start-time/end-time", "invalid minutes"))?;
    let seconds: u64 = parts[2].parse().map_err(|_| invalid("start-time/end-time", "invalid seconds"))?;
    Ok(((hours * 60 + minutes) * 60 + seconds) * 1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepare(media: &str, start: Option<&str>, end: Option<&str>) -> Result<ValidatedCli, ParseError> {
        validate_cli(Cli {
            command: Commands::PrepareJob {
                media: media.to_string(),
                workflow: WorkflowArg::Transcribe,
                source_language: "en".to_string(),
                target_languages: vec![],
                user_id: 1,
                start_time: start.map(str::to_string),
                end_time: end.map(str::to_string),
                tmdb_title: None,
                tmdb_year: None,
                estimate_only: false,
            },
            verbose: false,
            config: None,
        })
    }

    #[test]
    fn empty_media_is_rejected() {
        assert!(prepare("", None, None).is_err());
    }

    #[test]
    fn clip_requires_both_timestamps() {
        assert!(prepare("in.mp4", Some("00:00:10"), None).is_err());
        assert!(prepare("in.mp4", None, Some("00:01:00")).is_err());
    }

    #[test]
    fn clip_end_must_be_after_start() {
        assert!(prepare("in.mp4", Some("00:01:00"), Some("00:00:10")).is_err());
    }

    #[test]
    fn valid_clip_window_is_accepted() {
        assert!(prepare("in.mp4", Some("00:00:10"), Some("00:01:00")).is_ok());
    }

    #[test]
    fn full_media_without_clip_is_accepted() {
        assert!(prepare("in.mp4", None, None).is_ok());
    }

    #[test]
    fn parse_timestamp_converts_to_milliseconds() {
        assert_eq!(parse_timestamp("00:01:30").unwrap(), 90_000);
    }

    #[test]
    fn no_resume_flag_overrides_default_resume() {
        let result = validate_cli(Cli {
            command: Commands::RunPipeline {
                job: "job123".to_string(),
                resume: true,
                no_resume: true,
                stages: vec![],
            },
            verbose: false,
            config: None,
        })
        .unwrap();
        match result.command {
            ValidatedCommand::RunPipeline { resume, .. } => assert!(!resume),
            _ => panic!("expected RunPipeline"),
        }
    }
}
