// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! CLI dispatch. The only layer that talks to `std::process::exit` and
//! `println!`/`eprintln!` directly — everything below returns typed
//! results.

pub mod cli;

pub use cli::CliDispatcher;
