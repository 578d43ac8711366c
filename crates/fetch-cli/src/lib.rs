// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line collection lookup
//!
//! Loads a [`CliConfig`], runs a single detached collection fetch and returns
//! the decoded model or the error the component reported.

pub mod config;
pub mod error;
pub mod runner;

pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use runner::fetch_collection;
