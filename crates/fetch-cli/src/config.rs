// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Command configuration
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. Default values
//! 2. Configuration file (`fetch.json`), or the file passed explicitly
//! 3. Environment-specific file (`fetch.{env}.json`, env from `ENVIRONMENT`)
//! 4. Environment variables with the `FETCH_` prefix, e.g. `FETCH_API_KEY`

use std::{fmt, path::Path};

use anyhow::{Result, ensure};
use config::{Config, ConfigError, Environment, File};
use external_apis::{DEFAULT_BASE_URL, FetchSettings};
use serde::Deserialize;
use shared_types::Chain;
use url::Url;

use crate::error::{CliError, CliResult};

const DEFAULT_SOURCE: &str = "cli";

/// Configuration of a single collection lookup
#[derive(Clone, Deserialize)]
pub struct CliConfig {
    /// Base URL of the data API
    pub base_url: Url,
    /// API key sent as the `Authorization` header
    pub api_key: String,
    /// Client source tag sent as the `source` header
    pub source: String,
    /// Chain to query
    pub chain: Chain,
    /// Collection contract address
    pub address: String,
    /// Log raw response bodies
    pub log_raw_response: bool,
    /// Log the query and any failure
    pub log_errors: bool,
}

impl CliConfig {
    /// Load configuration from the default files and the environment
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> CliResult<Self> {
        Self::load(None).map_err(|e| CliError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration, reading `file` instead of the default files when given
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, a value has the wrong type,
    /// or the result fails validation.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let config = Self::builder(file)?.build()?;
        let cli_config: Self = config.try_deserialize()?;
        cli_config.validate()?;
        Ok(cli_config)
    }

    fn builder(
        file: Option<&Path>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("api_key", "")?
            .set_default("source", DEFAULT_SOURCE)?
            .set_default("chain", Chain::default().name())?
            .set_default("address", "")?
            .set_default("log_raw_response", false)?
            .set_default("log_errors", true)?;

        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => {
                let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
                builder
                    .add_source(File::with_name("fetch.json").required(false))
                    .add_source(
                        File::with_name(&format!("fetch.{}.json", env.to_lowercase()))
                            .required(false),
                    )
            }
        };

        Ok(builder.add_source(Environment::with_prefix("FETCH").try_parsing(true)))
    }

    /// Check values the endpoint cannot work without
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or the address is empty
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.api_key.trim().is_empty(), "api_key must be set");
        ensure!(!self.address.trim().is_empty(), "address must be set");
        Ok(())
    }

    /// Component settings for a one-shot lookup
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.to_string(),
            chain: self.chain,
            identifier: self.address.clone(),
            run_on_activate: false,
            log_raw_response: self.log_raw_response,
            log_errors: self.log_errors,
            destroy_at_end: true,
        }
    }
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("source", &self.source)
            .field("chain", &self.chain)
            .field("address", &self.address)
            .field("log_raw_response", &self.log_raw_response)
            .field("log_errors", &self.log_errors)
            .finish()
    }
}
