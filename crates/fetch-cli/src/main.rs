// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Collection lookup
//!
//! Fetches one NFT collection and prints it as JSON.

use anyhow::Result;
use fetch_cli::{CliConfig, fetch_collection};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::from_env()?;
    info!(config = ?config, "Loaded configuration");

    let collection = fetch_collection(&config).await?;
    println!("{}", serde_json::to_string_pretty(&collection)?);

    Ok(())
}
