// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! One-shot collection lookup
//!
//! Wires a detached [`Fetcher`] to a channel so a caller can await the
//! outcome the component reports through its callbacks.

use std::sync::Arc;

use api_client::Session;
use external_apis::{
    CollectionEndpoint, CollectionModel, Fetcher, ReqwestTransport, ReqwestTransportConfig,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    config::CliConfig,
    error::{CliError, CliResult},
};

/// Fetch one collection and wait for its outcome
///
/// # Errors
///
/// Returns `CliError::Transport` if the HTTP client cannot be built and
/// `CliError::Fetch` if the component reports on its error channel.
pub async fn fetch_collection(config: &CliConfig) -> CliResult<CollectionModel> {
    let session = Arc::new(Session::initialise(
        config.api_key.clone(),
        config.source.clone(),
    ));
    let transport = ReqwestTransport::new(ReqwestTransportConfig::default())?;

    let (tx, mut rx) = mpsc::unbounded_channel::<CliResult<CollectionModel>>();
    let error_tx = tx.clone();

    let settings = config.fetch_settings();
    let fetcher = Fetcher::initialize(CollectionEndpoint, transport, session.clone(), true);
    fetcher
        .set_base_url(settings.base_url)
        .set_chain(settings.chain)
        .set_parameters(Some(settings.identifier.as_str()))
        .set_log_raw_response(settings.log_raw_response)
        .set_log_errors(settings.log_errors)
        .on_complete(move |model| {
            let _ = tx.send(Ok(model.clone()));
        })
        .on_error(move |error| {
            let _ = error_tx.send(Err(CliError::from(error)));
        });

    info!(
        chain = %config.chain,
        address = %config.address,
        "Fetching collection"
    );
    fetcher.run_detached();

    let outcome = rx.recv().await.unwrap_or(Err(CliError::ChannelClosed));
    session.teardown();
    debug!(success = outcome.is_ok(), "Collection lookup finished");

    outcome
}
