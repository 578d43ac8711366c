// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Endpoint descriptions consumed by [`Fetcher`](crate::Fetcher)

use serde::de::DeserializeOwned;
use shared_types::Chain;

/// Base URL of the hosted NFT data API
pub const DEFAULT_BASE_URL: &str = "https://api.alturanft.com/api/v2";

/// A remote endpoint: how to address it and what it returns
pub trait Endpoint: Send + Sync + 'static {
    /// Model the response body decodes into
    ///
    /// The model should derive `Deserialize` with `#[serde(default)]` so that
    /// missing and `null` members fall back to defaults.
    type Model: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Name used in logs
    const NAME: &'static str;

    /// Build the request URL for the given configuration
    fn build_url(&self, base_url: &str, chain: Chain, identifier: &str) -> String;
}
