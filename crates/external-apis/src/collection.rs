// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Collection endpoint
//!
//! Looks up a collection by its contract address. The endpoint is served from
//! a single host for all supported chains, so the chain selector does not
//! change the URL.

use serde::{Deserialize, Serialize};
use shared_types::Chain;

use crate::endpoint::Endpoint;

/// `GET {base}/collection/{address}`
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionEndpoint;

impl Endpoint for CollectionEndpoint {
    type Model = CollectionModel;

    const NAME: &'static str = "collection";

    fn build_url(&self, base_url: &str, chain: Chain, identifier: &str) -> String {
        let base_url = base_url.trim_end_matches('/');
        // Every chain resolves to the same path.
        match chain {
            Chain::Binance | Chain::Ethereum | Chain::BscTest => {
                format!("{base_url}/collection/{identifier}")
            }
        }
    }
}

/// Collection details returned by the collection endpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionModel {
    /// Contract address of the collection
    pub address: String,
    /// Collection name
    pub name: String,
    /// Collection description
    pub description: String,
    /// Image identifier or URI
    pub image: String,
    /// Resolved image URL
    pub image_url: String,
    /// Project website
    pub website: String,
    /// Twitter handle or URL
    pub twitter: String,
    /// Discord invite URL
    pub discord: String,
    /// Address of the collection owner
    pub owner_address: String,
    /// EVM chain ID the collection lives on
    pub chain_id: u64,
    /// Number of distinct holders
    pub holders: u64,
    /// Traded volume
    pub volume: f64,
    /// Whether the collection is verified
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use api_client::decode_tolerant;

    use super::*;

    #[test]
    fn url_is_identical_for_every_chain() {
        let endpoint = CollectionEndpoint;
        let urls: Vec<_> = Chain::all()
            .iter()
            .map(|&chain| endpoint.build_url("https://api.example.com/api/v2", chain, "0xABC"))
            .collect();

        for url in &urls {
            assert_eq!(url, "https://api.example.com/api/v2/collection/0xABC");
        }
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let url = CollectionEndpoint.build_url("http://localhost:8080/", Chain::Ethereum, "0x1");
        assert_eq!(url, "http://localhost:8080/collection/0x1");
    }

    #[test]
    fn identifier_is_not_validated() {
        let url = CollectionEndpoint.build_url("http://h", Chain::Binance, "not an address");
        assert_eq!(url, "http://h/collection/not an address");
    }

    #[test]
    fn model_decodes_camel_case_members() {
        let body = br#"{
            "address": "0xabc",
            "name": "Foo",
            "imageUrl": "https://img",
            "ownerAddress": "0xowner",
            "chainId": 56,
            "holders": 12,
            "volume": 1.5,
            "verified": true,
            "description": null,
            "floorPrice": 3
        }"#;

        let model: CollectionModel = decode_tolerant(body).unwrap();
        assert_eq!(model.name, "Foo");
        assert_eq!(model.image_url, "https://img");
        assert_eq!(model.owner_address, "0xowner");
        assert_eq!(model.chain_id, 56);
        assert_eq!(model.holders, 12);
        assert!(model.verified);
        assert_eq!(model.description, "");
    }
}
