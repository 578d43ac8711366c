// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs, dead_code)]

//! Collection endpoint test fixtures
//!
//! Provides mock endpoint responses and a notification recorder for driving
//! the fetch component end to end over HTTP.

use std::{sync::Arc, time::Duration};

use api_client::Session;
use external_apis::{
    CollectionEndpoint, CollectionModel, FetchSettings, Fetcher, ReqwestTransport,
    ReqwestTransportConfig,
};
use serde_json::{Value, json};
use tokio::sync::mpsc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_SOURCE: &str = "sdk-tests";
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);
pub const SETTLE_TIME: Duration = Duration::from_millis(300);

pub type CollectionFetcher = Fetcher<CollectionEndpoint, ReqwestTransport>;

/// Identifiers routed to the different mocked scenarios
#[derive(Debug)]
pub struct TestIdentifiers;

impl TestIdentifiers {
    pub const VALID: &'static str = "0xABC";
    pub const NOT_FOUND: &'static str = "0x404";
    pub const SERVER_ERROR: &'static str = "0x500";
    pub const MALFORMED: &'static str = "0xBAD";
    pub const NULLS: &'static str = "0x0NULL";
    pub const SLOW: &'static str = "0x5L0W";
    pub const FAST: &'static str = "0xFA57";
}

/// Mounts collection endpoint mocks on a wiremock server
#[derive(Debug)]
pub struct CollectionFixture;

impl CollectionFixture {
    /// Mount every scenario
    pub async fn setup_mocks(mock_server: &MockServer) {
        Self::mount_json(
            mock_server,
            TestIdentifiers::VALID,
            200,
            json!({"name": "Foo", "extra": 99}),
        )
        .await;

        Self::mount_body(mock_server, TestIdentifiers::NOT_FOUND, 404, "not found").await;

        Self::mount_body(
            mock_server,
            TestIdentifiers::SERVER_ERROR,
            500,
            "Internal Server Error",
        )
        .await;

        Self::mount_body(mock_server, TestIdentifiers::MALFORMED, 200, "{\"name\": ").await;

        Self::mount_json(
            mock_server,
            TestIdentifiers::NULLS,
            200,
            json!({"name": null, "holders": 12, "verified": null}),
        )
        .await;

        Mock::given(method("GET"))
            .and(path(format!("/collection/{}", TestIdentifiers::SLOW)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(Self::collection_response("Slow"))
                    .set_delay(Duration::from_millis(150)),
            )
            .mount(mock_server)
            .await;

        Self::mount_json(
            mock_server,
            TestIdentifiers::FAST,
            200,
            Self::collection_response("Fast"),
        )
        .await;
    }

    /// Mount a JSON response for an identifier, requiring the fixed headers
    pub async fn mount_json(mock_server: &MockServer, identifier: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/collection/{identifier}")))
            .and(header("Content-Type", "application/json"))
            .and(header("source", TEST_SOURCE))
            .and(header("Authorization", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(mock_server)
            .await;
    }

    /// Mount a raw text response for an identifier
    pub async fn mount_body(mock_server: &MockServer, identifier: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/collection/{identifier}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    /// A complete collection payload
    pub fn collection_response(name: &str) -> Value {
        json!({
            "address": "0x1234567890123456789012345678901234567890",
            "name": name,
            "description": format!("{name} collection"),
            "imageUrl": format!("https://images.example.com/{}.png", name.to_lowercase()),
            "chainId": 1,
            "holders": 42,
            "volume": 12.5,
            "verified": true
        })
    }
}

/// Outcome observed on the notification channels
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Complete(CollectionModel),
    Error(String),
    AfterSuccess,
    AfterError,
}

/// Collects every notification a fetcher emits
#[derive(Debug)]
pub struct Recorder {
    rx: mpsc::UnboundedReceiver<Notice>,
}

impl Recorder {
    /// Subscribe a recorder to all four channels of `fetcher`
    pub fn attach(fetcher: &CollectionFetcher) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let complete_tx = tx.clone();
        let error_tx = tx.clone();
        let success_tx = tx.clone();
        fetcher
            .on_complete(move |model| {
                let _ = complete_tx.send(Notice::Complete(model.clone()));
            })
            .on_error(move |error| {
                let _ = error_tx.send(Notice::Error(error.to_string()));
            });
        fetcher.after_success().add_listener(move || {
            let _ = success_tx.send(Notice::AfterSuccess);
        });
        fetcher.after_error().add_listener(move || {
            let _ = tx.send(Notice::AfterError);
        });

        Self { rx }
    }

    /// Wait for the next notification
    pub async fn next(&mut self) -> Notice {
        tokio::time::timeout(NOTIFICATION_TIMEOUT, self.rx.recv())
            .await
            .expect("no notification received in time")
            .expect("notification channel closed")
    }

    /// Wait for both channels of one outcome
    pub async fn next_outcome(&mut self) -> (Notice, Notice) {
        let first = self.next().await;
        let second = self.next().await;
        (first, second)
    }

    /// Wait a little and return everything received meanwhile
    pub async fn settle(&mut self) -> Vec<Notice> {
        tokio::time::sleep(SETTLE_TIME).await;
        let mut notices = Vec::new();
        while let Ok(notice) = self.rx.try_recv() {
            notices.push(notice);
        }
        notices
    }
}

/// Initialised session with the test credentials
pub fn test_session() -> Arc<Session> {
    Arc::new(Session::initialise(TEST_API_KEY, TEST_SOURCE))
}

/// Create a collection fetcher pointed at the mock server
pub fn create_test_fetcher(base_url: String) -> CollectionFetcher {
    let transport =
        ReqwestTransport::new(ReqwestTransportConfig::default()).expect("transport builds");
    let settings = FetchSettings {
        base_url,
        log_raw_response: true,
        ..FetchSettings::default()
    };
    Fetcher::with_settings(CollectionEndpoint, transport, test_session(), settings)
}
