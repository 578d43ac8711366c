// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Fetch-and-notify components for NFT data endpoints
//!
//! This crate provides the generic [`Fetcher`] component together with the
//! concrete pieces it is wired to in production.
//!
//! # Architecture
//!
//! - **Component**: [`fetcher::Fetcher`] - fluent configuration, lifecycle-gated runs, dual-channel notification
//! - **Notification Primitives**: [`notify::Callback`] (single slot) and [`notify::Event`] (additive listeners)
//! - **Endpoints**: [`endpoint::Endpoint`] and [`collection::CollectionEndpoint`]
//! - **Transport**: [`reqwest_transport::ReqwestTransport`] - `reqwest` implementation of `HttpTransport`
//!
//! # Features
//!
//! - **Non-blocking Runs**: requests run on the Tokio runtime; `run()` returns immediately
//! - **Supersede Semantics**: a new run or `stop()` cancels the in-flight request and discards stale completions
//! - **Tolerant Decoding**: unknown members, missing members and explicit nulls are accepted
//! - **Local Recovery**: transport, status and decode failures are reported on the error channel, never raised
//! - **Testing Support**: integration tests use wiremock for HTTP simulation

pub mod collection;
pub mod endpoint;
pub mod fetcher;
pub mod notify;
pub mod reqwest_transport;

pub use collection::*;
pub use endpoint::*;
pub use fetcher::*;
pub use notify::{Callback, Event, ListenerId};
pub use reqwest_transport::*;
