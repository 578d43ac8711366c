// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Collaborator contracts for the NFT data fetch components
//!
//! This crate provides the abstractions every endpoint component is built on,
//! independent of any concrete HTTP stack.
//!
//! # Core Abstractions
//!
//! - **`HttpTransport` Trait**: async GET with fixed request headers
//! - **`SessionProvider` Trait**: read-only supplier of the API key and client source tag
//! - **Tolerant Codec**: [`codec::decode_tolerant`] ignores unknown members and explicit nulls
//! - **Error Taxonomy**: [`FetchError`] separates transport, HTTP status and decode failures
//!
//! # Key Features
//!
//! - **Async-First Design**: transports return `impl Future` so components can suspend without blocking
//! - **Injected Credentials**: the session is passed in explicitly instead of read from global state
//! - **Redacted Debug Output**: authorization values never appear in `Debug` output

use thiserror::Error;

pub mod codec;
pub mod session;
pub mod types;

pub use codec::{DecodeError, decode_tolerant};
pub use session::{Session, SessionProvider};
pub use types::*;

/// Asynchronous HTTP transport used by the fetch components
///
/// Implementations only report failures that prevented a response from being
/// received. Any response, whatever its status, is returned as an
/// [`HttpResponse`] so the caller can decide how to route it.
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request with the given headers
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on connectivity, DNS, TLS or URL failures
    fn get(
        &self,
        url: &str,
        headers: &RequestHeaders,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;

    /// Get the name/identifier of this transport
    fn name(&self) -> &'static str;
}

/// A request that never produced an HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Create a transport error from a human-readable message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure description
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Terminal failure of a fetch run, delivered through the error channel
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    /// The request never produced a response
    #[error("Null data. Response code: 0. Result {message}")]
    Transport { message: String },

    /// The endpoint answered with a non-success status
    #[error("Null data. Response code: {status}. Result {body}")]
    HttpStatus { status: u16, body: String },

    /// The endpoint answered successfully but the payload could not be decoded
    #[error("Invalid response payload: {source}. Result {body}")]
    Decode {
        #[source]
        source: DecodeError,
        body: String,
    },

    /// The run was triggered outside of an async runtime
    #[error("No async runtime available to run the request")]
    RuntimeUnavailable,
}

impl FetchError {
    /// HTTP status code associated with this failure, `0` when no response was received
    pub fn status_code(&self) -> u16 {
        match self {
            Self::HttpStatus { status, .. } => *status,
            Self::Decode { .. } => 200,
            Self::Transport { .. } | Self::RuntimeUnavailable => 0,
        }
    }

    /// Raw response body text, if a response was received
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } | Self::Decode { body, .. } => Some(body),
            Self::Transport { .. } | Self::RuntimeUnavailable => None,
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(value: TransportError) -> Self {
        Self::Transport {
            message: value.message,
        }
    }
}
