// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request and response types exchanged with an [`HttpTransport`](crate::HttpTransport)

use std::{borrow::Cow, fmt};

use crate::session::SessionProvider;

/// Content type sent with every endpoint request
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Header carrying the client source tag
pub const SOURCE_HEADER: &str = "source";

/// The fixed header set attached to every endpoint request
#[derive(Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    source: String,
    authorization: String,
}

impl RequestHeaders {
    /// Create headers from explicit values
    pub fn new(source: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            authorization: authorization.into(),
        }
    }

    /// Snapshot the current session values into a header set
    pub fn from_session(session: &dyn SessionProvider) -> Self {
        Self::new(session.source_tag(), session.api_key())
    }

    /// Client source tag
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Authorization value (the raw API key)
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// All headers as `(name, value)` pairs, in the order they are sent
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Content-Type", CONTENT_TYPE_JSON),
            (SOURCE_HEADER, self.source.as_str()),
            ("Authorization", self.authorization.as_str()),
        ]
        .into_iter()
    }
}

impl fmt::Debug for RequestHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestHeaders")
            .field("source", &self.source)
            .field("authorization", &"<redacted>")
            .finish()
    }
}

/// A completed HTTP exchange, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from a status code and body
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
