// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Session credentials shared by all fetch components of a process
//!
//! Components read the API key and the client source tag through
//! [`SessionProvider`] when a run starts; they never mutate them. The host owns
//! the concrete [`Session`] and drives its lifecycle explicitly:
//! [`Session::initialise`] before the first run, [`Session::teardown`] when
//! shutting down.

use std::{
    fmt,
    sync::{PoisonError, RwLock},
};

use tracing::{debug, warn};

/// Read-only supplier of per-process authorization and identification values
pub trait SessionProvider: Send + Sync {
    /// API key sent as the `Authorization` header
    fn api_key(&self) -> String;

    /// Client source tag sent as the `source` header
    fn source_tag(&self) -> String;
}

#[derive(Clone)]
struct Credentials {
    api_key: String,
    source: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Process-wide session holding the user's credentials
#[derive(Debug, Default)]
pub struct Session {
    credentials: RwLock<Option<Credentials>>,
}

impl Session {
    /// Create an initialised session
    pub fn initialise(api_key: impl Into<String>, source: impl Into<String>) -> Self {
        let session = Self::default();
        session.reinitialise(api_key, source);
        session
    }

    /// Replace the credentials of an existing session
    pub fn reinitialise(&self, api_key: impl Into<String>, source: impl Into<String>) {
        let credentials = Credentials {
            api_key: api_key.into(),
            source: source.into(),
        };
        debug!(source = credentials.source, "session initialised");
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(credentials);
    }

    /// Switch the source tag reported to the endpoints
    ///
    /// Returns `false` if the session has not been initialised.
    pub fn set_source(&self, source: impl Into<String>) -> bool {
        let mut guard = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(credentials) => {
                credentials.source = source.into();
                true
            }
            None => false,
        }
    }

    /// Clear the credentials; later reads return empty values
    pub fn teardown(&self) {
        debug!("session torn down");
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether credentials are currently available
    pub fn is_initialised(&self) -> bool {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn read_with<F>(&self, field: &'static str, f: F) -> String
    where
        F: FnOnce(&Credentials) -> String,
    {
        let guard = self
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(credentials) = guard.as_ref() {
            f(credentials)
        } else {
            warn!(field, "session read before initialisation");
            String::new()
        }
    }
}

impl SessionProvider for Session {
    fn api_key(&self) -> String {
        self.read_with("api_key", |c| c.api_key.clone())
    }

    fn source_tag(&self) -> String {
        self.read_with("source", |c| c.source.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialised_session_supplies_values() {
        let session = Session::initialise("key-1", "runtime");

        assert!(session.is_initialised());
        assert_eq!(session.api_key(), "key-1");
        assert_eq!(session.source_tag(), "runtime");
    }

    #[test]
    fn uninitialised_session_supplies_empty_values() {
        let session = Session::default();

        assert!(!session.is_initialised());
        assert_eq!(session.api_key(), "");
        assert_eq!(session.source_tag(), "");
        assert!(!session.set_source("editor"));
    }

    #[test]
    fn set_source_keeps_api_key() {
        let session = Session::initialise("key-1", "runtime");

        assert!(session.set_source("editor"));
        assert_eq!(session.source_tag(), "editor");
        assert_eq!(session.api_key(), "key-1");
    }

    #[test]
    fn teardown_clears_credentials() {
        let session = Session::initialise("key-1", "runtime");
        session.teardown();

        assert!(!session.is_initialised());
        assert_eq!(session.api_key(), "");

        session.reinitialise("key-2", "cli");
        assert_eq!(session.api_key(), "key-2");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let session = Session::initialise("super-secret", "runtime");
        let debug = format!("{session:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("runtime"));
    }
}
