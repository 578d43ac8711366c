// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the command-line lookup

use api_client::FetchError;
use external_apis::ReqwestTransportError;
use thiserror::Error;

/// Errors raised while running a lookup from the command line
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// The HTTP transport could not be built
    #[error("Transport setup failed: {0}")]
    Transport(#[from] ReqwestTransportError),

    /// The lookup completed on the error channel
    #[error("Fetch failed: {message}")]
    Fetch {
        /// HTTP status code, 0 when no response was received
        status: u16,
        /// Error string delivered to the error callback
        message: String,
    },

    /// The component was disposed without reporting an outcome
    #[error("Fetch component finished without reporting an outcome")]
    ChannelClosed,
}

impl From<&FetchError> for CliError {
    fn from(error: &FetchError) -> Self {
        Self::Fetch {
            status: error.status_code(),
            message: error.to_string(),
        }
    }
}

/// Result type for command-line operations
pub type CliResult<T> = Result<T, CliError>;
