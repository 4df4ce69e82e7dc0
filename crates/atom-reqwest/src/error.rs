//! Internal error types for atom-reqwest.

use thiserror::Error;

/// Result type alias for atom-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for atom-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<Error> for atom_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    atom_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    atom_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    atom_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    atom_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => atom_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => atom_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}
