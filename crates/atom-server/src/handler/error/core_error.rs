//! Collaborator error to HTTP error conversion.

use atom_core::ErrorKind as CoreErrorKind;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for collaborator error conversions.
const TRACING_TARGET: &str = "atom_server::handler::core";

impl From<atom_core::Error> for HttpError<'static> {
    fn from(error: atom_core::Error) -> Self {
        match error.kind {
            CoreErrorKind::NetworkError | CoreErrorKind::Timeout => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = error.kind.as_ref(),
                    "collaborator request failed"
                );
            }
            CoreErrorKind::Configuration | CoreErrorKind::Serialization => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = error.kind.as_ref(),
                    "collaborator misconfigured or returned malformed data"
                );
            }
            _ => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = error.kind.as_ref(),
                    "collaborator operation failed"
                );
            }
        }

        let message = error.to_string();
        match error.kind {
            CoreErrorKind::InvalidInput => ErrorKind::BadRequest.with_message(message),
            CoreErrorKind::ServiceUnavailable => {
                ErrorKind::ServiceUnavailable.with_message(message)
            }
            _ => ErrorKind::InternalServerError.with_message(message),
        }
    }
}
