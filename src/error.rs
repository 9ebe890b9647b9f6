//! Error types shared across the client.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are never
//! retried or replaced with defaults; they propagate to the caller of the
//! operation that triggered them.

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exchanging tokens or talking to a mailbox.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A response was missing a required field or was not valid JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The token endpoint answered with a non-200 status.
    #[error("token exchange failed (code {code:?}): {description}")]
    UnsuccessfulTokenExchange {
        /// Provider error code, when the response carried one.
        code: Option<i64>,
        /// Provider error description, or a generic fallback.
        description: String,
    },

    /// No response could be obtained from the server.
    #[error("transport error: {message}")]
    Transport {
        /// Human readable description of the failure.
        message: String,
        /// Underlying cause reported by the transport.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A grant type that is neither online nor offline.
    #[error("invalid grant type: {0}")]
    InvalidGrantType(String),

    /// A mailbox endpoint answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the API, or the raw body.
        message: String,
    },

    /// Client configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wraps a transport-level failure, keeping it as the error source.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Builds a [`Error::MalformedResponse`] from a JSON decoding failure.
    pub(crate) fn malformed(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::transport(io);

        assert_eq!(err.to_string(), "transport error: refused");
        assert!(err.source().is_some());
    }

    #[test]
    fn token_exchange_error_display() {
        let err = Error::UnsuccessfulTokenExchange {
            code: Some(7),
            description: "invalid_grant".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "token exchange failed (code Some(7)): invalid_grant"
        );
    }

    #[test]
    fn malformed_from_json_error() {
        let json_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        assert!(matches!(
            Error::malformed(json_err),
            Error::MalformedResponse(_)
        ));
    }
}
