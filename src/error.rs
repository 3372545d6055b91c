// Error types for the two URL operations. The `Display` text of every
// `UrlError` variant is what the CLI prints in place of a result, so it must
// not change: scripts downstream match on these exact strings.

use std::collections::TryReserveError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a `Transport` implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client")]
    Init(#[source] BoxError),

    #[error("failed to reserve response buffer")]
    Alloc(#[source] TryReserveError),

    #[error("request failed")]
    Network(#[source] BoxError),
}

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Error: Memory allocation failed")]
    Allocation(#[source] TryReserveError),

    #[error("Error: Could not initialize curl")]
    ClientInit(#[source] BoxError),

    #[error("Error: URL encoding failed")]
    Encoding(#[source] BoxError),

    #[error("Error: URL too long for API")]
    TooLong { encoded_len: usize },

    #[error("Error: Could not shorten URL (network failure)")]
    ShortenNetwork(#[source] BoxError),

    #[error("Error: Could not unshorten URL (network issue)")]
    UnshortenNetwork(#[source] BoxError),

    #[error("Error: Invalid or failed redirect response")]
    InvalidRedirect { status: u16 },
}

impl UrlError {
    /// Map a transport failure, naming the network variant for the operation.
    pub(crate) fn from_transport(err: TransportError, network: fn(BoxError) -> UrlError) -> Self {
        match err {
            TransportError::Init(e) => UrlError::ClientInit(e),
            TransportError::Alloc(e) => UrlError::Allocation(e),
            TransportError::Network(e) => network(e),
        }
    }
}

pub type UrlResult<T> = Result<T, UrlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_the_legacy_strings() {
        assert_eq!(
            UrlError::TooLong { encoded_len: 901 }.to_string(),
            "Error: URL too long for API"
        );
        assert_eq!(
            UrlError::ShortenNetwork("refused".into()).to_string(),
            "Error: Could not shorten URL (network failure)"
        );
        assert_eq!(
            UrlError::UnshortenNetwork("refused".into()).to_string(),
            "Error: Could not unshorten URL (network issue)"
        );
        assert_eq!(
            UrlError::InvalidRedirect { status: 404 }.to_string(),
            "Error: Invalid or failed redirect response"
        );
        assert_eq!(
            UrlError::ClientInit("tls".into()).to_string(),
            "Error: Could not initialize curl"
        );
        assert_eq!(
            UrlError::Encoding("bad".into()).to_string(),
            "Error: URL encoding failed"
        );
    }

    #[test]
    fn source_does_not_leak_into_message() {
        let err = UrlError::ShortenNetwork("dns error: no such host".into());
        assert!(!err.to_string().contains("dns"));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("dns error: no such host"));
    }

    #[test]
    fn transport_errors_map_per_operation() {
        let e = UrlError::from_transport(
            TransportError::Network("timeout".into()),
            UrlError::UnshortenNetwork,
        );
        assert!(matches!(e, UrlError::UnshortenNetwork(_)));

        let e = UrlError::from_transport(TransportError::Init("x".into()), UrlError::ShortenNetwork);
        assert!(matches!(e, UrlError::ClientInit(_)));
    }
}
