//! Error types for token transmission.
//!
//! Defines the raised-error channel of the delivery contract: pre-flight
//! validation failures, HTTP client construction failures, and transport
//! failures that exhausted every attempt. Rejected HTTP responses are never
//! errors; they surface as [`Outcome::Failed`](crate::Outcome::Failed).

use thiserror::Error;

/// Result type alias for transmission operations.
pub type Result<T> = std::result::Result<T, TransmitError>;

/// Error conditions raised by token transmission.
#[derive(Debug, Clone, Error)]
pub enum TransmitError {
    /// Token is not a well-formed three-segment signed message.
    #[error("invalid token: {reason}")]
    InvalidToken {
        /// What was wrong with the token shape
        reason: String,
    },

    /// Destination is not an absolute URL.
    #[error("invalid destination URL: {reason}")]
    InvalidDestination {
        /// Parse failure reported for the destination
        reason: String,
    },

    /// No response arrived within the configured per-attempt timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds
        timeout_ms: u64,
    },

    /// Connection-level failure before any HTTP response was obtained.
    #[error("network error: {message}")]
    Network {
        /// Description of the transport failure
        message: String,
    },

    /// Every attempt failed at the transport level; no response to report.
    #[error("delivery failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Transport error from the final attempt
        #[source]
        source: Box<TransmitError>,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    Client {
        /// Builder error message
        message: String,
    },
}

impl TransmitError {
    /// Creates an invalid-token error.
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken { reason: reason.into() }
    }

    /// Creates an invalid-destination error.
    pub fn invalid_destination(reason: impl Into<String>) -> Self {
        Self::InvalidDestination { reason: reason.into() }
    }

    /// Creates a timeout error for the given deadline.
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a retries-exhausted error wrapping the final transport error.
    pub fn retries_exhausted(attempts: u32, source: TransmitError) -> Self {
        Self::RetriesExhausted { attempts, source: Box::new(source) }
    }

    /// Creates a client construction error.
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client { message: message.into() }
    }

    /// Returns true for pre-flight validation failures.
    ///
    /// Validation failures abort before any network activity and are never
    /// retried.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidToken { .. } | Self::InvalidDestination { .. })
    }

    /// Returns true for transport-level failures (timeout or connection).
    ///
    /// Transport failures are retried internally up to the attempt cap and
    /// only escape wrapped in [`TransmitError::RetriesExhausted`].
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Network { .. } | Self::RetriesExhausted { .. }
        )
    }
}
