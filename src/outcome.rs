//! Terminal outcome of a transmission call.
//!
//! An [`Outcome`] exists only when at least one HTTP response was obtained.
//! Calls that never got a response (validation rejected, transport
//! exhausted) raise [`TransmitError`](crate::TransmitError) instead, so
//! callers can tell "got a bad response" apart from "never got a response".

use std::collections::HashMap;

use crate::response::{InterpretedResponse, ResponseBody};

/// Result of a transmission call that obtained an HTTP response.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The destination accepted the token.
    Success {
        /// HTTP status code of the accepted response.
        status: u16,
        /// Normalized response headers.
        headers: HashMap<String, String>,
        /// Response body after content negotiation.
        body: ResponseBody,
    },
    /// The destination responded, but the status failed the acceptance
    /// predicate and no further retry was permitted.
    Failed {
        /// HTTP status code of the final response.
        status: u16,
        /// Normalized response headers.
        headers: HashMap<String, String>,
        /// Response body after content negotiation.
        body: ResponseBody,
        /// Human-readable description of the failure.
        error: String,
        /// Whether the status code belongs to the configured transient set.
        ///
        /// This reflects class-level retryability even when the attempt cap
        /// is what stopped the loop: it says "this kind of failure is in
        /// principle retryable", not "another retry was attempted".
        retryable: bool,
    },
}

impl Outcome {
    pub(crate) fn success(response: InterpretedResponse) -> Self {
        Self::Success {
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }

    pub(crate) fn failed(response: InterpretedResponse, error: String, retryable: bool) -> Self {
        Self::Failed {
            status: response.status,
            headers: response.headers,
            body: response.body,
            error,
            retryable,
        }
    }

    /// Whether the delivery was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// HTTP status code of the final response.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failed { status, .. } => *status,
        }
    }

    /// Normalized headers of the final response.
    pub fn headers(&self) -> &HashMap<String, String> {
        match self {
            Self::Success { headers, .. } | Self::Failed { headers, .. } => headers,
        }
    }

    /// Body of the final response.
    pub fn body(&self) -> &ResponseBody {
        match self {
            Self::Success { body, .. } | Self::Failed { body, .. } => body,
        }
    }

    /// Error description for failed deliveries, `None` on success.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    /// Whether the failure class is transient. Always false on success.
    pub fn retryable(&self) -> bool {
        match self {
            Self::Success { .. } => false,
            Self::Failed { retryable, .. } => *retryable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreted(status: u16) -> InterpretedResponse {
        InterpretedResponse {
            status,
            headers: HashMap::new(),
            body: ResponseBody::Text("ok".to_string()),
        }
    }

    #[test]
    fn success_accessors() {
        let outcome = Outcome::success(interpreted(202));
        assert!(outcome.is_success());
        assert_eq!(outcome.status(), 202);
        assert_eq!(outcome.error(), None);
        assert!(!outcome.retryable());
        assert_eq!(outcome.body().as_text(), Some("ok"));
    }

    #[test]
    fn failed_accessors() {
        let outcome =
            Outcome::failed(interpreted(503), "status 503 not accepted".to_string(), true);
        assert!(!outcome.is_success());
        assert_eq!(outcome.status(), 503);
        assert_eq!(outcome.error(), Some("status 503 not accepted"));
        assert!(outcome.retryable());
    }
}
