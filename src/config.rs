//! Caller options and resolved per-call configuration.
//!
//! [`TransmitOptions`] is the caller-facing options object: every field is
//! optional or mergeable, so a reusable default set can be layered under
//! call-time overrides. [`TransmitConfig`] is the resolved result — built
//! once per call, immutable afterwards.

use std::{collections::HashMap, fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// Predicate deciding whether a status code counts as an accepted delivery.
pub type StatusPredicate = Arc<dyn Fn(u16) -> bool + Send + Sync>;

/// Caller-supplied options for a transmission.
///
/// All fields are optional; unset fields fall back to the layer below
/// (a reusable default set, then the crate defaults). Use struct-update
/// syntax to set just what differs:
///
/// ```
/// use std::time::Duration;
/// use secevent_push::TransmitOptions;
///
/// let options = TransmitOptions {
///     auth_token: Some("credential".to_string()),
///     timeout: Some(Duration::from_secs(5)),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Default)]
pub struct TransmitOptions {
    /// Authorization credential, normalized to a bearer value when set.
    pub auth_token: Option<String>,
    /// Header overrides layered over the fixed base headers.
    pub headers: HashMap<String, String>,
    /// Per-attempt timeout.
    pub timeout: Option<Duration>,
    /// Retry configuration overrides, merged field-by-field.
    pub retry: RetryOptions,
    /// Whether to parse JSON response bodies.
    pub parse_response: Option<bool>,
    /// Status-acceptance predicate (default: status < 400).
    pub validate_status: Option<StatusPredicate>,
}

impl TransmitOptions {
    /// Layers these options over a base set.
    ///
    /// Scalar fields keep the call-time value when present; `headers` and
    /// `retry` merge key-by-key and field-by-field rather than replacing
    /// the base wholesale.
    pub fn layered_over(self, base: &TransmitOptions) -> TransmitOptions {
        let mut headers = base.headers.clone();
        headers.extend(self.headers);

        TransmitOptions {
            auth_token: self.auth_token.or_else(|| base.auth_token.clone()),
            headers,
            timeout: self.timeout.or(base.timeout),
            retry: self.retry.layered_over(&base.retry),
            parse_response: self.parse_response.or(base.parse_response),
            validate_status: self.validate_status.or_else(|| base.validate_status.clone()),
        }
    }

    /// Resolves these options into a complete per-call configuration.
    pub fn resolve(&self) -> TransmitConfig {
        TransmitConfig {
            auth_token: self.auth_token.clone(),
            headers: self.headers.clone(),
            timeout: self.timeout.unwrap_or(crate::DEFAULT_TIMEOUT),
            retry: self.retry.resolve(),
            parse_response: self.parse_response.unwrap_or(true),
            validate_status: self
                .validate_status
                .clone()
                .unwrap_or_else(default_status_predicate),
        }
    }
}

impl fmt::Debug for TransmitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransmitOptions")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("parse_response", &self.parse_response)
            .field("validate_status", &self.validate_status.is_some())
            .finish()
    }
}

/// Retry overrides, an all-optional mirror of [`RetryConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetryOptions {
    /// Maximum attempt count (including the initial attempt).
    pub max_attempts: Option<u32>,
    /// HTTP status codes considered transient.
    pub retryable_statuses: Option<Vec<u16>>,
    /// Base backoff delay.
    pub base_backoff: Option<Duration>,
    /// Maximum backoff delay.
    pub max_backoff: Option<Duration>,
    /// Backoff growth multiplier.
    pub backoff_multiplier: Option<f64>,
    /// Jitter percentage applied to computed delays.
    pub jitter_factor: Option<f64>,
}

impl RetryOptions {
    /// Merges these overrides over a base set, field by field.
    pub fn layered_over(self, base: &RetryOptions) -> RetryOptions {
        RetryOptions {
            max_attempts: self.max_attempts.or(base.max_attempts),
            retryable_statuses: self
                .retryable_statuses
                .or_else(|| base.retryable_statuses.clone()),
            base_backoff: self.base_backoff.or(base.base_backoff),
            max_backoff: self.max_backoff.or(base.max_backoff),
            backoff_multiplier: self.backoff_multiplier.or(base.backoff_multiplier),
            jitter_factor: self.jitter_factor.or(base.jitter_factor),
        }
    }

    /// Resolves the overrides into a complete retry configuration.
    ///
    /// Enforces the config invariants: the attempt count is at least 1 and
    /// the maximum backoff is never below the base backoff.
    pub fn resolve(&self) -> RetryConfig {
        let defaults = RetryConfig::default();
        let base_backoff = self.base_backoff.unwrap_or(defaults.base_backoff);

        RetryConfig {
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts).max(1),
            retryable_statuses: self
                .retryable_statuses
                .clone()
                .unwrap_or(defaults.retryable_statuses),
            base_backoff,
            max_backoff: self.max_backoff.unwrap_or(defaults.max_backoff).max(base_backoff),
            backoff_multiplier: self.backoff_multiplier.unwrap_or(defaults.backoff_multiplier),
            jitter_factor: self.jitter_factor.unwrap_or(defaults.jitter_factor),
        }
    }
}

/// Resolved configuration for one transmission call.
///
/// Built once by [`TransmitOptions::resolve`] and never mutated afterwards.
#[derive(Clone)]
pub struct TransmitConfig {
    /// Authorization credential, if any.
    pub auth_token: Option<String>,
    /// Header overrides layered over the fixed base headers.
    pub headers: HashMap<String, String>,
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Resolved retry configuration.
    pub retry: RetryConfig,
    /// Whether to parse JSON response bodies.
    pub parse_response: bool,
    /// Status-acceptance predicate.
    pub validate_status: StatusPredicate,
}

impl fmt::Debug for TransmitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransmitConfig")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("parse_response", &self.parse_response)
            .finish()
    }
}

fn default_status_predicate() -> StatusPredicate {
    Arc::new(|status| status < 400)
}
