//! Retry policy and exponential backoff with jitter.
//!
//! Two pure decision functions drive the transmission loop: [`should_retry`]
//! decides whether another attempt is permitted, and [`backoff_delay`]
//! computes the wait before it. Server-supplied `retry-after` hints bypass
//! jitter entirely; computed delays are randomized to spread load across
//! retrying senders.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Retry configuration for one delivery call.
///
/// Controls how many attempts are made, which HTTP statuses count as
/// transient, and how the wait between attempts grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of delivery attempts (including the initial attempt).
    pub max_attempts: u32,

    /// HTTP status codes considered transient and worth retrying.
    pub retryable_statuses: Vec<u16>,

    /// Base delay for exponential backoff calculation.
    pub base_backoff: Duration,

    /// Maximum delay between attempts.
    pub max_backoff: Duration,

    /// Growth multiplier applied per attempt.
    pub backoff_multiplier: f64,

    /// Jitter percentage (0.0 to 1.0) applied to computed delays.
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: crate::DEFAULT_MAX_ATTEMPTS,
            retryable_statuses: crate::DEFAULT_RETRYABLE_STATUSES.to_vec(),
            base_backoff: crate::DEFAULT_BASE_BACKOFF,
            max_backoff: crate::DEFAULT_MAX_BACKOFF,
            backoff_multiplier: crate::DEFAULT_BACKOFF_MULTIPLIER,
            jitter_factor: crate::DEFAULT_JITTER_FACTOR,
        }
    }
}

impl RetryConfig {
    /// Whether a status code belongs to the configured transient set.
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }
}

/// Decides whether another delivery attempt is permitted.
///
/// `attempt` is the 1-based number of the attempt that just completed. Once
/// it reaches `max_attempts` no retry is permitted regardless of the
/// failure. An absent status means the attempt failed at the transport
/// level (timeout or connection error) and is always retryable under the
/// cap; a present status is retryable only when it belongs to the
/// configured transient set.
pub fn should_retry(status: Option<u16>, attempt: u32, config: &RetryConfig) -> bool {
    if attempt >= config.max_attempts {
        return false;
    }
    match status {
        None => true,
        Some(code) => config.is_retryable_status(code),
    }
}

/// Computes the wait before the next attempt.
///
/// A positive server hint is honored verbatim, capped at `max_backoff`, with
/// no jitter. Otherwise the delay is `base * multiplier^(attempt-1)` clamped
/// to `max_backoff`, with symmetric jitter applied and the result floored to
/// whole milliseconds. A zero base yields a zero wait for every attempt.
pub fn backoff_delay(
    attempt: u32,
    config: &RetryConfig,
    retry_after: Option<Duration>,
) -> Duration {
    backoff_delay_with(attempt, config, retry_after, &mut rand::rng())
}

/// [`backoff_delay`] with an explicit randomness source.
///
/// Deterministic tests supply a seeded generator; production callers go
/// through [`backoff_delay`].
pub fn backoff_delay_with<R: Rng>(
    attempt: u32,
    config: &RetryConfig,
    retry_after: Option<Duration>,
    rng: &mut R,
) -> Duration {
    if let Some(hint) = retry_after.filter(|hint| !hint.is_zero()) {
        return hint.min(config.max_backoff);
    }

    // Saturate the exponent so large attempt numbers cannot blow up the
    // multiplication before the clamp.
    let exponent = attempt.saturating_sub(1).min(32);
    let scaled = config.base_backoff.as_secs_f64() * config.backoff_multiplier.powi(exponent as i32);
    let capped = scaled.min(config.max_backoff.as_secs_f64());
    let jittered = apply_jitter(capped, config.jitter_factor, rng);

    Duration::from_millis((jittered * 1_000.0).floor() as u64)
}

/// Randomizes a delay by ±`jitter_factor` to avoid thundering-herd retries.
fn apply_jitter<R: Rng>(seconds: f64, jitter_factor: f64, rng: &mut R) -> f64 {
    if seconds <= 0.0 || jitter_factor <= 0.0 {
        return seconds.max(0.0);
    }

    let range = seconds * jitter_factor.clamp(0.0, 1.0);
    let offset = rng.random_range(-range..=range);
    (seconds + offset).max(0.0)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn test_config() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_backoff: Duration::from_millis(1_000),
            max_backoff: Duration::from_millis(10_000),
            backoff_multiplier: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn retryable_status_within_attempt_cap() {
        let config = test_config();
        assert!(should_retry(Some(503), 1, &config));
        assert!(should_retry(Some(503), 2, &config));
        assert!(!should_retry(Some(503), 3, &config));
        assert!(!should_retry(Some(503), 4, &config));
    }

    #[test]
    fn transport_failure_always_retryable_under_cap() {
        let config = test_config();
        assert!(should_retry(None, 1, &config));
        assert!(should_retry(None, 2, &config));
        assert!(!should_retry(None, 3, &config));
    }

    #[test]
    fn non_transient_status_never_retried() {
        let config = test_config();
        assert!(!should_retry(Some(404), 1, &config));
        assert!(!should_retry(Some(401), 1, &config));
        assert!(!should_retry(Some(500), 2, &config));
    }

    #[test]
    fn exponential_delay_stays_within_jitter_band() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(7);

        for attempt in 1..=6 {
            let expected = (1_000.0 * 2.0_f64.powi(attempt as i32 - 1)).min(10_000.0);
            for _ in 0..50 {
                let delay = backoff_delay_with(attempt, &config, None, &mut rng);
                let millis = delay.as_millis() as f64;
                assert!(
                    millis >= (expected * 0.75).floor() && millis <= expected * 1.25,
                    "attempt {attempt}: {millis}ms outside [{}, {}]",
                    expected * 0.75,
                    expected * 1.25
                );
            }
        }
    }

    #[test]
    fn jitter_varies_delay() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..20 {
            seen.insert(backoff_delay_with(1, &config, None, &mut rng).as_millis());
        }
        assert!(seen.len() > 1, "jitter should create variation");
    }

    #[test]
    fn server_hint_honored_verbatim() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(1);

        let delay =
            backoff_delay_with(1, &config, Some(Duration::from_millis(5_000)), &mut rng);
        assert_eq!(delay, Duration::from_millis(5_000));
    }

    #[test]
    fn server_hint_capped_at_max_backoff() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(1);

        let delay =
            backoff_delay_with(1, &config, Some(Duration::from_millis(20_000)), &mut rng);
        assert_eq!(delay, Duration::from_millis(10_000));
    }

    #[test]
    fn zero_hint_falls_back_to_exponential() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(1);

        let delay = backoff_delay_with(1, &config, Some(Duration::ZERO), &mut rng);
        assert!(delay >= Duration::from_millis(750));
    }

    #[test]
    fn zero_base_yields_zero_wait() {
        let config = RetryConfig { base_backoff: Duration::ZERO, ..test_config() };
        let mut rng = StdRng::seed_from_u64(1);

        for attempt in 1..=5 {
            assert_eq!(backoff_delay_with(attempt, &config, None, &mut rng), Duration::ZERO);
        }
    }

    #[test]
    fn large_attempt_numbers_do_not_overflow() {
        let config = test_config();
        let mut rng = StdRng::seed_from_u64(1);

        let delay = backoff_delay_with(u32::MAX, &config, None, &mut rng);
        assert!(delay <= Duration::from_millis(12_500));
    }
}
