//! Push-based delivery of signed security event tokens.
//!
//! This crate implements the transmission side of push-mode event delivery:
//! it POSTs a compact three-segment signed token (`application/secevent+jwt`)
//! to a receiver endpoint and turns a sequence of fallible network attempts
//! into one deterministic outcome, with timeout-bounded dispatch, response
//! classification, and exponential backoff between retries.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌─────────────────────────────┐
//! │ Validator │──▶│ Header       │──▶│ Transmission loop           │
//! │           │   │ Composer     │   │ dispatch → interpret →      │
//! └───────────┘   └──────────────┘   │ retry policy → backoff      │
//!                                    └─────────────────────────────┘
//! ```
//!
//! Failures travel on two channels: every obtained HTTP response — accepted
//! or not — is an [`Outcome`]; calls that never got a response (malformed
//! input, transport exhaustion) raise a [`TransmitError`] instead.
//!
//! # Example
//!
//! ```no_run
//! use secevent_push::{transmit, TransmitOptions};
//!
//! # async fn example() -> Result<(), secevent_push::TransmitError> {
//! let options = TransmitOptions {
//!     auth_token: Some("credential".to_string()),
//!     ..Default::default()
//! };
//!
//! let outcome = transmit(
//!     "eyJhbGciOiJIUzI1NiJ9.eyJpc3MiOiJleGFtcGxlIn0.c2ln",
//!     "https://receiver.example.com/events",
//!     options,
//! )
//! .await?;
//!
//! println!("delivered: {} ({})", outcome.is_success(), outcome.status());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::time::Duration;

pub mod config;
pub mod error;
pub mod headers;
pub mod outcome;
pub mod response;
pub mod retry;
pub mod transmitter;
pub mod validate;

pub use config::{RetryOptions, StatusPredicate, TransmitConfig, TransmitOptions};
pub use error::{Result, TransmitError};
pub use outcome::Outcome;
pub use response::{InterpretedResponse, ResponseBody};
pub use retry::RetryConfig;
pub use transmitter::{transmit, Transmitter};

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum attempt count (including the initial attempt).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Status codes treated as transient by default.
pub const DEFAULT_RETRYABLE_STATUSES: [u16; 4] = [429, 502, 503, 504];

/// Default base backoff delay.
pub const DEFAULT_BASE_BACKOFF: Duration = Duration::from_secs(1);

/// Default maximum backoff delay.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Default backoff growth multiplier.
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;

/// Default jitter percentage applied to computed backoff delays.
pub const DEFAULT_JITTER_FACTOR: f64 = 0.25;
