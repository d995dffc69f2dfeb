//! Pre-flight validation of the token and destination.
//!
//! Structural checks only: the token must look like a compact three-segment
//! signed message and the destination must be an absolute URL. No signature
//! or claims verification happens here, and no network activity occurs.

use url::Url;

use crate::error::{Result, TransmitError};

/// Checks that a token is a well-formed three-segment signed message.
///
/// Accepts exactly three non-empty dot-separated segments, each drawn from
/// the URL-safe base64 alphabet (letters, digits, `-`, `_`). Any well-formed
/// triple passes, whether or not it is cryptographically meaningful.
///
/// # Errors
///
/// Returns `TransmitError::InvalidToken` describing the first structural
/// problem found.
pub fn validate_token(token: &str) -> Result<()> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TransmitError::invalid_token(format!(
            "expected 3 dot-separated segments, found {}",
            segments.len()
        )));
    }

    for (index, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return Err(TransmitError::invalid_token(format!("segment {} is empty", index + 1)));
        }
        if !segment.bytes().all(is_base64url_byte) {
            return Err(TransmitError::invalid_token(format!(
                "segment {} contains characters outside the URL-safe base64 alphabet",
                index + 1
            )));
        }
    }

    Ok(())
}

/// Checks that a destination string parses as an absolute URL.
///
/// # Errors
///
/// Returns `TransmitError::InvalidDestination` when parsing fails (relative
/// URLs fail to parse and are rejected).
pub fn validate_destination(destination: &str) -> Result<Url> {
    Url::parse(destination)
        .map_err(|e| TransmitError::invalid_destination(format!("{destination:?}: {e}")))
}

fn is_base64url_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}
