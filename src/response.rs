//! Response interpretation and content negotiation.
//!
//! Converts a raw HTTP response into a normalized header map and a body,
//! parsing JSON only when the caller asked for it and the destination
//! declared it. Also extracts the `retry-after` hint honored by the backoff
//! calculator.

use std::{collections::HashMap, time::Duration};

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use tracing::warn;

/// Body of an interpreted response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Structured body parsed from a JSON response.
    Json(serde_json::Value),
    /// Raw body text (parsing disabled, non-JSON content, or parse failure).
    Text(String),
}

impl ResponseBody {
    /// Returns the parsed JSON value, when the body was structured.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the raw text, when the body was left unparsed.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Whether the body carried no content at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

/// A response reduced to the parts the transmission loop cares about.
#[derive(Debug, Clone)]
pub struct InterpretedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers with lower-cased names, values verbatim.
    pub headers: HashMap<String, String>,
    /// Response body after content negotiation.
    pub body: ResponseBody,
}

impl InterpretedResponse {
    /// Reads and interprets a raw response.
    ///
    /// The body is always read fully as text first; JSON parsing happens
    /// only when `parse_body` is set, the text is non-empty, and the
    /// `content-type` header contains `application/json`. A parse failure
    /// falls back to the raw text and never errors.
    pub async fn from_response(response: reqwest::Response, parse_body: bool) -> Self {
        let status = response.status().as_u16();
        let headers = normalize_headers(response.headers());

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(status, "failed to read response body: {e}");
                String::new()
            },
        };

        let body = interpret_body(text, parse_body, headers.get("content-type"));
        Self { status, headers, body }
    }

    /// Extracts the server-supplied retry hint from this response.
    pub fn retry_after(&self) -> Option<Duration> {
        retry_after_hint(&self.headers)
    }
}

/// Lower-cases header names; values are taken verbatim.
///
/// Repeated headers collapse last-wins, matching the transport's view of
/// the final value.
pub fn normalize_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    for (name, value) in header_map {
        if let Ok(value) = value.to_str() {
            headers.insert(name.as_str().to_lowercase(), value.to_string());
        }
    }
    headers
}

/// Parses the `retry-after` header into a wait duration.
///
/// Supports both formats of the header: an integer count of seconds, or an
/// HTTP-date converted to the delay between now and that instant. A date in
/// the past yields no hint, as does any unparseable value.
pub fn retry_after_hint(headers: &HashMap<String, String>) -> Option<Duration> {
    let value = headers.get("retry-after")?.trim();

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date = DateTime::parse_from_rfc2822(value).ok()?;
    date.with_timezone(&Utc).signed_duration_since(Utc::now()).to_std().ok()
}

fn interpret_body(text: String, parse: bool, content_type: Option<&String>) -> ResponseBody {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    if !parse || text.is_empty() || !is_json {
        return ResponseBody::Text(text);
    }

    match serde_json::from_str(&text) {
        Ok(value) => ResponseBody::Json(value),
        Err(_) => ResponseBody::Text(text),
    }
}
