//! Outbound request header composition.
//!
//! Builds the header set for a delivery: fixed protocol headers, normalized
//! bearer authorization, and caller overrides layered on top. Header names
//! are kept as written; the transport normalizes case on the wire
//! independently.

use std::collections::HashMap;

/// Media type of the signed security event token carried in the body.
pub const CONTENT_TYPE_SECEVENT: &str = "application/secevent+jwt";

/// Media type requested for structured responses.
pub const ACCEPT_JSON: &str = "application/json";

/// Default identifying user-agent string.
pub const USER_AGENT: &str = concat!("secevent-push/", env!("CARGO_PKG_VERSION"));

const BEARER_PREFIX: &str = "Bearer ";

/// Normalizes a credential into a bearer authorization value.
///
/// Prepends `"Bearer "` unless the credential already starts with that
/// literal prefix, making the operation idempotent. `None` stays `None` and
/// the header is omitted entirely.
pub fn normalize_auth(credential: Option<&str>) -> Option<String> {
    credential.map(|value| {
        if value.starts_with(BEARER_PREFIX) {
            value.to_string()
        } else {
            format!("{BEARER_PREFIX}{value}")
        }
    })
}

/// Composes the outbound header set for one delivery.
///
/// Merge order: fixed base headers, then authorization (when a credential is
/// supplied), then caller overrides. Caller values win on exact-name
/// collision.
pub fn compose(
    credential: Option<&str>,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut headers = HashMap::from([
        ("Content-Type".to_string(), CONTENT_TYPE_SECEVENT.to_string()),
        ("Accept".to_string(), ACCEPT_JSON.to_string()),
        ("User-Agent".to_string(), USER_AGENT.to_string()),
    ]);

    if let Some(authorization) = normalize_auth(credential) {
        headers.insert("Authorization".to_string(), authorization);
    }

    for (name, value) in overrides {
        headers.insert(name.clone(), value.clone());
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_credential_gains_bearer_prefix() {
        assert_eq!(normalize_auth(Some("tok")), Some("Bearer tok".to_string()));
    }

    #[test]
    fn prefixed_credential_passes_through() {
        assert_eq!(normalize_auth(Some("Bearer tok")), Some("Bearer tok".to_string()));
        // idempotent under re-application
        let once = normalize_auth(Some("tok")).unwrap();
        assert_eq!(normalize_auth(Some(&once)), Some(once.clone()));
    }

    #[test]
    fn missing_credential_yields_none() {
        assert_eq!(normalize_auth(None), None);
    }

    #[test]
    fn base_headers_present_without_credential() {
        let headers = compose(None, &HashMap::new());
        assert_eq!(headers.get("Content-Type").unwrap(), CONTENT_TYPE_SECEVENT);
        assert_eq!(headers.get("Accept").unwrap(), ACCEPT_JSON);
        assert_eq!(headers.get("User-Agent").unwrap(), USER_AGENT);
        assert!(!headers.contains_key("Authorization"));
    }

    #[test]
    fn credential_produces_authorization_header() {
        let headers = compose(Some("secret"), &HashMap::new());
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer secret");
    }

    #[test]
    fn caller_overrides_win_on_collision() {
        let overrides = HashMap::from([
            ("User-Agent".to_string(), "custom-agent/2.0".to_string()),
            ("X-Correlation-Id".to_string(), "abc-123".to_string()),
        ]);
        let headers = compose(Some("secret"), &overrides);
        assert_eq!(headers.get("User-Agent").unwrap(), "custom-agent/2.0");
        assert_eq!(headers.get("X-Correlation-Id").unwrap(), "abc-123");
        // non-colliding base headers survive
        assert_eq!(headers.get("Content-Type").unwrap(), CONTENT_TYPE_SECEVENT);
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer secret");
    }

    #[test]
    fn override_can_replace_authorization() {
        let overrides =
            HashMap::from([("Authorization".to_string(), "Basic dXNlcg==".to_string())]);
        let headers = compose(Some("ignored"), &overrides);
        assert_eq!(headers.get("Authorization").unwrap(), "Basic dXNlcg==");
    }
}
