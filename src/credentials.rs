//! Injected request credentials
//!
//! The harvester carries no compiled-in secrets: the session cookie and
//! client identity string come from a `CredentialProvider` supplied by the
//! caller, so the core can be tested with a fake provider.

use anyhow::{Context, Result};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};

/// Client identity string used when the caller does not supply one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Supplies the headers attached to every outbound request.
///
/// Values are opaque to the harvester; it never inspects or renews them.
/// Session renewal is out of scope.
pub trait CredentialProvider: Send + Sync {
    /// Called once per outbound request.
    fn headers(&self) -> HeaderMap;
}

/// Fixed cookie/user-agent pair, validated once at construction.
pub struct StaticCredentials {
    headers: HeaderMap,
}

impl StaticCredentials {
    /// Builds the header map up front so `headers()` cannot fail later.
    pub fn new(cookie: &str, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(cookie).context("invalid cookie header value")?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("invalid user-agent header value")?,
        );
        Ok(Self { headers })
    }
}

impl CredentialProvider for StaticCredentials {
    fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_credentials_build_both_headers() {
        let creds = StaticCredentials::new("SESSION=abc123", DEFAULT_USER_AGENT).unwrap();
        let headers = creds.headers();
        assert_eq!(headers.get(COOKIE).unwrap(), "SESSION=abc123");
        assert_eq!(headers.get(USER_AGENT).unwrap(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn control_characters_in_cookie_are_rejected() {
        assert!(StaticCredentials::new("bad\nvalue", DEFAULT_USER_AGENT).is_err());
    }
}
