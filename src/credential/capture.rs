// src/credential/capture.rs
// =============================================================================
// Parses a cURL command captured from the browser's network tab.
//
// Example capture:
//   curl 'https://securitytrails.com/list/apex_domain/example.com' \
//     -b 'SecurityTrails=abc123; _ga=GA1.1' \
//     -H 'user-agent: Mozilla/5.0 (Windows NT 10.0; Win64; x64) ...'
//
// Browsers disagree on how they emit the cookie, so we look for it in order:
//   1. -b '<cookie>'
//   2. --cookie '<cookie>'
//   3. -H 'cookie: <cookie>'
// =============================================================================

use crate::error::{Result, TrailsError};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

// These patterns are constants, so compiling them can only fail on a typo
static USER_AGENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-H '(?i:user-agent): ([^']*)'").expect("valid user agent pattern"));

static COOKIE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"-b '([^']*)'").expect("valid -b pattern"),
        Regex::new(r"--cookie '([^']*)'").expect("valid --cookie pattern"),
        Regex::new(r"-H '(?i:cookie): ([^']*)'").expect("valid cookie header pattern"),
    ]
});

// The identity string and session token sent with every listing request
//
// Both fields are guaranteed non-empty. There are no setters, so once a
// credential exists it stays the same for the whole run.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential {
    user_agent: String,
    cookie: String,
}

impl SessionCredential {
    /// Builds a credential, rejecting empty fields
    pub fn new(user_agent: impl Into<String>, cookie: impl Into<String>) -> Result<Self> {
        let user_agent = user_agent.into();
        let cookie = cookie.into();

        if user_agent.trim().is_empty() {
            return Err(TrailsError::MissingUserAgent);
        }
        if cookie.trim().is_empty() {
            return Err(TrailsError::MissingCookie);
        }

        Ok(Self { user_agent, cookie })
    }

    /// Extracts the user agent and cookie from the text of a cURL command
    pub fn from_capture(capture: &str) -> Result<Self> {
        let user_agent = USER_AGENT_PATTERN
            .captures(capture)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or_default();

        // First pattern that yields a non-empty value wins
        let cookie = COOKIE_PATTERNS
            .iter()
            .filter_map(|pattern| pattern.captures(capture))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|value| !value.is_empty())
            .unwrap_or_default();

        Self::new(user_agent, cookie)
    }

    /// Reads a capture file from disk and parses it
    pub fn load(path: &Path) -> Result<Self> {
        let capture = std::fs::read_to_string(path).map_err(|source| TrailsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_capture(&capture)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }
}

// The cookie is a live session token, keep it out of debug logs
impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredential")
            .field("user_agent", &self.user_agent)
            .field("cookie", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

    #[test]
    fn test_parse_b_flag_capture() {
        let capture = format!(
            "curl 'https://securitytrails.com/list/apex_domain/example.com' \\\n  -b 'session=abc; _ga=GA1' \\\n  -H 'user-agent: {}'",
            UA
        );
        let credential = SessionCredential::from_capture(&capture).unwrap();
        assert_eq!(credential.user_agent(), UA);
        assert_eq!(credential.cookie(), "session=abc; _ga=GA1");
    }

    #[test]
    fn test_parse_long_cookie_flag() {
        let capture = format!("curl 'https://x' --cookie 'sid=42' -H 'User-Agent: {}'", UA);
        let credential = SessionCredential::from_capture(&capture).unwrap();
        assert_eq!(credential.cookie(), "sid=42");
        assert_eq!(credential.user_agent(), UA);
    }

    #[test]
    fn test_parse_cookie_header() {
        let capture = format!("curl 'https://x' -H 'cookie: sid=7' -H 'user-agent: {}'", UA);
        let credential = SessionCredential::from_capture(&capture).unwrap();
        assert_eq!(credential.cookie(), "sid=7");
    }

    #[test]
    fn test_b_flag_wins_over_cookie_header() {
        let capture = format!("curl 'https://x' -H 'cookie: old=1' -b 'new=2' -H 'user-agent: {}'", UA);
        let credential = SessionCredential::from_capture(&capture).unwrap();
        assert_eq!(credential.cookie(), "new=2");
    }

    #[test]
    fn test_missing_user_agent() {
        let result = SessionCredential::from_capture("curl 'https://x' -b 'sid=1'");
        assert!(matches!(result, Err(TrailsError::MissingUserAgent)));
    }

    #[test]
    fn test_missing_cookie() {
        let capture = format!("curl 'https://x' -H 'user-agent: {}'", UA);
        let result = SessionCredential::from_capture(&capture);
        assert!(matches!(result, Err(TrailsError::MissingCookie)));
    }

    #[test]
    fn test_empty_cookie_is_missing() {
        let capture = format!("curl 'https://x' -b '' -H 'user-agent: {}'", UA);
        let result = SessionCredential::from_capture(&capture);
        assert!(matches!(result, Err(TrailsError::MissingCookie)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "curl 'https://x' -b 'sid=9' -H 'user-agent: {}'", UA).unwrap();

        let credential = SessionCredential::load(file.path()).unwrap();
        assert_eq!(credential.cookie(), "sid=9");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SessionCredential::load(&dir.path().join("cookie.txt"));
        assert!(matches!(result, Err(TrailsError::Io { .. })));
    }

    #[test]
    fn test_debug_redacts_cookie() {
        let credential = SessionCredential::new(UA, "secret-token").unwrap();
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}
