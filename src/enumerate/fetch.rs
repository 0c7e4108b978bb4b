// src/enumerate/fetch.rs
// =============================================================================
// Fetches one page of the subdomain listing.
//
// URL template:
//   <base>/list/apex_domain/<domain>?page=<n>
//
// The listing site only serves real results to something that looks like the
// browser the session was captured from, so every request carries a fixed
// Chrome-on-Windows header set plus the captured user agent and cookie.
//
// The status code is not checked. An expired session still answers with a
// page, and that page has no listing anchors; the controller turns that into
// SessionExpired.
// =============================================================================

use crate::config::Settings;
use crate::credential::SessionCredential;
use crate::error::{FetchError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, USER_AGENT};
use reqwest::Client;
use std::future::Future;
use tracing::debug;
use url::Url;

// Header set of desktop Chrome 141 on Windows, navigating to a page
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("accept-language", "en-US,en;q=0.9,hi;q=0.8,en-IN;q=0.7"),
    ("dnt", "1"),
    ("priority", "u=0, i"),
    ("sec-ch-ua", r#""Google Chrome";v="141", "Not?A_Brand";v="8", "Chromium";v="141""#),
    ("sec-ch-ua-arch", r#""x86""#),
    ("sec-ch-ua-bitness", r#""64""#),
    ("sec-ch-ua-full-version", r#""141.0.7390.108""#),
    (
        "sec-ch-ua-full-version-list",
        r#""Google Chrome";v="141.0.7390.108", "Not?A_Brand";v="8.0.0.0", "Chromium";v="141.0.7390.108""#,
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-model", r#""""#),
    ("sec-ch-ua-platform", r#""Windows""#),
    ("sec-ch-ua-platform-version", r#""19.0.0""#),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
];

// Fetches the raw body of one listing page
pub trait PageFetcher {
    fn fetch(&self, domain: &str, page: u32) -> impl Future<Output = std::result::Result<Vec<u8>, FetchError>>;
}

// The real fetcher, backed by one shared reqwest client
//
// The client keeps its connection pool between requests, so all pages of a
// run reuse the same connection to the listing host.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    credential: SessionCredential,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            credential: settings.credential.clone(),
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, domain: &str, page: u32) -> std::result::Result<Vec<u8>, FetchError> {
        let url = listing_url(&self.base_url, domain, page)?;
        let headers = browser_headers(&self.credential)?;

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        debug!(domain, page, status = %response.status(), "listing page received");

        let body = response.bytes().await.map_err(FetchError::Body)?;
        Ok(body.to_vec())
    }
}

// Builds <base>/list/apex_domain/<domain>?page=<n>
//
// The domain goes in as a single path segment, so anything odd in it gets
// percent-encoded instead of changing the path.
fn listing_url(base: &Url, domain: &str, page: u32) -> std::result::Result<Url, FetchError> {
    let mut url = base.clone();

    url.path_segments_mut()
        .map_err(|_| FetchError::Request(format!("base URL {} cannot take a path", base)))?
        .pop_if_empty()
        .extend(["list", "apex_domain", domain]);
    url.set_query(Some(&format!("page={}", page)));

    Ok(url)
}

fn browser_headers(credential: &SessionCredential) -> std::result::Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len() + 2);

    for &(name, value) in BROWSER_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    let cookie = HeaderValue::from_str(credential.cookie())
        .map_err(|e| FetchError::Request(format!("cookie is not a valid header value: {}", e)))?;
    let user_agent = HeaderValue::from_str(credential.user_agent())
        .map_err(|e| FetchError::Request(format!("user agent is not a valid header value: {}", e)))?;

    headers.insert(COOKIE, cookie);
    headers.insert(USER_AGENT, user_agent);

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::CrawlPolicy;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn settings(base_url: &str, cookie: &str) -> Settings {
        Settings {
            credential: SessionCredential::new("Mozilla/5.0 test-agent", cookie).unwrap(),
            base_url: Url::parse(base_url).unwrap(),
            policy: CrawlPolicy {
                max_pages: 1,
                delay: Duration::ZERO,
            },
            request_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_listing_url() {
        let base = Url::parse("https://securitytrails.com").unwrap();
        let url = listing_url(&base, "example.com", 3).unwrap();
        assert_eq!(url.as_str(), "https://securitytrails.com/list/apex_domain/example.com?page=3");
    }

    #[test]
    fn test_listing_url_keeps_base_path() {
        let base = Url::parse("http://127.0.0.1:8080/proxy/").unwrap();
        let url = listing_url(&base, "example.com", 1).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/proxy/list/apex_domain/example.com?page=1");
    }

    #[test]
    fn test_listing_url_encodes_domain() {
        let base = Url::parse("https://securitytrails.com").unwrap();
        let url = listing_url(&base, "a/b", 1).unwrap();
        assert_eq!(url.path(), "/list/apex_domain/a%2Fb");
    }

    #[test]
    fn test_browser_headers() {
        let credential = SessionCredential::new("agent/1.0", "sid=1").unwrap();
        let headers = browser_headers(&credential).unwrap();
        assert_eq!(headers.get(COOKIE).unwrap(), "sid=1");
        assert_eq!(headers.get(USER_AGENT).unwrap(), "agent/1.0");
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "navigate");
        assert_eq!(headers.len(), BROWSER_HEADERS.len() + 2);
    }

    #[test]
    fn test_bad_cookie_is_request_error() {
        let credential = SessionCredential::new("agent/1.0", "sid=1\nInjected: yes").unwrap();
        let result = browser_headers(&credential);
        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn test_fetch_sends_session_and_returns_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/list/apex_domain/example.com")
                    .query_param("page", "2")
                    .header("cookie", "sid=abc")
                    .header("user-agent", "Mozilla/5.0 test-agent")
                    .header("sec-fetch-dest", "document");
                then.status(200).body(r#"<a href="/domain/example.com/dns">"#);
            })
            .await;

        let fetcher = HttpFetcher::new(&settings(&server.base_url(), "sid=abc")).unwrap();
        let body = fetcher.fetch("example.com", 2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, br#"<a href="/domain/example.com/dns">"#.to_vec());
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/list/apex_domain/example.com");
                then.status(403).body("<html>Sign in</html>");
            })
            .await;

        let fetcher = HttpFetcher::new(&settings(&server.base_url(), "sid=abc")).unwrap();
        let body = fetcher.fetch("example.com", 1).await.unwrap();
        assert_eq!(body, b"<html>Sign in</html>".to_vec());
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        // Nothing listens on port 1
        let fetcher = HttpFetcher::new(&settings("http://127.0.0.1:1", "sid=abc")).unwrap();
        let result = fetcher.fetch("example.com", 1).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
