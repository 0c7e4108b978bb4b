// src/config.rs
// =============================================================================
// Runtime settings, built once from the parsed CLI.
//
// Settings is immutable after startup and is passed explicitly to the parts
// that need it. Nothing reads configuration from global state.
// =============================================================================

use crate::cli::Cli;
use crate::credential::SessionCredential;
use crate::enumerate::CrawlPolicy;
use crate::error::{Result, TrailsError};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://securitytrails.com";
pub const DEFAULT_MAX_PAGES: u32 = 100;
pub const DEFAULT_DELAY_MS: u64 = 3400;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Settings {
    pub credential: SessionCredential,
    pub base_url: Url,
    pub policy: CrawlPolicy,
    pub request_timeout: Duration,
}

impl Settings {
    // Loads the credential from the capture file and validates the rest
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let credential = SessionCredential::load(&cli.cookie_file)?;
        let base_url = parse_base_url(&cli.base_url)?;

        Ok(Self {
            credential,
            base_url,
            policy: CrawlPolicy {
                max_pages: cli.max_pages,
                delay: Duration::from_millis(cli.delay_ms),
            },
            request_timeout: Duration::from_secs(cli.timeout),
        })
    }
}

// The base must be an http(s) URL we can append path segments to
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| TrailsError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be used as a base".to_string()));
    }

    Ok(url)
}
