// src/error.rs
// =============================================================================
// Error types for the whole tool.
//
// There are two families:
// - TrailsError: startup and fatal failures. These end the process.
// - FetchError: per-page failures. The crawl logs them and moves on to the
//   next page number.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrailsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("user agent not found in curl command")]
    MissingUserAgent,

    #[error("cookie not found in curl command")]
    MissingCookie,

    #[error("either --domain, --list, or stdin must be provided")]
    NoTargetSource,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to write results: {0}")]
    Output(#[source] std::io::Error),
}

// A failure while fetching one listing page
//
// None of these abort the crawl. The controller logs them and the page
// counts as "no data".
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("could not build request: {0}")]
    Request(String),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("could not read response body: {0}")]
    Body(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TrailsError>;
