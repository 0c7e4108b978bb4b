// src/enumerate/extract.rs
// =============================================================================
// Pulls subdomain labels out of a listing page.
//
// Each listed subdomain links to its DNS page:
//   <a href="/domain/api.example.com/dns">api.example.com</a>
//
// We match that href with a regex instead of parsing the DOM. The listing
// markup is machine-generated and the anchor form is stable, and a regex
// over raw bytes never fails on a malformed or non-UTF-8 page.
// =============================================================================

use regex::bytes::Regex;

pub const DNS_ANCHOR_PATTERN: &str = r#"href="/domain/([^/]+)/dns">"#;

// Something that turns a response body into an ordered list of labels
pub trait Extractor {
    fn extract(&self, body: &[u8]) -> Vec<String>;
}

#[derive(Debug, Clone)]
pub struct AnchorExtractor {
    pattern: Regex,
}

impl AnchorExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(DNS_ANCHOR_PATTERN).expect("DNS anchor pattern is valid"),
        }
    }
}

impl Default for AnchorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for AnchorExtractor {
    // Returns every capture in document order
    //
    // No deduplication here: the controller relies on seeing the header row
    // (the queried domain itself) as the first entry.
    fn extract(&self, body: &[u8]) -> Vec<String> {
        self.pattern
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
            .collect()
    }
}
