// src/enumerate/mod.rs
// =============================================================================
// This module walks the paginated subdomain listing for one apex domain.
//
// Submodules:
// - fetch: downloads one listing page with the session credential
// - extract: pulls subdomain labels out of a page body
// - controller: the page loop, its stop conditions and the pacing between
//   requests
//
// fetch and extract each sit behind a trait (PageFetcher, Extractor) so the
// controller can be driven by a scripted fetcher in tests, and so the anchor
// pattern can change without touching the loop.
// =============================================================================

mod controller;
mod extract;
mod fetch;

pub use controller::{CrawlOutcome, CrawlPolicy, Crawler, RunOutcome};
pub use extract::{AnchorExtractor, Extractor};
pub use fetch::{HttpFetcher, PageFetcher};
