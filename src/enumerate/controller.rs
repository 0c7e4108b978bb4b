// src/enumerate/controller.rs
// =============================================================================
// The page loop for one apex domain.
//
// How it works:
// 1. Fetch page 1, 2, 3, ... in order, never the same page twice
// 2. Run the extractor over each body and look at the matches:
//    - no matches at all       -> the session is dead, stop everything
//    - one match, the domain   -> the listing is empty, stop this domain
//    - anything else           -> print every match except the first
// 3. A failed fetch is logged and counts as an empty page; the loop moves on
// 4. Wait a fixed delay before every page after the first
// 5. Stop after max_pages
//
// Why is the first match dropped?
// - The listing always starts with a row for the queried domain itself.
//   It is not a discovered subdomain.
//
// Why does "no matches" mean an expired session?
// - Even an empty listing shows that header row. A page without a single
//   listing anchor is the sign-in wall. A genuinely empty, authenticated
//   page would look the same, and we can't tell the two apart.
// =============================================================================

use super::{Extractor, PageFetcher};
use crate::error::{Result, TrailsError};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, warn};

// Static pacing and bounds for one domain's crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlPolicy {
    /// Last page number that may be requested
    pub max_pages: u32,
    /// Pause between two consecutive page requests
    pub delay: Duration,
}

// How a domain's crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Every page up to max_pages was requested
    Exhausted { pages: u32 },
    /// The listing only showed the domain itself on this page
    NoData { page: u32 },
    /// This page had no listing anchors: the cookie no longer works
    SessionExpired { page: u32 },
}

// How a run over a list of domains ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every domain was crawled to a normal end
    Completed { domains: usize },
    /// The cookie stopped working on this domain and page
    SessionExpired { domain: String, page: u32 },
}

// What to do with one successfully fetched page
#[derive(Debug, PartialEq, Eq)]
enum PageVerdict<'a> {
    SessionExpired,
    NoData,
    Emit(&'a [String]),
}

fn judge_page<'a>(domain: &str, matches: &'a [String]) -> PageVerdict<'a> {
    match matches {
        [] => PageVerdict::SessionExpired,
        [only] if only == domain => PageVerdict::NoData,
        [_header, rest @ ..] => PageVerdict::Emit(rest),
    }
}

pub struct Crawler<'a, F, E> {
    fetcher: &'a F,
    extractor: &'a E,
    policy: CrawlPolicy,
}

impl<'a, F, E> Crawler<'a, F, E>
where
    F: PageFetcher,
    E: Extractor,
{
    pub fn new(fetcher: &'a F, extractor: &'a E, policy: CrawlPolicy) -> Self {
        Self {
            fetcher,
            extractor,
            policy,
        }
    }

    // Crawls one domain to completion, writing subdomains to `out`
    //
    // Each line is written as soon as its page is decided, so results show
    // up while later pages are still being fetched.
    //
    // Returns: how the crawl ended. Only a failed write to `out` is an error;
    // fetch failures are logged and skipped.
    pub async fn crawl<W: Write>(&self, domain: &str, out: &mut W) -> Result<CrawlOutcome> {
        info!(domain, "processing domain");

        for page in 1..=self.policy.max_pages {
            if page > 1 {
                tokio::time::sleep(self.policy.delay).await;
            }

            let body = match self.fetcher.fetch(domain, page).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(domain, page, error = %e, "error fetching page, skipping it");
                    continue;
                }
            };

            let matches = self.extractor.extract(&body);

            match judge_page(domain, &matches) {
                PageVerdict::SessionExpired => {
                    return Ok(CrawlOutcome::SessionExpired { page });
                }
                PageVerdict::NoData => {
                    debug!(domain, page, "no subdomain found in this page");
                    return Ok(CrawlOutcome::NoData { page });
                }
                PageVerdict::Emit(subdomains) => {
                    debug!(domain, page, found = subdomains.len(), "page processed");
                    for subdomain in subdomains {
                        writeln!(out, "{}", subdomain).map_err(TrailsError::Output)?;
                    }
                    out.flush().map_err(TrailsError::Output)?;
                }
            }
        }

        Ok(CrawlOutcome::Exhausted {
            pages: self.policy.max_pages,
        })
    }

    // Crawls each domain in order, one at a time
    //
    // An expired session stops the whole run: the remaining domains are
    // never requested.
    pub async fn crawl_targets<W: Write>(&self, domains: &[String], out: &mut W) -> Result<RunOutcome> {
        for domain in domains {
            match self.crawl(domain, out).await? {
                CrawlOutcome::SessionExpired { page } => {
                    return Ok(RunOutcome::SessionExpired {
                        domain: domain.clone(),
                        page,
                    });
                }
                CrawlOutcome::NoData { page } => {
                    debug!(domain = domain.as_str(), page, "listing ended");
                }
                CrawlOutcome::Exhausted { pages } => {
                    debug!(domain = domain.as_str(), pages, "reached the page limit");
                }
            }
        }

        Ok(RunOutcome::Completed {
            domains: domains.len(),
        })
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why slice patterns in judge_page?
//    - [] / [only] / [_header, rest @ ..] spell out the three cases exactly
//    - rest borrows from matches, nothing is copied before printing
//
// 2. Why is the sleep at the top of the loop?
//    - It runs before every page except the first, including the page after
//      a failed fetch
//    - Returning early (NoData, SessionExpired) or leaving the loop after the
//      last page never sleeps
//
// 3. Why generic over W: Write?
//    - main passes stdout, the tests pass a Vec<u8> and read it back
// -----------------------------------------------------------------------------
