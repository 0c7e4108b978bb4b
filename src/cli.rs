// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below is the whole CLI, and each field
// becomes a flag. clap generates --help for us from the doc comments.
//
// There is no automatic --version flag. --version is our own flag so the
// banner can be printed along with the version, see banner.rs.
// =============================================================================

use crate::config::{DEFAULT_BASE_URL, DEFAULT_DELAY_MS, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "apex-trails",
    about = "Enumerate subdomains of an apex domain from an authenticated listing page",
    long_about = "apex-trails walks the paginated subdomain listing of an apex domain using a \
                  logged-in browser session, and prints every subdomain it finds, one per line. \
                  Domains come from --domain, --list, or stdin (in that order)."
)]
pub struct Cli {
    /// Single domain to process
    #[arg(short = 'd', long)]
    pub domain: Option<String>,

    /// File containing list of domains, one per line
    #[arg(short = 'l', long)]
    pub list: Option<PathBuf>,

    /// File containing a curl command with the session cookie and user agent
    #[arg(short = 'c', long = "cookiefile", default_value = "cookie.txt")]
    pub cookie_file: PathBuf,

    /// Silent mode: don't print the banner
    #[arg(long)]
    pub silent: bool,

    /// Print the version of the tool and exit
    #[arg(long)]
    pub version: bool,

    /// Enable verbose output for debugging purposes
    #[arg(long)]
    pub verbose: bool,

    /// Maximum number of listing pages to fetch per domain
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: u32,

    /// Delay between two page requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Base URL of the listing site
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}
