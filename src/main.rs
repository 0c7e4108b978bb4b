// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Print the banner (or banner + version and stop)
// 3. Load the session credential and the rest of the settings
// 4. Work out where the domains come from and read them
// 5. Crawl each domain in turn, printing subdomains to stdout
// 6. Exit with proper code (0 = done, 1 = fatal error, 2 = usage error)
//
// Everything runs on a single-threaded runtime: one domain at a time, one
// page at a time.
// =============================================================================

mod banner;
mod cli;
mod config;
mod credential;
mod enumerate;
mod error;
mod logging;
mod targets;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use config::Settings;
use enumerate::{AnchorExtractor, Crawler, HttpFetcher, RunOutcome};
use error::TrailsError;
use std::io::{IsTerminal, Write};
use targets::TargetSource;
use tracing::{debug, error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every domain was crawled
//   Ok(1) = the session cookie expired mid-run
//   Ok(2) = no domain source was given
//   Err = startup failure or stdout went away
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    if let Some(code) = early_exit(&cli) {
        return Ok(code);
    }

    logging::init(cli.verbose);

    let settings = Settings::from_cli(&cli).context("could not load settings")?;
    debug!("Successfully extracted user agent and cookie from curl command");

    let domains = match load_domains(&cli) {
        Ok(domains) => domains,
        Err(e @ TrailsError::NoTargetSource) => {
            eprintln!("Error: {}\n\n{}", e, Cli::command().render_usage());
            return Ok(2);
        }
        Err(e) => return Err(e.into()),
    };
    info!(count = domains.len(), "domains loaded");

    let fetcher = HttpFetcher::new(&settings)?;
    let extractor = AnchorExtractor::new();
    let crawler = Crawler::new(&fetcher, &extractor, settings.policy);

    let outcome = crawler.crawl_targets(&domains, &mut std::io::stdout()).await?;

    Ok(report_outcome(&outcome, &mut std::io::stderr()))
}

// Handles the banner flags before anything touches the cookie file
//
// Returns: Some(exit code) when the run should stop here (--version)
fn early_exit(cli: &Cli) -> Option<i32> {
    if cli.version {
        banner::print_banner();
        banner::print_version();
        return Some(0);
    }

    if !cli.silent {
        banner::print_banner();
    }

    None
}

// Resolves the domain source and reads every domain out of it
//
// Piped stdin with nothing in it comes back as NoTargetSource too.
fn load_domains(cli: &Cli) -> error::Result<Vec<String>> {
    let source = TargetSource::resolve(
        cli.domain.as_deref(),
        cli.list.as_deref(),
        !std::io::stdin().is_terminal(),
    )?;

    source.read_targets()
}

// Turns the run outcome into an exit code
//
// The expired-cookie line is written to `err` directly so that no log
// filter can hide why the process stopped.
fn report_outcome<W: Write>(outcome: &RunOutcome, err: &mut W) -> i32 {
    match outcome {
        RunOutcome::Completed { domains } => {
            debug!(domains, "all domains processed");
            0
        }
        RunOutcome::SessionExpired { domain, page } => {
            error!(domain = domain.as_str(), page, "Cookie Expired: please add new cookie");
            // Nothing left to do if stderr itself is gone
            let _ = writeln!(
                err,
                "Error: Cookie Expired: please add new cookie (stopped at {} page {})",
                domain, page
            );
            1
        }
    }
}
