// src/targets/source.rs
// =============================================================================
// Resolves the target source and reads the domains out of it.
//
// Lines are trimmed and blank lines are dropped. Piped stdin that yields no
// domains is treated the same as having no source. The order of the input is
// kept, and duplicates are left alone (each one is crawled again).
// =============================================================================

use crate::error::{Result, TrailsError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// A single domain given on the command line
    Single(String),
    /// A file with one domain per line
    File(PathBuf),
    /// Domains piped in on standard input
    Stdin,
}

impl TargetSource {
    // Picks the source to use
    //
    // Parameters:
    //   domain: value of --domain, if any
    //   list: value of --list, if any
    //   stdin_is_piped: true when stdin is not a terminal
    //
    // An empty --domain counts as not given.
    pub fn resolve(domain: Option<&str>, list: Option<&Path>, stdin_is_piped: bool) -> Result<Self> {
        if let Some(domain) = domain.map(str::trim).filter(|d| !d.is_empty()) {
            return Ok(Self::Single(domain.to_string()));
        }

        if let Some(list) = list {
            return Ok(Self::File(list.to_path_buf()));
        }

        if stdin_is_piped {
            return Ok(Self::Stdin);
        }

        Err(TrailsError::NoTargetSource)
    }

    // Reads every domain from the source, in order
    pub fn read_targets(&self) -> Result<Vec<String>> {
        match self {
            Self::Single(domain) => Ok(vec![domain.clone()]),
            Self::File(path) => {
                let io_error = |source| TrailsError::Io {
                    path: path.clone(),
                    source,
                };
                let file = File::open(path).map_err(io_error)?;
                read_lines(BufReader::new(file)).map_err(io_error)
            }
            Self::Stdin => piped_targets(io::stdin().lock()),
        }
    }
}

// Stdin that is not a terminal but carries nothing (/dev/null under cron or
// CI) is no source at all
fn piped_targets<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let domains = read_lines(reader).map_err(|source| TrailsError::Io {
        path: PathBuf::from("<stdin>"),
        source,
    })?;

    if domains.is_empty() {
        return Err(TrailsError::NoTargetSource);
    }

    Ok(domains)
}

fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut domains = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let domain = line.trim();
        if !domain.is_empty() {
            domains.push(domain.to_string());
        }
    }

    Ok(domains)
}
