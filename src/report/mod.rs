//! Full report (`rastro report` command).
//!
//! Runs every scan over the repository once (history, stack, inventory,
//! dead code, security, compliance) and prints a single markdown or JSON
//! document. Sections that fail to build are empty, never missing.

/// Report builder: opens the repository and constructs the `SiteReport`.
mod builder;
/// Data structures for the report sections.
pub(crate) mod data;
/// JSON serialization of the report.
mod json;
/// Markdown formatting of the report.
mod markdown;

use std::error::Error;
use std::path::Path;
use std::time::Duration;

pub use data::*;

pub use builder::{ReportOptions, build_report};

use crate::config::Config;
use crate::summary::{CommandSummarizer, Summarizer};
use crate::util::parse_since;

/// Entry point: build the report and print it as markdown or JSON.
pub fn run(
    path: &Path,
    json: bool,
    since: Option<&str>,
    no_summary: bool,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let opts = ReportOptions {
        since: since.map(parse_since).transpose()?,
    };
    let summarizer = match &config.summary_command {
        Some(cmd) if !no_summary => Some(CommandSummarizer::new(
            cmd.clone(),
            Duration::from_secs(config.summary_timeout_secs),
        )),
        _ => None,
    };

    let report = build_report(
        path,
        &opts,
        config,
        summarizer.as_ref().map(|s| s as &dyn Summarizer),
    )?;

    if json {
        json::print_json(&report)?;
    } else {
        markdown::print_markdown(&report);
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
