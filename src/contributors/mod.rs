//! Contributor expertise profiles.
//!
//! Each author's recent commits are classified by subject keywords and by
//! the paths they touch. The result is a per-area radar (percentages), a
//! focus label taken from the most-touched file extension, and the two
//! directories the author works in most.

pub mod analyzer;
mod report;

use std::error::Error;
use std::path::Path;

use crate::config::Config;
use crate::git::GitRepo;
use crate::report_helpers;
use crate::util::parse_since;

use analyzer::aggregate_all;
use report::{print_json, print_report};

pub fn run(
    path: &Path,
    json: bool,
    top: usize,
    since: Option<&str>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let git_repo = GitRepo::open(path)?;
    let since_ts = since.map(parse_since).transpose()?;

    let commits = git_repo.commits(None, since_ts)?;
    let mut contributors = aggregate_all(&commits, config.history_depth);

    let floor = config.radar_floor;
    report_helpers::output_results(&mut contributors, top, json, print_json, |c| {
        print_report(c, floor)
    })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
