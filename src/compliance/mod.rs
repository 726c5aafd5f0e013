//! Platform-safety compliance indicators.
//!
//! Seven fixed categories (age verification through payment compliance)
//! are matched against file paths and source lines in a single pass. A
//! category is found as soon as one file is attributed to it; the score is
//! the rounded share of categories found.

pub mod analyzer;
mod report;

use std::error::Error;
use std::path::Path;

use crate::config::Config;
use crate::search::TreeSearch;

pub use analyzer::{ComplianceIndicator, ComplianceReport, scan};
use report::{print_json, print_report};

pub fn run(path: &Path, json: bool, config: &Config) -> Result<(), Box<dyn Error>> {
    let filter = config.exclude_filter()?;
    let search = TreeSearch::new(path, &filter);
    let report = scan(&search, config.evidence_cap);

    if json {
        print_json(&report)
    } else {
        print_report(&report);
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
