//! Dead-code heuristics: components, source files and exported symbols
//! that no other file appears to reference.
//!
//! Detection is a text search, not a reference graph. Every sub-scan
//! collects import/usage lines into a bounded [`index::ExcerptIndex`] and
//! reports candidates whose names never occur in it. Treat the output as
//! leads to review.

pub mod detector;
pub mod index;
mod report;

use std::error::Error;
use std::path::Path;

use crate::config::Config;
use crate::report_helpers;
use crate::search::TreeSearch;

pub use detector::{DeadCodeCandidate, DeadCodeScan, DeadKind, Kinds, SkipList, scan};
use report::{print_json, print_report};

pub fn run(
    path: &Path,
    json: bool,
    top: usize,
    kind: Option<DeadKind>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let filter = config.exclude_filter()?;
    let search = TreeSearch::new(path, &filter);
    let kinds = kind.map_or(Kinds::ALL, Kinds::only);
    let skip = SkipList {
        min_name_len: config.min_name_len,
    };

    let result = scan(&search, kinds, config.occurrence_cap, &skip);
    if result.index_truncated {
        tracing::warn!(
            cap = config.occurrence_cap,
            "occurrence index truncated; some live code may be reported as dead"
        );
    }

    let mut findings = result.findings;
    report_helpers::output_results(&mut findings, top, json, print_json, print_report)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
