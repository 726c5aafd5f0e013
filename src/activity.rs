//! Commit statistics and the trailing monthly activity window.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::git::{CommitRecord, shortlog};

/// Months in the activity window, current month included.
pub const ACTIVITY_MONTHS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM`
    pub month: String,
    pub commits: usize,
}

/// Month key of a unix timestamp; `None` for out-of-range values.
fn month_of(ts: i64) -> Option<(i32, u32)> {
    let dt = Utc.timestamp_opt(ts, 0).single()?;
    Some((dt.year(), dt.month()))
}

/// `(year, month)` stepped back `n` months.
fn months_back(year: i32, month: u32, n: usize) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - n as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// Commit counts for the 6 months ending with `now`'s month, oldest first.
/// Always exactly 6 buckets; months without commits count 0 and commits
/// outside the window are ignored.
pub fn monthly_activity(times: &[i64], now: DateTime<Utc>) -> Vec<MonthBucket> {
    let (year, month) = (now.year(), now.month());
    let window: Vec<(i32, u32)> = (0..ACTIVITY_MONTHS)
        .rev()
        .map(|n| months_back(year, month, n))
        .collect();

    let mut counts = vec![0usize; window.len()];
    for key in times.iter().filter_map(|&ts| month_of(ts)) {
        if let Some(idx) = window.iter().position(|w| *w == key) {
            counts[idx] += 1;
        }
    }

    window
        .into_iter()
        .zip(counts)
        .map(|((y, m), commits)| MonthBucket {
            month: format!("{y:04}-{m:02}"),
            commits,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitStats {
    pub total_commits: usize,
    pub contributors: usize,
    /// `YYYY-MM-DD` of the oldest and newest commit analyzed.
    pub first_commit: Option<String>,
    pub last_commit: Option<String>,
}

fn day_of(ts: i64) -> Option<String> {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

/// Totals over a newest-first commit stream.
pub fn commit_stats(commits: &[CommitRecord]) -> CommitStats {
    CommitStats {
        total_commits: commits.len(),
        contributors: shortlog(commits).len(),
        first_commit: commits.iter().map(|c| c.time).min().and_then(day_of),
        last_commit: commits.iter().map(|c| c.time).max().and_then(day_of),
    }
}

#[cfg(test)]
#[path = "activity_test.rs"]
mod tests;
