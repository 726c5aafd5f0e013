use std::error::Error;
use std::time::SystemTime;

use indexmap::IndexMap;

/// Parse a duration string like "6m", "1y", "30d" into a Unix timestamp
/// representing that far back from now.
///
/// Approximations: 1 month = 30 days, 1 year = 365 days.
pub fn parse_since(s: &str) -> Result<i64, Box<dyn Error>> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty --since value".into());
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (num_str, unit) = s.split_at(split);
    if unit.is_empty() {
        return Err(format!("no unit in --since value: {s:?} (use d, m, or y)").into());
    }

    let n: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid --since value: {s:?} (expected e.g. 6m, 1y, 30d)"))?;

    let days: u64 = match unit {
        "d" | "day" | "days" => 1,
        "m" | "mo" | "month" | "months" => 30,
        "y" | "yr" | "year" | "years" => 365,
        _ => return Err(format!("unknown unit in --since: {s:?} (use d, m, or y)").into()),
    };

    let seconds = n
        .checked_mul(days * 86_400)
        .and_then(|secs| i64::try_from(secs).ok())
        .ok_or("--since value too large")?;

    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)?
        .as_secs() as i64;

    Ok(now - seconds)
}

/// Last path component of a `/`-separated repository path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File name without its final extension (`Button.vue` → `Button`).
/// Declaration files keep nothing of their double suffix (`api.d.ts` → `api`).
pub fn file_stem(path: &str) -> &str {
    let name = basename(path);
    let name = name.strip_suffix(".d.ts").unwrap_or(name);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(dot) => &name[..dot],
    }
}

/// Lowercased extension of a repository path, if any.
pub fn extension(path: &str) -> Option<String> {
    let name = basename(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(name[dot + 1..].to_ascii_lowercase()),
    }
}

/// Directory components of a repository path (everything but the file name).
pub fn dir_segments(path: &str) -> impl Iterator<Item = &str> {
    let dirs = match path.rfind('/') {
        Some(slash) => &path[..slash],
        None => "",
    };
    dirs.split('/').filter(|s| !s.is_empty())
}

/// Convert a PascalCase or camelCase identifier to kebab-case
/// (`UserCard` → `user-card`).
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else if ch == '_' || ch == ' ' {
            out.push('-');
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Check whether a byte buffer looks binary: a null byte in the first
/// 512 bytes.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(512)].contains(&0)
}

/// Integer percentage rounded half away from zero. Zero when `total` is 0.
pub fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as usize
}

/// Insertion-ordered tally. Ranking is a stable sort on count, so ties keep
/// the order in which keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCounter {
    counts: IndexMap<String, usize>,
}

impl OrderedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bump(&mut self, key: &str) {
        self.add(key, 1);
    }

    pub fn add(&mut self, key: &str, n: usize) {
        match self.counts.get_mut(key) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(key.to_string(), n);
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// All entries, highest count first; ties in first-seen order.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(k, &v)| (k.clone(), v))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<'a> FromIterator<&'a str> for OrderedCounter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut acc, key| {
            acc.bump(key);
            acc
        })
    }
}

#[cfg(test)]
#[path = "util_test.rs"]
mod tests;
