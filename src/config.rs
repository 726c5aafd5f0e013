//! Analysis settings, read from an optional `rastro.toml`.
//!
//! Every field has a default, so an absent file and an empty file are the
//! same. Command-line flags override file values after loading.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::walk::ExcludeFilter;

pub const CONFIG_FILE: &str = "rastro.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Most recent commits per contributor that feed the expertise profile.
    pub history_depth: usize,
    /// Length of the ranked churn list.
    pub churn_top: usize,
    /// Maximum lines kept in each dead-code occurrence index. Raising it
    /// improves recall at a linear cost in scan time.
    pub occurrence_cap: usize,
    /// Evidence paths kept per compliance indicator.
    pub evidence_cap: usize,
    /// Dead-code candidates with shorter names are skipped.
    pub min_name_len: usize,
    /// Minimum radius a radar axis is drawn with (presentation only).
    pub radar_floor: usize,
    /// Extra directory names to prune while walking.
    pub exclude_dirs: Vec<String>,
    /// Glob patterns (relative to the root) to leave out of every scan.
    pub exclude: Vec<String>,
    /// External command that receives the summary prompt on stdin.
    pub summary_command: Option<String>,
    /// Seconds to wait for `summary_command` before falling back.
    pub summary_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_depth: 500,
            churn_top: 15,
            occurrence_cap: 4000,
            evidence_cap: 8,
            min_name_len: 3,
            radar_floor: 5,
            exclude_dirs: Vec::new(),
            exclude: Vec::new(),
            summary_command: None,
            summary_timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load `explicit` if given, otherwise `<root>/rastro.toml` when present,
    /// otherwise defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let path: PathBuf = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = fs::read_to_string(&path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        let config = Self::from_toml(&text)
            .map_err(|e| format!("invalid config {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn exclude_filter(&self) -> Result<ExcludeFilter, Box<dyn Error>> {
        ExcludeFilter::new(&self.exclude_dirs, &self.exclude)
            .map_err(|e| format!("invalid exclude pattern: {e}").into())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
