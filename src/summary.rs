//! Project summary: a short description, key things and gotchas.
//!
//! An optional [`Summarizer`] turns a bounded prompt into free text, which
//! [`parse_summary`] reads. Any failure (the command errors, times out or
//! returns something unparseable) falls back to [`heuristic_summary`], so a
//! summary is always present.

use std::error::Error;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::report::SiteReport;
use crate::security::Severity;

/// Prompts are cut to this many characters.
pub const MAX_PROMPT_CHARS: usize = 6000;
/// Entries kept in each summary list.
pub const MAX_ITEMS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    Command,
    #[default]
    Heuristic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub description: String,
    pub key_things: Vec<String>,
    pub gotchas: Vec<String>,
    pub source: SummarySource,
}

/// Best-effort text in, text out.
pub trait Summarizer {
    fn summarize(&self, prompt: &str) -> Result<String, Box<dyn Error>>;
}

/// Runs a shell command with the prompt on stdin and reads its stdout.
pub struct CommandSummarizer {
    command: String,
    timeout: Duration,
}

impl CommandSummarizer {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }
}

impl Summarizer for CommandSummarizer {
    fn summarize(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(prompt.as_bytes())
        {
            let _ = child.kill();
            let _ = child.wait();
            return Err(format!("cannot write prompt to summary command: {e}").into());
        }
        let mut stdout = child.stdout.take().ok_or("summary command has no stdout")?;
        let reader = thread::spawn(move || {
            let mut out = String::new();
            stdout.read_to_string(&mut out).map(|_| out)
        });

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                if !status.success() {
                    return Err(format!("summary command exited with {status}").into());
                }
                break;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!(
                    "summary command timed out after {}s",
                    self.timeout.as_secs()
                )
                .into());
            }
            thread::sleep(Duration::from_millis(50));
        }

        let out = reader
            .join()
            .map_err(|_| "summary command reader panicked")??;
        Ok(out)
    }
}

/// The facts a summarizer gets to see, cut to [`MAX_PROMPT_CHARS`].
pub fn build_prompt(report: &SiteReport) -> String {
    let mut prompt = String::from(
        "Summarize this repository. Answer with JSON: \
         {\"description\": string, \"key_things\": [string], \"gotchas\": [string]}.\n\n",
    );
    prompt.push_str(&format!("Repository: {}\n", report.repository.name));
    prompt.push_str(&format!(
        "Commits: {}, contributors: {}\n",
        report.stats.total_commits, report.stats.contributors
    ));

    let languages: Vec<String> = report
        .stack
        .languages
        .iter()
        .map(|l| format!("{} {}%", l.language, l.percent))
        .collect();
    prompt.push_str(&format!("Languages: {}\n", languages.join(", ")));
    let techs: Vec<&str> = report
        .stack
        .technologies
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    prompt.push_str(&format!("Technologies: {}\n", techs.join(", ")));

    for layer in &report.layers {
        let shown: Vec<&str> = layer.items.iter().take(20).map(String::as_str).collect();
        prompt.push_str(&format!(
            "{} ({}): {}\n",
            layer.name,
            layer.items.len(),
            shown.join(", ")
        ));
    }
    let churned: Vec<&str> = report.churn.iter().map(|c| c.path.as_str()).collect();
    prompt.push_str(&format!("Most changed files: {}\n", churned.join(", ")));
    prompt.push_str(&format!(
        "Security findings: {}, exposed files: {}, possibly dead code: {}\n",
        report.security.findings.len(),
        report.security.warnings.len(),
        report.dead_code.findings.len()
    ));

    if prompt.chars().count() > MAX_PROMPT_CHARS {
        prompt = prompt.chars().take(MAX_PROMPT_CHARS).collect();
    }
    prompt
}

#[derive(Deserialize)]
struct JsonSummary {
    #[serde(default)]
    description: String,
    #[serde(default, alias = "keyThings")]
    key_things: Vec<String>,
    #[serde(default)]
    gotchas: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Description,
    KeyThings,
    Gotchas,
}

fn section_heading(line: &str) -> Option<(Section, &str)> {
    let trimmed = line.trim_start_matches(['#', '*', ' ']).trim();
    let (head, rest) = trimmed.split_once(':').unwrap_or((trimmed, ""));
    let head = head.trim_end_matches('*').trim().to_lowercase();
    let section = match head.as_str() {
        "description" | "summary" | "overview" => Section::Description,
        "key things" | "key_things" | "key points" | "highlights" => Section::KeyThings,
        "gotchas" | "caveats" | "watch out" | "risks" => Section::Gotchas,
        _ => return None,
    };
    Some((section, rest.trim()))
}

fn bullet(line: &str) -> Option<&str> {
    let t = line.trim();
    let rest = t
        .strip_prefix("- ")
        .or_else(|| t.strip_prefix("* "))
        .or_else(|| t.strip_prefix("• "))
        .or_else(|| {
            let digits = t.find(|c: char| !c.is_ascii_digit())?;
            (digits > 0)
                .then(|| t[digits..].strip_prefix(". ").or_else(|| t[digits..].strip_prefix(") ")))
                .flatten()
        })?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}

fn parse_sections(text: &str) -> Summary {
    let mut summary = Summary::default();
    let mut current = Section::None;
    for line in text.lines() {
        if let Some((section, rest)) = section_heading(line) {
            current = section;
            if section == Section::Description && !rest.is_empty() {
                summary.description = rest.to_string();
            }
            continue;
        }
        match current {
            Section::Description if summary.description.is_empty() => {
                if !line.trim().is_empty() {
                    summary.description = line.trim().to_string();
                }
            }
            Section::KeyThings => summary.key_things.extend(bullet(line).map(String::from)),
            Section::Gotchas => summary.gotchas.extend(bullet(line).map(String::from)),
            _ => {}
        }
    }
    summary
}

/// Read a summarizer response: a JSON object (bare or inside a code fence)
/// or `Description:` / `Key things:` / `Gotchas:` sections. `None` when no
/// description can be found.
pub fn parse_summary(text: &str) -> Option<Summary> {
    let json = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<JsonSummary>(&text[start..=end]).ok()
        }
        _ => None,
    };
    let mut summary = match json {
        Some(j) => Summary {
            description: j.description.trim().to_string(),
            key_things: j.key_things,
            gotchas: j.gotchas,
            source: SummarySource::Command,
        },
        None => Summary {
            source: SummarySource::Command,
            ..parse_sections(text)
        },
    };

    if summary.description.is_empty() {
        return None;
    }
    summary.key_things.retain(|s| !s.trim().is_empty());
    summary.gotchas.retain(|s| !s.trim().is_empty());
    summary.key_things.truncate(MAX_ITEMS);
    summary.gotchas.truncate(MAX_ITEMS);
    Some(summary)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Summary assembled from the report itself.
pub fn heuristic_summary(report: &SiteReport) -> Summary {
    let language = report
        .stack
        .languages
        .first()
        .map_or("source", |l| l.language.as_str());
    let frameworks: Vec<&str> = report
        .stack
        .technologies
        .iter()
        .filter(|t| t.category == crate::stack::TechCategory::Framework)
        .take(3)
        .map(|t| t.name.as_str())
        .collect();
    let built_with = if frameworks.is_empty() {
        String::new()
    } else {
        format!(" built with {}", frameworks.join(", "))
    };
    let description = format!(
        "{} is a {language} project{built_with}, with {} from {}.",
        report.repository.name,
        plural(report.stats.total_commits, "commit"),
        plural(report.stats.contributors, "contributor"),
    );

    let mut key_things = Vec::new();
    let inv = &report.inventory;
    if !(inv.pages.is_empty() && inv.components.is_empty() && inv.api_routes.is_empty()) {
        key_things.push(format!(
            "{}, {} and {}.",
            plural(inv.pages.len(), "page"),
            plural(inv.components.len(), "component"),
            plural(inv.api_routes.len(), "API route"),
        ));
    }
    if let Some(top) = report.contributors.first() {
        key_things.push(format!(
            "Most active contributor: {} ({}, {}).",
            top.name,
            plural(top.commits, "commit"),
            top.focus.label()
        ));
    }
    if let Some(hot) = report.churn.first() {
        key_things.push(format!(
            "Most frequently changed file: {} ({} changes).",
            hot.path, hot.changes
        ));
    }
    if let Some(kind) = report.commit_kinds.kinds.leader() {
        key_things.push(format!(
            "Most commits are {}.",
            kind.label().to_lowercase()
        ));
    }

    let mut gotchas = Vec::new();
    let severe = report.security.count(Severity::Critical) + report.security.count(Severity::High);
    if severe > 0 {
        gotchas.push(format!(
            "{} critical or high security {}.",
            severe,
            if severe == 1 { "finding" } else { "findings" }
        ));
    }
    if !report.security.warnings.is_empty() {
        gotchas.push(format!(
            "{} not covered by ignore rules.",
            plural(report.security.warnings.len(), "credential file")
        ));
    }
    if !report.dead_code.findings.is_empty() {
        gotchas.push(format!(
            "{} possibly unused (text search only).",
            plural(report.dead_code.findings.len(), "artifact")
        ));
    }
    if report.compliance.score < 50 {
        gotchas.push(format!(
            "Compliance indicators: {} of {} found.",
            report.compliance.found, report.compliance.total
        ));
    }

    key_things.truncate(MAX_ITEMS);
    gotchas.truncate(MAX_ITEMS);
    Summary {
        description,
        key_things,
        gotchas,
        source: SummarySource::Heuristic,
    }
}

/// Ask `summarizer` (when given) and fall back to the heuristic summary on
/// any failure.
pub fn summarize(report: &SiteReport, summarizer: Option<&dyn Summarizer>) -> Summary {
    let Some(summarizer) = summarizer else {
        return heuristic_summary(report);
    };
    match summarizer.summarize(&build_prompt(report)) {
        Ok(text) => parse_summary(&text).unwrap_or_else(|| {
            tracing::warn!("summary response could not be parsed; using heuristic summary");
            heuristic_summary(report)
        }),
        Err(e) => {
            tracing::warn!(error = %e, "summary command failed; using heuristic summary");
            heuristic_summary(report)
        }
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
