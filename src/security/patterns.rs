//! Fixed detection rules. Secrets are critical or high, injection sinks
//! high or medium.

use std::sync::OnceLock;

use regex::Regex;

use super::{FindingKind, Severity};
use crate::util::{basename, extension};

pub struct Rule {
    pub name: &'static str,
    pub kind: FindingKind,
    pub severity: Severity,
    pub pattern: Regex,
}

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

fn rule(name: &'static str, kind: FindingKind, severity: Severity, pattern: &str) -> Rule {
    Rule {
        name,
        kind,
        severity,
        pattern: Regex::new(pattern).expect("security rule pattern is valid"),
    }
}

pub fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        use FindingKind::{Injection, Secret};
        use Severity::{Critical, High, Medium};
        vec![
            rule("AWS Access Key ID", Secret, Critical, r"AKIA[0-9A-Z]{16}"),
            rule(
                "AWS Secret Access Key",
                Secret,
                Critical,
                r"(?i)aws_secret_access_key\s*[=:]\s*[A-Za-z0-9/+=]{40}",
            ),
            rule("GitHub Token", Secret, Critical, r"gh[pousr]_[A-Za-z0-9]{36}"),
            rule(
                "Private Key",
                Secret,
                Critical,
                r"-----BEGIN (?:RSA |EC |DSA |OPENSSH )?PRIVATE KEY-----",
            ),
            rule(
                "Slack Token",
                Secret,
                Critical,
                r"xox[baprs]-[0-9]{10,13}-[0-9]{10,13}[A-Za-z0-9-]*",
            ),
            rule("Stripe Live Key", Secret, Critical, r"sk_live_[A-Za-z0-9]{24,}"),
            rule(
                "Database URL with Password",
                Secret,
                Critical,
                r"(?i)(?:postgres(?:ql)?|mysql|mongodb(?:\+srv)?|redis)://[^:\s/]+:[^@\s]+@",
            ),
            rule(
                "SendGrid API Key",
                Secret,
                High,
                r"SG\.[A-Za-z0-9_-]{22}\.[A-Za-z0-9_-]{43}",
            ),
            rule(
                "Generic API Key",
                Secret,
                High,
                r#"(?i)api[_-]?key["']?\s*[=:]\s*["'][A-Za-z0-9_\-]{20,}["']"#,
            ),
            rule(
                "Hardcoded Password",
                Secret,
                High,
                r#"(?i)(?:password|passwd|secret)["']?\s*[=:]\s*["'][^"'\s]{8,}["']"#,
            ),
            rule("eval()", Injection, High, r"\beval\s*\("),
            rule("new Function()", Injection, High, r"\bnew\s+Function\s*\("),
            rule(
                "SQL built from interpolation",
                Injection,
                High,
                r#"(?i)(?:\bf["']\s*(?:select|insert|update|delete)\s|\b(?:select\s.+\sfrom|insert\s+into|update\s+\w+\s+set|delete\s+from)\b.*(?:\$\{|["']\s*\+|\.format\s*\())"#,
            ),
            rule(
                "Shell command with interpolation",
                Injection,
                High,
                r"(?:\bexec(?:Sync)?\s*\(\s*`[^`]*\$\{|os\.system\s*\(|shell\s*=\s*True)",
            ),
            rule("dangerouslySetInnerHTML", Injection, Medium, r"dangerouslySetInnerHTML"),
            rule("innerHTML assignment", Injection, Medium, r"\.innerHTML\s*=[^=]"),
            rule("v-html", Injection, Medium, r"\bv-html\s*="),
            rule("pickle.loads", Injection, Medium, r"\bpickle\.loads?\s*\("),
        ]
    })
}

/// Matched text that is obviously illustrative rather than a credential.
pub fn is_placeholder(matched: &str) -> bool {
    let lower = matched.to_lowercase();
    ["example", "placeholder", "xxxx", "changeme", "your_", "<", "dummy"]
        .iter()
        .any(|p| lower.contains(p))
}

/// File names that should never be committed.
pub const SENSITIVE_FILES: &[&str] = &[
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.staging",
    "id_rsa",
    "id_dsa",
    "id_ecdsa",
    "id_ed25519",
    "credentials.json",
    "service-account.json",
    "secrets.json",
    "secrets.yml",
    ".npmrc",
    ".pypirc",
];

pub const SENSITIVE_EXTS: &[&str] = &["pem", "key", "p12", "pfx", "keystore"];

/// Example and template env files are meant to be committed.
const TEMPLATE_SUFFIXES: &[&str] = &[".example", ".sample", ".template", ".dist"];

/// Whether a path names a credential or key file.
pub fn is_sensitive(path: &str) -> bool {
    let name = basename(path).to_lowercase();
    if TEMPLATE_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return false;
    }
    SENSITIVE_FILES.contains(&name.as_str())
        || extension(&name).is_some_and(|e| SENSITIVE_EXTS.contains(&e.as_str()))
}

/// Key material is worse than an env file.
pub fn exposure_severity(path: &str) -> Severity {
    let name = basename(path).to_lowercase();
    if name.starts_with("id_")
        || extension(&name).is_some_and(|e| SENSITIVE_EXTS.contains(&e.as_str()))
    {
        Severity::High
    } else {
        Severity::Medium
    }
}
