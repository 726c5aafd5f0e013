//! Tech-stack detection from dependency manifests, plus the language mix
//! by file extension.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::search::SearchSource;
use crate::util::{OrderedCounter, basename, extension, percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TechCategory {
    Framework,
    Database,
    Styling,
    Testing,
    Build,
    Payments,
    Platform,
}

impl TechCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TechCategory::Framework => "framework",
            TechCategory::Database => "database",
            TechCategory::Styling => "styling",
            TechCategory::Testing => "testing",
            TechCategory::Build => "build",
            TechCategory::Payments => "payments",
            TechCategory::Platform => "platform",
        }
    }
}

/// Dependency name → display name. A dependency matches a key exactly or
/// by path suffix (`github.com/gin-gonic/gin` matches `gin-gonic/gin`).
const TECHNOLOGIES: &[(&str, &str, TechCategory)] = &[
    ("next", "Next.js", TechCategory::Framework),
    ("react", "React", TechCategory::Framework),
    ("nuxt", "Nuxt", TechCategory::Framework),
    ("vue", "Vue", TechCategory::Framework),
    ("@sveltejs/kit", "SvelteKit", TechCategory::Framework),
    ("svelte", "Svelte", TechCategory::Framework),
    ("astro", "Astro", TechCategory::Framework),
    ("@angular/core", "Angular", TechCategory::Framework),
    ("express", "Express", TechCategory::Framework),
    ("fastify", "Fastify", TechCategory::Framework),
    ("@nestjs/core", "NestJS", TechCategory::Framework),
    ("django", "Django", TechCategory::Framework),
    ("flask", "Flask", TechCategory::Framework),
    ("fastapi", "FastAPI", TechCategory::Framework),
    ("rails", "Rails", TechCategory::Framework),
    ("laravel/framework", "Laravel", TechCategory::Framework),
    ("symfony/framework-bundle", "Symfony", TechCategory::Framework),
    ("gin-gonic/gin", "Gin", TechCategory::Framework),
    ("labstack/echo", "Echo", TechCategory::Framework),
    ("gofiber/fiber", "Fiber", TechCategory::Framework),
    ("axum", "Axum", TechCategory::Framework),
    ("actix-web", "Actix Web", TechCategory::Framework),
    ("tokio", "Tokio", TechCategory::Framework),
    ("prisma", "Prisma", TechCategory::Database),
    ("@prisma/client", "Prisma", TechCategory::Database),
    ("drizzle-orm", "Drizzle", TechCategory::Database),
    ("mongoose", "MongoDB", TechCategory::Database),
    ("mongodb", "MongoDB", TechCategory::Database),
    ("pg", "PostgreSQL", TechCategory::Database),
    ("psycopg2", "PostgreSQL", TechCategory::Database),
    ("mysql2", "MySQL", TechCategory::Database),
    ("redis", "Redis", TechCategory::Database),
    ("ioredis", "Redis", TechCategory::Database),
    ("sqlalchemy", "SQLAlchemy", TechCategory::Database),
    ("gorm.io/gorm", "GORM", TechCategory::Database),
    ("diesel", "Diesel", TechCategory::Database),
    ("sqlx", "SQLx", TechCategory::Database),
    ("@supabase/supabase-js", "Supabase", TechCategory::Platform),
    ("firebase", "Firebase", TechCategory::Platform),
    ("tailwindcss", "Tailwind CSS", TechCategory::Styling),
    ("sass", "Sass", TechCategory::Styling),
    ("styled-components", "styled-components", TechCategory::Styling),
    ("jest", "Jest", TechCategory::Testing),
    ("vitest", "Vitest", TechCategory::Testing),
    ("cypress", "Cypress", TechCategory::Testing),
    ("@playwright/test", "Playwright", TechCategory::Testing),
    ("pytest", "pytest", TechCategory::Testing),
    ("rspec", "RSpec", TechCategory::Testing),
    ("typescript", "TypeScript", TechCategory::Build),
    ("vite", "Vite", TechCategory::Build),
    ("webpack", "webpack", TechCategory::Build),
    ("stripe", "Stripe", TechCategory::Payments),
    ("@stripe/stripe-js", "Stripe", TechCategory::Payments),
    ("stripe/stripe-php", "Stripe", TechCategory::Payments),
];

const LANGUAGES: &[(&str, &str)] = &[
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("mts", "TypeScript"),
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("astro", "Astro"),
    ("py", "Python"),
    ("go", "Go"),
    ("rs", "Rust"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("swift", "Swift"),
    ("cs", "C#"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("css", "CSS"),
    ("scss", "CSS"),
    ("html", "HTML"),
    ("sql", "SQL"),
    ("sh", "Shell"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Technology {
    pub name: String,
    pub category: TechCategory,
    /// Manifest the dependency was declared in.
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub files: usize,
    pub percent: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechStack {
    pub technologies: Vec<Technology>,
    pub languages: Vec<LanguageShare>,
}

/// Dependency names declared by one manifest, or `None` when the file is
/// not a recognized manifest or does not parse.
pub fn manifest_dependencies(file_name: &str, content: &str) -> Option<Vec<String>> {
    match file_name {
        "package.json" => json_keys(
            content,
            &["dependencies", "devDependencies", "peerDependencies"],
        ),
        "composer.json" => json_keys(content, &["require", "require-dev"]),
        "Cargo.toml" => cargo_dependencies(content),
        "pyproject.toml" => pyproject_dependencies(content),
        "requirements.txt" => Some(requirements(content)),
        "go.mod" => Some(go_requires(content)),
        "Gemfile" => Some(gems(content)),
        _ => None,
    }
}

fn json_keys(content: &str, sections: &[&str]) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    Some(
        sections
            .iter()
            .filter_map(|s| value.get(s)?.as_object())
            .flat_map(|deps| deps.keys().cloned())
            .collect(),
    )
}

fn toml_table_keys(value: &toml::Value, path: &[&str]) -> Vec<String> {
    let mut cur = value;
    for key in path {
        match cur.get(key) {
            Some(v) => cur = v,
            None => return Vec::new(),
        }
    }
    cur.as_table()
        .map(|t| t.keys().cloned().collect())
        .unwrap_or_default()
}

const CARGO_SECTIONS: &[&[&str]] = &[
    &["dependencies"],
    &["dev-dependencies"],
    &["workspace", "dependencies"],
];

fn cargo_dependencies(content: &str) -> Option<Vec<String>> {
    let value: toml::Value = toml::from_str(content).ok()?;
    Some(
        CARGO_SECTIONS
            .iter()
            .flat_map(|path| toml_table_keys(&value, path))
            .collect(),
    )
}

fn pyproject_dependencies(content: &str) -> Option<Vec<String>> {
    let value: toml::Value = toml::from_str(content).ok()?;
    let mut deps: Vec<String> = value
        .get("project")
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(requirement_name)
                .collect()
        })
        .unwrap_or_default();
    deps.extend(toml_table_keys(&value, &["tool", "poetry", "dependencies"]));
    Some(deps)
}

/// `Django>=4.2 ; python_version > "3"` → `django`.
fn requirement_name(spec: &str) -> String {
    spec.split(|c: char| "=<>~![;( ".contains(c))
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

fn requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('-'))
        .map(requirement_name)
        .filter(|n| !n.is_empty())
        .collect()
}

fn go_requires(content: &str) -> Vec<String> {
    let mut deps = Vec::new();
    let mut in_block = false;
    for line in content.lines().map(str::trim) {
        if line.starts_with("require (") {
            in_block = true;
        } else if in_block && line.starts_with(')') {
            in_block = false;
        } else if in_block {
            if let Some(module) = line.split_whitespace().next()
                && !module.starts_with("//")
            {
                deps.push(module.to_string());
            }
        } else if let Some(rest) = line.strip_prefix("require ")
            && let Some(module) = rest.split_whitespace().next()
        {
            deps.push(module.to_string());
        }
    }
    deps
}

static GEM_LINE: OnceLock<Regex> = OnceLock::new();

fn gems(content: &str) -> Vec<String> {
    let re = GEM_LINE.get_or_init(|| {
        Regex::new(r#"^\s*gem\s+["']([^"']+)["']"#).expect("gem pattern is valid")
    });
    content
        .lines()
        .filter_map(|l| re.captures(l))
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

fn matches_key(dep: &str, key: &str) -> bool {
    let dep = dep.to_lowercase();
    dep == key || dep.strip_suffix(key).is_some_and(|prefix| prefix.ends_with('/'))
}

/// Technologies declared across every manifest in the tree, in lookup-table
/// order, each listed once.
pub fn technologies(search: &dyn SearchSource) -> Vec<Technology> {
    let mut declared: Vec<(String, Vec<String>)> = Vec::new();
    for path in search.files().iter().filter(|p| is_manifest(p)) {
        let Some(content) = search.read(path) else {
            continue;
        };
        match manifest_dependencies(basename(path), &content) {
            Some(deps) => declared.push((path.clone(), deps)),
            None => tracing::debug!(path = %path, "unparseable manifest skipped"),
        }
    }

    let mut found: Vec<Technology> = Vec::new();
    for &(key, name, category) in TECHNOLOGIES {
        if found.iter().any(|t| t.name == name) {
            continue;
        }
        if let Some((source, _)) = declared
            .iter()
            .find(|(_, deps)| deps.iter().any(|d| matches_key(d, key)))
        {
            found.push(Technology {
                name: name.to_string(),
                category,
                source: source.clone(),
            });
        }
    }
    found
}

fn is_manifest(path: &str) -> bool {
    matches!(
        basename(path),
        "package.json"
            | "composer.json"
            | "Cargo.toml"
            | "pyproject.toml"
            | "requirements.txt"
            | "go.mod"
            | "Gemfile"
    )
}

/// Share of recognized source files per language, largest first.
pub fn language_mix(files: &[String]) -> Vec<LanguageShare> {
    let counter: OrderedCounter = files
        .iter()
        .filter_map(|p| extension(p))
        .filter_map(|ext| {
            LANGUAGES
                .iter()
                .find(|(e, _)| *e == ext)
                .map(|(_, lang)| *lang)
        })
        .collect();
    let total: usize = counter.ranked().iter().map(|(_, n)| n).sum();
    counter
        .ranked()
        .into_iter()
        .map(|(language, files)| LanguageShare {
            language,
            files,
            percent: percent(files, total),
        })
        .collect()
}

pub fn detect_stack(search: &dyn SearchSource) -> TechStack {
    TechStack {
        technologies: technologies(search),
        languages: language_mix(search.files()),
    }
}

#[cfg(test)]
#[path = "stack_test.rs"]
mod tests;
