use super::ExpertiseArea;
use crate::util::{basename, dir_segments, extension};
use crate::walk::TEST_DIRS;

const FRONTEND_EXTS: &[&str] = &[
    "tsx", "jsx", "vue", "svelte", "astro", "css", "scss", "sass", "less", "html",
];
const FRONTEND_DIRS: &[&str] = &[
    "components",
    "pages",
    "views",
    "layouts",
    "styles",
    "ui",
    "public",
    "assets",
];

const BACKEND_EXTS: &[&str] = &[
    "py", "go", "rs", "java", "rb", "php", "cs", "kt", "scala", "ex", "exs",
];
const BACKEND_DIRS: &[&str] = &[
    "api",
    "server",
    "routes",
    "controllers",
    "services",
    "middleware",
    "handlers",
    "functions",
];

const DATABASE_EXTS: &[&str] = &["sql", "prisma"];
const DATABASE_DIRS: &[&str] = &["migrations", "db", "database", "models", "schema", "supabase"];

const DEVOPS_FILES: &[&str] = &[
    "dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "makefile",
    "procfile",
    "vercel.json",
    "netlify.toml",
];
const DEVOPS_EXTS: &[&str] = &["tf", "sh"];
const DEVOPS_DIRS: &[&str] = &[
    ".github",
    ".circleci",
    "deploy",
    "infra",
    "k8s",
    "terraform",
    "scripts",
    ".husky",
];

const DOCS_EXTS: &[&str] = &["md", "mdx", "rst", "adoc"];
const DOCS_DIRS: &[&str] = &["docs", "doc"];

/// Classify a repository path by extension, directory names and well-known
/// file names. A path may land in several areas (`api/users.test.ts` is
/// both backend and testing).
pub fn path_areas(path: &str) -> Vec<ExpertiseArea> {
    let lower = path.trim().to_lowercase();
    if lower.is_empty() {
        return Vec::new();
    }
    let name = basename(&lower);
    let ext = extension(&lower);
    let ext = ext.as_deref().unwrap_or("");
    let in_dir = |dirs: &[&str]| dir_segments(&lower).any(|seg| dirs.contains(&seg));

    let mut areas = Vec::new();
    if FRONTEND_EXTS.contains(&ext) || in_dir(FRONTEND_DIRS) {
        areas.push(ExpertiseArea::Frontend);
    }
    if BACKEND_EXTS.contains(&ext) || in_dir(BACKEND_DIRS) {
        areas.push(ExpertiseArea::Backend);
    }
    if DATABASE_EXTS.contains(&ext) || in_dir(DATABASE_DIRS) || name.contains("schema") {
        areas.push(ExpertiseArea::Database);
    }
    if DEVOPS_FILES.contains(&name) || DEVOPS_EXTS.contains(&ext) || in_dir(DEVOPS_DIRS) {
        areas.push(ExpertiseArea::Devops);
    }
    if DOCS_EXTS.contains(&ext) || in_dir(DOCS_DIRS) {
        areas.push(ExpertiseArea::Docs);
    }
    if in_dir(TEST_DIRS)
        || name.contains(".test.")
        || name.contains(".spec.")
        || name.starts_with("test_")
        || name.contains("_test.")
    {
        areas.push(ExpertiseArea::Testing);
    }
    areas
}
