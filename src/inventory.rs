//! Inventories of components, modules, functions, pages and API routes,
//! and the architecture layers built from them.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::classify::routes::{extract_route, route_line_pattern};
use crate::search::SearchSource;
use crate::util::{basename, dir_segments, extension, file_stem};
use crate::walk::is_test_file;

const COMPONENT_EXTS: &[&str] = &["vue", "svelte", "jsx", "tsx"];
const SOURCE_EXTS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte", "py", "go", "rb", "php", "rs",
];
const PAGE_EXTS: &[&str] = &["vue", "svelte", "jsx", "tsx", "js", "ts", "astro", "mdx"];
/// Source files matched by router-call and decorator route patterns.
const ROUTE_EXTS: &[&str] = &["js", "ts", "mjs", "cjs", "py", "java", "kt", "go", "rb", "php"];

const MODULE_DIRS: &[&str] = &[
    "services",
    "service",
    "lib",
    "utils",
    "helpers",
    "hooks",
    "composables",
    "store",
    "stores",
];
const FUNCTION_DIRS: &[&str] = &["functions", "lambda", "lambdas", "serverless", "edge-functions"];

/// `.vue` and `.svelte` files, and `.jsx`/`.tsx` files that are either
/// PascalCase or live under a `components` directory.
pub fn is_component_file(path: &str) -> bool {
    let Some(ext) = extension(path) else {
        return false;
    };
    if !COMPONENT_EXTS.contains(&ext.as_str()) {
        return false;
    }
    match ext.as_str() {
        "vue" | "svelte" => !basename(path).starts_with('+'),
        _ => {
            file_stem(path)
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase())
                || dir_segments(path).any(|s| s == "components")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRoute {
    pub method: String,
    pub route: String,
    pub path: String,
    /// Line of the route declaration; `None` for file-based routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl ApiRoute {
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.route)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub components: Vec<InventoryItem>,
    pub modules: Vec<InventoryItem>,
    pub functions: Vec<InventoryItem>,
    pub pages: Vec<InventoryItem>,
    pub api_routes: Vec<ApiRoute>,
}

fn item(name: impl Into<String>, path: &str) -> InventoryItem {
    InventoryItem {
        name: name.into(),
        path: path.to_string(),
    }
}

/// Route directories that group files without adding a URL segment:
/// `(marketing)` in the Next.js app router.
fn is_route_group(seg: &str) -> bool {
    seg.starts_with('(') && seg.ends_with(')')
}

fn join_route(parts: &[&str]) -> String {
    let parts: Vec<&str> = parts
        .iter()
        .copied()
        .filter(|s| !is_route_group(s))
        .collect();
    format!("/{}", parts.join("/"))
}

/// URL of a page file: `pages/blog/index.vue` → `/blog`,
/// `app/(site)/about/page.tsx` → `/about`, `routes/docs/+page.svelte` → `/docs`.
pub fn page_route(path: &str) -> Option<String> {
    if !extension(path).is_some_and(|e| PAGE_EXTS.contains(&e.as_str())) || is_test_file(path) {
        return None;
    }
    let segs: Vec<&str> = path.split('/').collect();
    let (file, dirs) = segs.split_last()?;
    let stem = file_stem(file);

    if let Some(i) = dirs.iter().position(|s| *s == "pages") {
        let under = &dirs[i + 1..];
        if under.first() == Some(&"api") || stem.starts_with('_') {
            return None;
        }
        let mut parts = under.to_vec();
        if stem != "index" {
            parts.push(stem);
        }
        return Some(join_route(&parts));
    }

    if matches!(stem, "page" | "+page") {
        let i = dirs.iter().position(|s| *s == "app" || *s == "routes")?;
        return Some(join_route(&dirs[i + 1..]));
    }
    None
}

/// URL of a file-based API route: `pages/api/users/[id].ts` →
/// `/api/users/[id]`, `app/api/orders/route.ts` → `/api/orders`.
pub fn api_file_route(path: &str) -> Option<String> {
    if is_test_file(path) {
        return None;
    }
    let segs: Vec<&str> = path.split('/').collect();
    let (file, dirs) = segs.split_last()?;
    let stem = file_stem(file);

    if let Some(i) = dirs
        .windows(2)
        .position(|w| w[0] == "pages" && w[1] == "api")
    {
        let mut parts = dirs[i + 1..].to_vec();
        if stem != "index" {
            parts.push(stem);
        }
        return Some(join_route(&parts));
    }

    if matches!(stem, "route" | "+server") {
        let i = dirs.iter().position(|s| *s == "app" || *s == "routes")?;
        return Some(join_route(&dirs[i + 1..]));
    }
    None
}

static HANDLER_EXPORT: OnceLock<Regex> = OnceLock::new();

/// HTTP methods exported by an app-router handler file.
fn exported_methods(content: &str) -> Vec<String> {
    let re = HANDLER_EXPORT.get_or_init(|| {
        Regex::new(
            r"(?m)^\s*export\s+(?:async\s+)?(?:function|const)\s+(GET|POST|PUT|PATCH|DELETE|HEAD|OPTIONS)\b",
        )
        .expect("handler export pattern is valid")
    });
    re.captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

fn function_name(path: &str) -> String {
    let stem = file_stem(path);
    if matches!(stem, "index" | "handler" | "main") {
        dir_segments(path).last().unwrap_or(stem).to_string()
    } else {
        stem.to_string()
    }
}

fn is_source(path: &str) -> bool {
    extension(path).is_some_and(|e| SOURCE_EXTS.contains(&e.as_str()))
}

pub fn collect_inventory(search: &dyn SearchSource) -> Inventory {
    let mut inv = Inventory::default();

    for path in search.files() {
        if is_test_file(path) {
            continue;
        }

        if let Some(route) = api_file_route(path) {
            let methods = search
                .read(path)
                .map(|c| exported_methods(&c))
                .unwrap_or_default();
            if methods.is_empty() {
                inv.api_routes.push(ApiRoute {
                    method: "ANY".to_string(),
                    route,
                    path: path.clone(),
                    line: None,
                });
            } else {
                inv.api_routes.extend(methods.into_iter().map(|method| ApiRoute {
                    method,
                    route: route.clone(),
                    path: path.clone(),
                    line: None,
                }));
            }
            continue;
        }

        if let Some(route) = page_route(path) {
            inv.pages.push(item(route, path));
        } else if is_component_file(path) && !basename(path).contains(".stories.") {
            inv.components.push(item(file_stem(path), path));
        } else if is_source(path) {
            if dir_segments(path).any(|s| FUNCTION_DIRS.contains(&s)) {
                inv.functions.push(item(function_name(path), path));
            } else if dir_segments(path).any(|s| MODULE_DIRS.contains(&s)) {
                inv.modules.push(item(file_stem(path), path));
            }
        }
    }

    let pattern = route_line_pattern();
    for hit in search.grep(&pattern, ROUTE_EXTS) {
        if is_test_file(&hit.path) {
            continue;
        }
        if let Some(m) = extract_route(&hit.text) {
            inv.api_routes.push(ApiRoute {
                method: m.method,
                route: m.path,
                path: hit.path,
                line: Some(hit.line),
            });
        }
    }

    // files() is sorted; grep hits came after file-based routes
    inv.api_routes
        .sort_by(|a, b| a.path.cmp(&b.path).then(a.line.cmp(&b.line)));
    inv
}

/// A named presentation layer and its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub name: String,
    pub items: Vec<String>,
}

/// Pages, components, API routes, functions, services: always all five,
/// in that order.
pub fn architecture_layers(inv: &Inventory) -> Vec<Layer> {
    let names = |items: &[InventoryItem]| -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    };
    vec![
        Layer {
            name: "Pages".to_string(),
            items: names(&inv.pages),
        },
        Layer {
            name: "Components".to_string(),
            items: names(&inv.components),
        },
        Layer {
            name: "API routes".to_string(),
            items: inv.api_routes.iter().map(ApiRoute::label).collect(),
        },
        Layer {
            name: "Functions".to_string(),
            items: names(&inv.functions),
        },
        Layer {
            name: "Services".to_string(),
            items: names(&inv.modules),
        },
    ]
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod tests;
