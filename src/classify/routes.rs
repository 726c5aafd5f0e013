//! Route extraction from decorator-like and router-call lines.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub method: String,
    pub path: String,
}

static ROUTER_CALL: OnceLock<Regex> = OnceLock::new();
static MAPPING: OnceLock<Regex> = OnceLock::new();

/// `app.get('/x')`, `router.post("/x")`, `@app.route("/x")`, `@bp.get("/x")`.
fn router_call() -> &'static Regex {
    ROUTER_CALL.get_or_init(|| {
        Regex::new(
            r#"(?i)\b(?:app|router|api|bp|blueprint|server|routes|r)\.(get|post|put|patch|delete|all|route)\s*\(\s*["'`](/[^"'`]*)["'`]"#,
        )
        .expect("router call pattern is valid")
    })
}

/// `@GetMapping("/x")`, `@Post('/x')`, `@RequestMapping(value = "/x")`.
fn mapping() -> &'static Regex {
    MAPPING.get_or_init(|| {
        Regex::new(
            r#"@(Get|Post|Put|Patch|Delete|Request)(?:Mapping)?\s*\(\s*(?:(?:value|path)\s*=\s*)?["'](/[^"']*)["']"#,
        )
        .expect("mapping pattern is valid")
    })
}

/// Pattern that pre-filters lines worth handing to [`extract_route`].
pub fn route_line_pattern() -> Regex {
    Regex::new(
        r#"(?i)(?:\.(?:get|post|put|patch|delete|all|route)\s*\(\s*["'`]/|@(?:get|post|put|patch|delete|request)(?:mapping)?\s*\()"#,
    )
    .expect("route line pattern is valid")
}

/// Pull the HTTP method and quoted route path out of a source line.
/// `route` / `all` / `Request` map to `ANY`.
pub fn extract_route(line: &str) -> Option<RouteMatch> {
    let caps = router_call()
        .captures(line)
        .or_else(|| mapping().captures(line))?;
    let verb = caps.get(1)?.as_str().to_ascii_uppercase();
    let method = match verb.as_str() {
        "ROUTE" | "ALL" | "REQUEST" => "ANY".to_string(),
        _ => verb,
    };
    Some(RouteMatch {
        method,
        path: caps.get(2)?.as_str().to_string(),
    })
}
