use super::*;
use crate::search::tests::MemorySearch;

#[test]
fn component_files() {
    assert!(is_component_file("src/components/NavBar.vue"));
    assert!(is_component_file("src/Widget.svelte"));
    assert!(is_component_file("src/ui/Button.tsx"));
    assert!(is_component_file("src/components/card.jsx"));
    assert!(!is_component_file("src/utils/format.tsx"));
    assert!(!is_component_file("src/routes/+page.svelte"));
    assert!(!is_component_file("src/api.ts"));
    assert!(!is_component_file("Makefile"));
}

#[test]
fn page_routes() {
    assert_eq!(page_route("pages/index.vue").as_deref(), Some("/"));
    assert_eq!(page_route("src/pages/blog/index.tsx").as_deref(), Some("/blog"));
    assert_eq!(page_route("pages/about.jsx").as_deref(), Some("/about"));
    assert_eq!(page_route("pages/_app.tsx"), None);
    assert_eq!(page_route("pages/api/users.ts"), None);
    assert_eq!(
        page_route("app/(marketing)/pricing/page.tsx").as_deref(),
        Some("/pricing")
    );
    assert_eq!(page_route("app/page.tsx").as_deref(), Some("/"));
    assert_eq!(
        page_route("src/routes/docs/+page.svelte").as_deref(),
        Some("/docs")
    );
    assert_eq!(page_route("src/components/Page.tsx"), None);
}

#[test]
fn api_file_routes() {
    assert_eq!(
        api_file_route("pages/api/users/[id].ts").as_deref(),
        Some("/api/users/[id]")
    );
    assert_eq!(api_file_route("pages/api/index.ts").as_deref(), Some("/api"));
    assert_eq!(
        api_file_route("app/api/orders/route.ts").as_deref(),
        Some("/api/orders")
    );
    assert_eq!(
        api_file_route("src/routes/api/health/+server.ts").as_deref(),
        Some("/api/health")
    );
    assert_eq!(api_file_route("src/server/routes.ts"), None);
}

fn project() -> MemorySearch {
    MemorySearch::new(&[
        ("app/api/orders/route.ts", "export async function GET() {}\nexport async function POST() {}"),
        ("app/dashboard/page.tsx", "export default function Page() {}"),
        ("pages/api/ping.ts", "export default (req, res) => res.end()"),
        ("src/components/NavBar.vue", "<template/>"),
        ("src/components/NavBar.stories.tsx", ""),
        ("src/components/NavBar.test.tsx", ""),
        ("src/services/billing.ts", "export const charge = () => {}"),
        ("src/hooks/useAuth.ts", ""),
        ("netlify/functions/send-email/index.ts", ""),
        ("server/app.js", "app.get('/health', ok);\nrouter.post(\"/login\", login);"),
        ("README.md", "app.get('/not-code', x)"),
    ])
}

#[test]
fn inventory_of_a_project() {
    let inv = collect_inventory(&project());

    let names = |items: &[InventoryItem]| -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    };
    assert_eq!(names(&inv.components), vec!["NavBar"]);
    assert_eq!(names(&inv.pages), vec!["/dashboard"]);
    assert_eq!(names(&inv.modules), vec!["useAuth", "billing"]);
    assert_eq!(names(&inv.functions), vec!["send-email"]);

    let routes: Vec<String> = inv.api_routes.iter().map(ApiRoute::label).collect();
    assert_eq!(
        routes,
        vec![
            "GET /api/orders",
            "POST /api/orders",
            "ANY /api/ping",
            "GET /health",
            "POST /login",
        ]
    );
    assert_eq!(inv.api_routes[3].line, Some(1));
    assert_eq!(inv.api_routes[0].line, None);
}

#[test]
fn layers_are_fixed_and_ordered() {
    let layers = architecture_layers(&collect_inventory(&project()));
    let order: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        order,
        vec!["Pages", "Components", "API routes", "Functions", "Services"]
    );
    assert_eq!(layers[2].items.len(), 5);

    let empty = architecture_layers(&Inventory::default());
    assert_eq!(empty.len(), 5);
    assert!(empty.iter().all(|l| l.items.is_empty()));
}
