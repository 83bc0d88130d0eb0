use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use orgtree_api::{config, database::DatabaseManager};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting orgtree API in {:?} mode", config.environment);

    tracing_subscriber::fmt::init();

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("ORGTREE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🌳 orgtree API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // API
        .merge(role_routes())
        .merge(organization_routes())
        .merge(hierarchy_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(
            config::config().api.max_request_size_bytes,
        ))
}

fn role_routes() -> Router {
    use axum::routing::{post, put};
    use orgtree_api::handlers::roles;

    Router::new()
        .route("/api/companies/:company_id/roles", get(roles::list))
        .route("/api/roles", post(roles::create))
        .route("/api/roles/:id", put(roles::update).delete(roles::delete))
}

fn organization_routes() -> Router {
    use axum::routing::{post, put};
    use orgtree_api::handlers::organizations;

    Router::new()
        .route(
            "/api/companies/:company_id/organizations",
            get(organizations::list),
        )
        .route("/api/organizations", post(organizations::create))
        .route(
            "/api/organizations/:id",
            put(organizations::update).delete(organizations::delete),
        )
}

fn hierarchy_routes() -> Router {
    use orgtree_api::handlers::role_tree;

    Router::new().route(
        "/api/organizations/:id/role-tree",
        get(role_tree::get).post(role_tree::save),
    )
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        // Development default: any origin
        return CorsLayer::permissive();
    }
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "orgtree API",
            "version": version,
            "description": "Organization role hierarchy service built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "roles": "/api/companies/:company_id/roles, /api/roles[/:id]",
                "organizations": "/api/companies/:company_id/organizations, /api/organizations[/:id]",
                "role_tree": "/api/organizations/:id/role-tree (GET load, POST replace)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
