pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::access_gate;
use crate::state::AppState;

/// Build the full application router.
///
/// Every route, the static fallback included, sits behind the Access Gate.
pub fn app(state: AppState) -> Router {
    let public_dir = state.config.server.public_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(catalog_routes())
        .merge(session_routes())
        .merge(admin_routes())
        .fallback_service(ServeDir::new(public_dir))
        // Global middleware
        .layer(from_fn_with_state(state.clone(), access_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    use handlers::public::{properties, states};

    Router::new()
        .route("/api/properties", get(properties::search))
        .route("/api/properties/:id", get(properties::show))
        .route("/api/states", get(states::list))
}

fn session_routes() -> Router<AppState> {
    use handlers::public::session;

    Router::new()
        .route("/api/auth/login", post(session::login))
        .route("/api/auth/me", get(session::me))
        .route("/api/auth/logout", post(session::logout))
}

fn admin_routes() -> Router<AppState> {
    use handlers::admin::properties;

    Router::new()
        .route("/api/admin/properties", get(properties::list).post(properties::create))
        .route(
            "/api/admin/properties/:id",
            put(properties::update).delete(properties::deactivate),
        )
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "error": "database unavailable" })),
            )
        }
    }
}
