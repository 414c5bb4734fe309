use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Protected API routes — require Bearer token when API_TOKEN is set
    let protected = Router::new()
        // Trades
        .route("/api/trades", get(handlers::trades::list).post(handlers::trades::create))
        .route(
            "/api/trades/:id",
            put(handlers::trades::update).delete(handlers::trades::delete),
        )
        // Analytics
        .route("/api/analytics/overview", get(handlers::analytics::overview))
        .route("/api/analytics/daily", get(handlers::analytics::daily))
        .route("/api/analytics/weekly", get(handlers::analytics::weekly))
        .route("/api/analytics/equity-curve", get(handlers::analytics::equity_curve))
        .route("/api/analytics/setups", get(handlers::analytics::setups))
        // Growth challenge
        .route(
            "/api/challenge",
            get(handlers::challenge::get).put(handlers::challenge::update),
        )
        .route("/api/challenge/archive", post(handlers::challenge::archive))
        .route("/api/challenge/history", get(handlers::challenge::history))
        // Journal profile (managed labels)
        .route("/api/profile", get(handlers::profile::get))
        .route("/api/profile/setup-stats", get(handlers::profile::setup_stats))
        .route(
            "/api/profile/setups",
            post(handlers::profile::add_setup)
                .put(handlers::profile::rename_setup)
                .delete(handlers::profile::remove_setup),
        )
        .route(
            "/api/profile/rules",
            post(handlers::profile::add_rule).delete(handlers::profile::remove_rule),
        )
        .route(
            "/api/profile/mistakes",
            post(handlers::profile::add_mistake).delete(handlers::profile::remove_mistake),
        )
        // LLM coach
        .route("/api/coach/analysis", post(handlers::coach::analyze))
        // WebSocket
        .route("/ws", get(handlers::ws::handler))
        .layer(middleware::from_fn(require_auth));

    // CORS: allow same-origin + local dashboard origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
