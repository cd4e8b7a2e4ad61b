pub mod routes;
pub mod ws;

use crate::state::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;

/// Axum HTTP + WS router: JSON API under /api, static dashboard elsewhere.
pub fn router(state: Arc<AppState>) -> Router {
    let dashboard = state.config.dashboard_dir.clone();

    Router::new()
        .route("/api/state", get(routes::get_state))
        .route("/api/view", get(routes::get_view))
        .route("/api/sweep", get(routes::get_sweep))
        .route("/api/fields", get(routes::get_fields))
        .route("/api/params/{field}", put(routes::put_param))
        .route("/api/reset", post(routes::post_reset))
        .route("/api/presets", get(routes::get_presets))
        .route("/api/presets/{name}", post(routes::post_preset))
        .route("/api/panels", get(routes::get_panels))
        .route("/api/panels/{panel}", get(routes::get_panel))
        .route("/api/counters", get(routes::get_counters))
        .route("/ws", get(ws::ws_handler))
        .fallback_service(
            tower_http::services::ServeDir::new(&dashboard)
                .fallback(tower_http::services::ServeFile::new(dashboard.join("index.html"))),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
