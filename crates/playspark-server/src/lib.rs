pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod state;
pub mod storage;

use axum::Router;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let state = AppState::new(config);
    (router(state.clone()), state)
}

/// Router over an existing state (lets callers supply their own store).
pub fn router(state: AppState) -> Router<()> {
    let api_routes = Router::new()
        .route("/voice/process", post(api::process_voice))
        .route("/construction/step", post(api::construction_step))
        .route("/encouragement", get(api::encouragement))
        .route("/games/recent", get(api::recent_games))
        .route("/games/{id}", get(api::get_game));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&state.config.web_root))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
