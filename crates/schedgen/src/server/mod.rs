use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{generate, status};
use crate::types::AppState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Generation endpoints, including cache management
    let generate_router = Router::new()
        .route("/generate", post(generate::post_generate))
        .route("/generate/cache_stats", get(generate::get_cache_stats))
        .route(
            "/generate/invalidate_cache",
            post(generate::post_invalidate_cache),
        );

    Router::new()
        .route("/health", get(status::get_health))
        .merge(generate_router)
        .with_state(app_state)
}
