//! Schedule generation endpoints.
//!
//! The search is CPU-bound and synchronous, so it runs on a blocking worker
//! thread; the runtime stays responsive while a large input is enumerated.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::generator::cache::RequestKey;
use crate::generator::{
    self, Course, Generation, GeneratorError, SearchLimits,
};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Request body for POST /generate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Fully populated course trees to combine.
    pub courses: Vec<Course>,
    /// Optional per-request override of the configured search limits.
    #[serde(default)]
    pub limits: Option<SearchLimits>,
    /// If true, bypass the result cache and recompute
    #[serde(default)]
    pub refresh: bool,
}

/// Converts GeneratorError to an API response.
fn generator_error_to_response(error: GeneratorError) -> Response {
    let (status, message) = match &error {
        GeneratorError::MalformedInput { .. } => {
            (StatusCode::BAD_REQUEST, "Malformed course data")
        }
        GeneratorError::Aborted { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Search aborted - too many possibilities",
        ),
    };

    ApiErrorType::from((status, message, Some(error.to_string()))).into_response()
}

fn generation_response(generation: &Generation, cached: bool) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "scheduleCount": generation.schedules.len(),
            "schedules": &generation.schedules,
            "stats": generation.stats,
            "cached": cached,
        })),
    )
        .into_response()
}

/// POST /generate
///
/// Generates every valid schedule for the submitted courses. A run that
/// finds no valid combination is a success with zero schedules; only
/// malformed input and aborted searches are errors.
pub async fn post_generate(
    State(s): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    info!(
        "POST /generate - {} courses (refresh={})",
        req.courses.len(),
        req.refresh
    );

    let limits = req.limits.unwrap_or(s.config.limits);

    let mut courses = req.courses;
    if let Err(e) = generator::validate_courses(&courses) {
        error!("Rejected generation request: {}", e);
        return generator_error_to_response(e);
    }

    // Fix low-branching courses first; shrinks the search tree early.
    generator::sort_courses_for_search(&mut courses);

    let key = RequestKey::from_request(&courses, &limits);
    if !req.refresh {
        if let Some(hit) = s.cache.get(&key) {
            info!("Cache hit for request {}", key);
            return generation_response(&hit, true);
        }
    }

    let result = tokio::task::spawn_blocking(move || generator::generate(&courses, &limits)).await;

    match result {
        Ok(Ok(generation)) => {
            s.cache.insert(key, generation.clone());
            generation_response(&generation, false)
        }
        Ok(Err(e)) => {
            error!("Schedule generation failed: {}", e);
            generator_error_to_response(e)
        }
        Err(e) => ApiErrorType::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Schedule generation task failed",
            Some(e.to_string()),
        ))
        .into_response(),
    }
}

/// GET /generate/cache_stats
///
/// Returns result-cache occupancy for monitoring.
pub async fn get_cache_stats(State(s): State<Arc<AppState>>) -> Response {
    let stats = s.cache.stats();
    (
        StatusCode::OK,
        Json(json!({
            "totalEntries": stats.total_entries,
            "activeEntries": stats.active_entries,
            "expiredEntries": stats.expired_entries,
        })),
    )
        .into_response()
}

/// POST /generate/invalidate_cache
///
/// Drops every cached generation result.
pub async fn post_invalidate_cache(State(s): State<Arc<AppState>>) -> Response {
    let dropped = s.cache.len();
    s.cache.clear();
    info!("Invalidated generation cache ({} entries)", dropped);

    (
        StatusCode::OK,
        Json(json!({ "invalidated": dropped })),
    )
        .into_response()
}
