use std::future::Future;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::AppState;
use crate::api::models::{ProfileRequest, ProfileResponse, SummaryResponse};
use crate::api::response;
use crate::error::Result;

const HANDLER_TIMEOUT: Duration = Duration::from_secs(60);

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/profile", post(profile_handler))
        .route("/api/profile/summary", post(summary_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn profile_handler(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Response {
    info!(profile_url = %req.profile_url, mock = req.mock, "Processing profile request");
    respond(fetch_profile(&state, &req)).await
}

async fn summary_handler(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Response {
    info!(profile_url = %req.profile_url, mock = req.mock, "Processing summary request");
    respond(summarize_profile(&state, &req)).await
}

/// Runs a handler body under the overall timeout and wraps the outcome in
/// the response envelope.
async fn respond<T, F>(work: F) -> Response
where
    T: Serialize,
    F: Future<Output = Result<T>>,
{
    let start_time = Instant::now();
    let result = tokio::time::timeout(HANDLER_TIMEOUT, work).await;
    let elapsed = start_time.elapsed();

    match result {
        Ok(Ok(data)) => {
            info!(?elapsed, "Request completed");
            response::success(data).into_response()
        }
        Ok(Err(err)) => {
            error!(?elapsed, error = %err, "Request failed");
            err.into_response()
        }
        Err(_) => {
            warn!(?elapsed, "Request timed out");
            response::error::<()>(StatusCode::REQUEST_TIMEOUT, "Request processing timed out")
                .into_response()
        }
    }
}

async fn fetch_profile(state: &AppState, req: &ProfileRequest) -> Result<ProfileResponse> {
    let person = state.fetcher.fetch(&req.profile_url, req.mock).await?;

    Ok(ProfileResponse {
        profile_url: req.profile_url.clone(),
        mock: req.mock,
        person,
        fetched_at: Utc::now(),
    })
}

async fn summarize_profile(state: &AppState, req: &ProfileRequest) -> Result<SummaryResponse> {
    let person = state.fetcher.fetch(&req.profile_url, req.mock).await?;
    let summary = state.generator.generate(person.as_ref()).await?;

    Ok(SummaryResponse {
        profile_url: req.profile_url.clone(),
        mock: req.mock,
        model: state.generator.model().to_string(),
        summary: summary.trim().to_string(),
        generated_at: Utc::now(),
    })
}
