use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tracing::instrument;

use crate::error::AppError;
use crate::schedule::{HtmlFetcher, ScheduleCache, ScheduleSnapshot};
use crate::server::render::render_schedule_page;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Set on responses served from an older snapshot because the refresh failed.
pub const REFRESH_ERROR_HEADER: &str = "x-refresh-error";

fn refresh_error_headers(snapshot: &ScheduleSnapshot) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(value) = snapshot
        .refresh_error
        .as_deref()
        .and_then(|error| HeaderValue::from_str(error).ok())
    {
        headers.insert(REFRESH_ERROR_HEADER, value);
    }
    headers
}

fn json_response(snapshot: &ScheduleSnapshot) -> Result<Response, AppError> {
    let body = serde_json::to_vec(snapshot.schedule.as_ref())?;
    Ok((
        refresh_error_headers(snapshot),
        [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        body,
    )
        .into_response())
}

/// `GET /schedule.json`
#[instrument(name = "schedule_json", skip_all)]
pub async fn schedule_json<F: HtmlFetcher>(
    State(cache): State<Arc<ScheduleCache<F>>>,
) -> Result<Response, AppError> {
    let snapshot = cache.get_schedule().await?;
    json_response(&snapshot)
}

/// `GET /`
#[instrument(name = "schedule_page", skip_all)]
pub async fn schedule_page<F: HtmlFetcher>(
    State(cache): State<Arc<ScheduleCache<F>>>,
) -> Result<Response, AppError> {
    let snapshot = cache.get_schedule().await?;
    Ok((
        refresh_error_headers(&snapshot),
        Html(render_schedule_page(&snapshot)),
    )
        .into_response())
}

/// `POST /refresh`
#[instrument(name = "refresh", skip_all)]
pub async fn refresh<F: HtmlFetcher>(
    State(cache): State<Arc<ScheduleCache<F>>>,
) -> Result<Response, AppError> {
    let snapshot = cache.force_refresh().await?;
    json_response(&snapshot)
}

#[instrument(name = "health")]
pub async fn health() -> StatusCode {
    StatusCode::OK
}
