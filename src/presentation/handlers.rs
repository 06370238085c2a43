// HTTP request handlers
use crate::application::air_quality_api::{ApiError, GraphQuery};
use crate::application::entry_session::FetchState;
use crate::domain::report::SensorQuery;
use crate::presentation::app_state::AppState;
use crate::presentation::view::SensorEntryView;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphParams {
    pub log_time: String,
    /// Comma-separated sensor ids
    pub sensors: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate, StatusCode> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| StatusCode::BAD_REQUEST)
}

/// Upstream 4xx codes are passed through, anything else is a gateway failure.
fn upstream_status(err: &ApiError) -> StatusCode {
    match err.status_code().and_then(|code| StatusCode::from_u16(code).ok()) {
        Some(code) if code.is_client_error() => code,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn proxied(result: Result<Value, ApiError>) -> Result<Json<Value>, StatusCode> {
    result.map(Json).map_err(|e| {
        tracing::warn!("Backend request failed: {}", e);
        upstream_status(&e)
    })
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Select a date for a sensor page; the fetch resolves in the background
pub async fn select_date(
    Path((user_id, sensor_id)): Path<(String, String)>,
    Query(query): Query<DateQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, StatusCode> {
    let date = parse_date(&query.date)?;
    let (session, ticket) = state.sessions.select(&user_id, &sensor_id, date).await;

    tokio::spawn(async move {
        session.resolve(ticket).await;
    });

    Ok(StatusCode::ACCEPTED)
}

/// Current state of a sensor page
pub async fn session_view(
    Path((user_id, sensor_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SensorEntryView>, StatusCode> {
    let session = state
        .sessions
        .find(&user_id, &sensor_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(session.snapshot().await.into()))
}

/// One-shot report for a sensor and date
pub async fn sensor_report(
    Path((user_id, sensor_id)): Path<(String, String)>,
    Query(query): Query<DateQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SensorEntryView>), StatusCode> {
    let date = parse_date(&query.date)?;
    let query = SensorQuery::new(user_id, sensor_id, date);

    let (status, fetch_state) = match state.report_service.load_report(&query).await {
        Ok(report) => (StatusCode::OK, FetchState::Ready(report)),
        Err(e) => {
            tracing::warn!("Report for sensor {} on {} failed: {}", query.sensor_id, date, e);
            (StatusCode::BAD_GATEWAY, FetchState::Error)
        }
    };

    Ok((status, Json(SensorEntryView::from_state(Some(date), &fetch_state))))
}

pub async fn sensor_list(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, StatusCode> {
    proxied(state.api.sensor_list(&user_id).await)
}

pub async fn main_summary(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, StatusCode> {
    proxied(state.api.main_summary(&user_id).await)
}

pub async fn user_profile(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, StatusCode> {
    proxied(state.api.user_profile(&user_id).await)
}

pub async fn user_list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, StatusCode> {
    proxied(state.api.user_list().await)
}

/// Time series for one or more sensors
pub async fn graph(
    Path((collection, attribute)): Path<(String, String)>,
    Query(params): Query<GraphParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, StatusCode> {
    let sensor_ids: Vec<String> = params
        .sensors
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();
    if sensor_ids.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let query = GraphQuery {
        collection,
        log_time: params.log_time,
        sensor_ids,
        attribute,
    };
    proxied(state.api.time_series(&query).await)
}
