use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    intervals::{self, IntervalsClient},
    state::AppState,
    strava::{client::unix_date_range, ApiError, StravaClient},
};

#[derive(Debug, Deserialize)]
pub struct StravaActivitiesParams {
    pub access_token: Option<String>,
    pub days: Option<i64>,
}

fn iso(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|when| when.to_rfc3339())
        .unwrap_or_default()
}

/// `GET /api/strava/activities?access_token=xxx&days=30`
///
/// Pass-through over Strava's activity list. The caller supplies the access
/// token; upstream auth and rate-limit errors keep their status codes.
pub async fn strava_activities(
    State(state): State<AppState>,
    Query(params): Query<StravaActivitiesParams>,
) -> Response {
    let Some(access_token) = params.access_token.filter(|t| !t.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Missing access token",
                "message": "Please provide a Strava access token via ?access_token=xxx query parameter",
                "howToGetToken": "Connect your account at /connect, or create an app at https://www.strava.com/settings/api",
            })),
        )
            .into_response();
    };

    let days = params.days.unwrap_or(30);
    let (after, before) = unix_date_range(days);

    info!("Fetching Strava activities from last {days} days");

    let client = StravaClient::new(&state.http, &state.strava, &access_token);
    match client.get_activities(1, 200, Some(before), Some(after)).await {
        Ok(activities) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": activities.len(),
                "dateRange": {
                    "after": iso(after),
                    "before": iso(before),
                    "days": days,
                },
                "activities": activities,
            })),
        )
            .into_response(),
        Err(ApiError::Status { status, body }) => {
            error!(%status, "Strava API rejected the activities request");
            match status {
                reqwest::StatusCode::UNAUTHORIZED => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "Unauthorized",
                        "message": "Invalid or expired Strava access token",
                        "details": body,
                    })),
                )
                    .into_response(),
                reqwest::StatusCode::TOO_MANY_REQUESTS => (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": "Rate limit exceeded",
                        "message": "Strava API rate limit exceeded. Try again later.",
                        "details": body,
                    })),
                )
                    .into_response(),
                other => (
                    StatusCode::from_u16(other.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
                    Json(json!({
                        "error": "Strava API error",
                        "message": body.get("message").and_then(|m| m.as_str()).unwrap_or("Unknown error from Strava"),
                        "status": other.as_u16(),
                        "details": body,
                    })),
                )
                    .into_response(),
            }
        }
        Err(err) => {
            error!(error = %err, "Error fetching activities from Strava");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch activities",
                    "message": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DaysParams {
    pub days: Option<i64>,
}

fn intervals_unconfigured() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "error": "Intervals.icu not configured",
            "message": "Please add INTERVALS_ICU_API_KEY and INTERVALS_ICU_ATHLETE_ID environment variables",
        })),
    )
        .into_response()
}

/// `GET /api/intervals/activities?days=90`
pub async fn intervals_activities(
    State(state): State<AppState>,
    Query(params): Query<DaysParams>,
) -> Response {
    let Some(config) = &state.intervals else {
        return intervals_unconfigured();
    };

    let days = params.days.unwrap_or(90);
    let (oldest, newest) = intervals::date_range(days);

    info!("Fetching activities from {oldest} to {newest}");

    let client = IntervalsClient::new(&state.http, config);
    match client.get_activities(&oldest, &newest).await {
        Ok(activities) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": activities.len(),
                "dateRange": { "oldest": oldest, "newest": newest },
                "activities": activities,
            })),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Error fetching activities from Intervals.icu");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch activities",
                    "message": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// `GET /api/intervals/fitness?days=30`
///
/// Returns the CTL/ATL/TSB curve plus the most recent entry for convenience.
pub async fn intervals_fitness(
    State(state): State<AppState>,
    Query(params): Query<DaysParams>,
) -> Response {
    let Some(config) = &state.intervals else {
        return intervals_unconfigured();
    };

    let days = params.days.unwrap_or(30);
    let (oldest, newest) = intervals::date_range(days);

    info!("Fetching fitness data from {oldest} to {newest}");

    let client = IntervalsClient::new(&state.http, config);
    match client.get_fitness(&oldest, &newest).await {
        Ok(data) => {
            let latest = data.last().cloned();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "count": data.len(),
                    "dateRange": { "oldest": oldest, "newest": newest },
                    "latest": latest,
                    "data": data,
                })),
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "Error fetching fitness data from Intervals.icu");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to fetch fitness data",
                    "message": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}
