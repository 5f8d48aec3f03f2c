//! Mock Strava server: the OAuth token endpoint plus a slice of the v3 API.
//!
//! The token endpoint picks its behavior from the submitted code so tests can
//! drive every branch: `401` answers 401, `malformed` answers 200 with a body
//! missing required fields, anything else succeeds.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Clone, Default)]
pub struct StravaFixture {
    /// Number of calls the token endpoint has received.
    pub token_hits: Arc<AtomicUsize>,
}

impl StravaFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_hit_count(&self) -> usize {
        self.token_hits.load(Ordering::SeqCst)
    }
}

pub fn router(state: StravaFixture) -> Router {
    Router::new()
        .route("/oauth/token", post(token))
        .route("/api/v3/athlete", get(athlete))
        .route("/api/v3/athlete/activities", get(activities))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct TokenRequest {
    client_id: String,
    client_secret: String,
    code: String,
    grant_type: String,
}

async fn token(
    State(state): State<StravaFixture>,
    Json(request): Json<TokenRequest>,
) -> impl IntoResponse {
    state.token_hits.fetch_add(1, Ordering::SeqCst);
    info!(
        code = %request.code,
        client_id = %request.client_id,
        "Strava fixture: token exchange requested"
    );

    if request.grant_type != "authorization_code" || request.client_secret.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": "Bad Request",
                "errors": [{"resource": "Application", "field": "grant_type", "code": "invalid"}]
            })),
        );
    }

    match request.code.as_str() {
        "401" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "message": "Bad Request",
                "errors": [{"resource": "Application", "field": "code", "code": "invalid"}]
            })),
        ),
        "malformed" => (
            StatusCode::OK,
            Json(json!({ "token_type": "Bearer", "expires_in": 21600 })),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({
                "token_type": "Bearer",
                "expires_at": 1700000000,
                "expires_in": 21600,
                "refresh_token": "ref1",
                "access_token": "tok1",
                "athlete": {
                    "id": 42,
                    "username": "jdoe",
                    "firstname": "Jane",
                    "lastname": "Doe",
                    "city": "Gent",
                    "country": "Belgium"
                }
            })),
        ),
    }
}

async fn athlete() -> impl IntoResponse {
    Json(json!({
        "id": 42,
        "username": "jdoe",
        "firstname": "Jane",
        "lastname": "Doe",
        "city": "Gent",
        "country": "Belgium"
    }))
}

async fn activities() -> impl IntoResponse {
    info!("Strava fixture: activities requested");

    Json(json!([
        {
            "id": 1001,
            "name": "Morning Endurance Ride",
            "distance": 56300.0,
            "moving_time": 7200,
            "elapsed_time": 7420,
            "total_elevation_gain": 410.0,
            "type": "Ride",
            "sport_type": "Ride",
            "start_date": "2025-06-01T07:00:00Z",
            "start_date_local": "2025-06-01T09:00:00Z",
            "average_speed": 7.8,
            "average_watts": 220.0,
            "weighted_average_watts": 228.0,
            "kudos_count": 12,
            "trainer": false
        },
        {
            "id": 1002,
            "name": "Recovery Spin",
            "distance": 18700.0,
            "moving_time": 2700,
            "elapsed_time": 2750,
            "total_elevation_gain": 55.0,
            "type": "Ride",
            "sport_type": "Ride",
            "start_date": "2025-06-02T17:30:00Z",
            "start_date_local": "2025-06-02T19:30:00Z",
            "average_speed": 6.9,
            "kudos_count": 3,
            "trainer": true
        }
    ]))
}
