//! Mock Intervals.icu server: athlete activities and the fitness curve.

use axum::{extract::Path, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tracing::info;

pub fn router() -> Router {
    Router::new()
        .route("/athlete/:id", get(athlete))
        .route("/athlete/:id/activities", get(activities))
        .route("/athlete/:id/fitness", get(fitness))
}

async fn athlete(Path(id): Path<String>) -> impl IntoResponse {
    Json(json!({
        "id": id,
        "name": "Jane Doe",
        "timezone": "Europe/Brussels"
    }))
}

async fn activities(Path(id): Path<String>) -> impl IntoResponse {
    info!(athlete = %id, "Intervals fixture: activities requested");

    Json(json!([
        {
            "id": "i1001",
            "name": "Morning Endurance Ride",
            "type": "Ride",
            "start_date_local": "2025-06-01T09:00:00",
            "distance": 56300.0,
            "moving_time": 7200,
            "icu_training_load": 145.0,
            "icu_intensity": 0.88,
            "avg_watts": 220.0,
            "weighted_avg_watts": 228.0,
            "avg_hr": 139.0,
            "calories": 1540.0
        },
        {
            "id": "i1002",
            "name": "VO2max Intervals",
            "type": "Ride",
            "start_date_local": "2025-06-03T18:00:00",
            "distance": 32100.0,
            "moving_time": 4500,
            "icu_training_load": 98.0,
            "icu_intensity": 1.02,
            "avg_watts": 248.0
        }
    ]))
}

async fn fitness(Path(id): Path<String>) -> impl IntoResponse {
    info!(athlete = %id, "Intervals fixture: fitness requested");

    Json(json!([
        { "date": "2025-06-01", "ctl": 52.1, "atl": 58.4, "tsb": -6.3, "ramp_rate": 1.2 },
        { "date": "2025-06-02", "ctl": 53.0, "atl": 60.2, "tsb": -7.2, "ramp_rate": 1.3 },
        { "date": "2025-06-03", "ctl": 54.2, "atl": 61.0, "tsb": -6.8, "ramp_rate": 1.4 }
    ]))
}
