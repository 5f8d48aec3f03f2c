use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::StravaConfig;

/// Summary activity as returned by `GET /athlete/activities`.
///
/// Only the fields the app reads are typed; everything else Strava sends is
/// kept in `extra` so the JSON proxy can return the payload unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StravaActivity {
    pub id: i64,
    pub name: String,
    /// meters
    pub distance: f64,
    /// seconds
    pub moving_time: i64,
    /// seconds
    pub elapsed_time: i64,
    /// meters
    pub total_elevation_gain: f64,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub sport_type: String,
    pub start_date: String,
    pub start_date_local: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_watts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_average_watts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilojoules: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cadence: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StravaAthlete {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Strava request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Strava returned {status}")]
    Status {
        status: reqwest::StatusCode,
        body: Value,
    },
}

/// Thin client over the Strava v3 API, borrowing the app's shared HTTP
/// client. One instance per request; the access token comes from the caller.
pub struct StravaClient<'a> {
    http: &'a reqwest::Client,
    api_base: &'a str,
    access_token: &'a str,
}

impl<'a> StravaClient<'a> {
    pub fn new(http: &'a reqwest::Client, config: &'a StravaConfig, access_token: &'a str) -> Self {
        Self {
            http,
            api_base: &config.api_base,
            access_token,
        }
    }

    /// Get the authenticated athlete
    pub async fn get_athlete(&self) -> Result<StravaAthlete, ApiError> {
        let url = format!("{}/athlete", self.api_base);
        self.get_json(self.http.get(url)).await
    }

    /// Get athlete activities. `before`/`after` are unix timestamps;
    /// `per_page` maxes out at 200 on Strava's side.
    pub async fn get_activities(
        &self,
        page: u32,
        per_page: u32,
        before: Option<i64>,
        after: Option<i64>,
    ) -> Result<Vec<StravaActivity>, ApiError> {
        let url = format!("{}/athlete/activities", self.api_base);
        let mut request = self
            .http
            .get(url)
            .query(&[("page", page), ("per_page", per_page)]);

        if let Some(before) = before {
            request = request.query(&[("before", before)]);
        }
        if let Some(after) = after {
            request = request.query(&[("after", after)]);
        }

        self.get_json(request).await
    }

    /// Get a single detailed activity by id
    pub async fn get_activity(&self, activity_id: i64) -> Result<Value, ApiError> {
        let url = format!("{}/activities/{}", self.api_base, activity_id);
        self.get_json(self.http.get(url)).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.bearer_auth(self.access_token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Value::Null);
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

/// Unix-timestamp range covering the last `days` days, as `(after, before)`.
pub fn unix_date_range(days: i64) -> (i64, i64) {
    let before = Utc::now().timestamp();
    let after = before - days * 24 * 60 * 60;

    (after, before)
}

/// Training Stress Score from normalized power, duration and FTP:
/// `(seconds * NP * IF) / (FTP * 3600) * 100` where `IF = NP / FTP`.
/// Returns 0 when any input is missing or non-positive.
pub fn calculate_tss(normalized_power: f64, duration_secs: f64, ftp: f64) -> i64 {
    if normalized_power <= 0.0 || duration_secs <= 0.0 || ftp <= 0.0 {
        return 0;
    }

    let intensity_factor = normalized_power / ftp;
    let tss = (duration_secs * normalized_power * intensity_factor) / (ftp * 3600.0) * 100.0;

    tss.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_date_range_spans_requested_days() {
        let (after, before) = unix_date_range(30);

        assert_eq!(before - after, 30 * 24 * 60 * 60);
        assert!(before <= Utc::now().timestamp());
    }

    #[test]
    fn test_calculate_tss_one_hour_at_ftp_is_100() {
        assert_eq!(calculate_tss(250.0, 3600.0, 250.0), 100);
    }

    #[test]
    fn test_calculate_tss_scales_with_intensity() {
        // Two hours at 88% of FTP, the dashboard's canonical example.
        let tss = calculate_tss(220.0, 7200.0, 250.0);
        assert_eq!(tss, 155);
    }

    #[test]
    fn test_calculate_tss_zero_inputs() {
        assert_eq!(calculate_tss(0.0, 3600.0, 250.0), 0);
        assert_eq!(calculate_tss(250.0, 0.0, 250.0), 0);
        assert_eq!(calculate_tss(250.0, 3600.0, 0.0), 0);
    }

    #[test]
    fn test_activity_round_trips_unknown_fields() {
        let body = r#"{
            "id": 1,
            "name": "Morning Ride",
            "distance": 40230.5,
            "moving_time": 5400,
            "elapsed_time": 5640,
            "total_elevation_gain": 320.0,
            "type": "Ride",
            "sport_type": "Ride",
            "start_date": "2025-06-01T07:00:00Z",
            "start_date_local": "2025-06-01T09:00:00Z",
            "average_watts": 210.0,
            "kudos_count": 12,
            "trainer": false
        }"#;

        let activity: StravaActivity = serde_json::from_str(body).unwrap();
        assert_eq!(activity.activity_type, "Ride");
        assert_eq!(activity.average_watts, Some(210.0));

        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["kudos_count"], 12);
        assert_eq!(value["trainer"], false);
        assert_eq!(value["type"], "Ride");
    }
}
