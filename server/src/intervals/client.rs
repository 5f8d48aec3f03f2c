use base64::Engine as _;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::IntervalsConfig;

/// Activity as returned by `GET /athlete/{id}/activities`. Intervals.icu
/// computes training load server-side, so the interesting numbers come back
/// ready-made; unknown fields are preserved in `extra` for the proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalsActivity {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub start_date_local: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_elevation_gain: Option<f64>,
    /// TSS as computed by Intervals.icu
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icu_training_load: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icu_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_watts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_avg_watts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_hr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One day of the CTL/ATL/TSB fitness curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalsFitness {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramp_rate: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Thin client over the Intervals.icu v1 API. Authentication is HTTP Basic
/// with the literal username `API_KEY` and the key as password.
pub struct IntervalsClient<'a> {
    http: &'a reqwest::Client,
    config: &'a IntervalsConfig,
}

impl<'a> IntervalsClient<'a> {
    pub fn new(http: &'a reqwest::Client, config: &'a IntervalsConfig) -> Self {
        Self { http, config }
    }

    fn basic_credential(&self) -> String {
        let raw = format!("API_KEY:{}", self.config.api_key);
        base64::engine::general_purpose::STANDARD.encode(raw)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        range: Option<(&str, &str)>,
    ) -> Result<T, reqwest::Error> {
        let url = format!("{}{}", self.config.api_base, path);
        let mut request = self
            .http
            .get(url)
            .header("Authorization", format!("Basic {}", self.basic_credential()));

        if let Some((oldest, newest)) = range {
            request = request.query(&[("oldest", oldest), ("newest", newest)]);
        }

        request.send().await?.error_for_status()?.json().await
    }

    /// Get activities between two ISO dates (inclusive)
    pub async fn get_activities(
        &self,
        oldest: &str,
        newest: &str,
    ) -> Result<Vec<IntervalsActivity>, reqwest::Error> {
        let path = format!("/athlete/{}/activities", self.config.athlete_id);
        self.get(&path, Some((oldest, newest))).await
    }

    /// Get the fitness curve (CTL, ATL, TSB) between two ISO dates
    pub async fn get_fitness(
        &self,
        oldest: &str,
        newest: &str,
    ) -> Result<Vec<IntervalsFitness>, reqwest::Error> {
        let path = format!("/athlete/{}/fitness", self.config.athlete_id);
        self.get(&path, Some((oldest, newest))).await
    }

    /// Get athlete information
    pub async fn get_athlete(&self) -> Result<Value, reqwest::Error> {
        let path = format!("/athlete/{}", self.config.athlete_id);
        self.get(&path, None).await
    }
}

/// ISO-date range covering the last `days` days, as `(oldest, newest)`.
pub fn date_range(days: i64) -> (String, String) {
    let newest = Utc::now().date_naive();
    let oldest = newest - Duration::days(days);

    (
        oldest.format("%Y-%m-%d").to_string(),
        newest.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_format() {
        let (oldest, newest) = date_range(90);

        assert_eq!(oldest.len(), 10);
        assert_eq!(newest.len(), 10);
        assert!(oldest < newest);
    }

    #[test]
    fn test_basic_credential_encoding() {
        let config = IntervalsConfig {
            api_key: "k3y".to_string(),
            athlete_id: "i12345".to_string(),
            api_base: "https://intervals.icu/api/v1".to_string(),
        };
        let http = reqwest::Client::new();
        let client = IntervalsClient::new(&http, &config);

        // echo -n 'API_KEY:k3y' | base64
        assert_eq!(client.basic_credential(), "QVBJX0tFWTprM3k=");
    }

    #[test]
    fn test_fitness_parses_sparse_rows() {
        let body = r#"[{"date": "2025-06-01", "ctl": 54.2, "atl": 61.0, "tsb": -6.8},
                       {"date": "2025-06-02"}]"#;

        let rows: Vec<IntervalsFitness> = serde_json::from_str(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ctl, Some(54.2));
        assert_eq!(rows[1].ctl, None);
    }
}
