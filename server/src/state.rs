use std::env;
use std::time::Duration;

use color_eyre::eyre::{eyre, WrapErr};

/// Strava application credentials and endpoint URLs.
///
/// Endpoint URLs default to the public Strava endpoints; the overrides exist
/// so the fixture servers can stand in during tests.
#[derive(Clone)]
pub struct StravaConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorize_url: String,
    pub token_url: String,
    pub api_base: String,
}

impl StravaConfig {
    pub fn from_env() -> color_eyre::Result<Self> {
        let client_id = env::var("STRAVA_CLIENT_ID")
            .map_err(|_| eyre!("STRAVA_CLIENT_ID environment variable not set"))?;
        let client_secret = env::var("STRAVA_CLIENT_SECRET")
            .map_err(|_| eyre!("STRAVA_CLIENT_SECRET environment variable not set"))?;

        Ok(Self {
            client_id,
            client_secret,
            authorize_url: env::var("STRAVA_AUTHORIZE_URL")
                .unwrap_or_else(|_| "https://www.strava.com/oauth/authorize".to_string()),
            token_url: env::var("STRAVA_TOKEN_URL")
                .unwrap_or_else(|_| "https://www.strava.com/oauth/token".to_string()),
            api_base: env::var("STRAVA_API_BASE")
                .unwrap_or_else(|_| "https://www.strava.com/api/v3".to_string()),
        })
    }
}

/// Intervals.icu credentials. Optional: when absent, the Intervals.icu
/// endpoints answer 503 instead of failing startup.
#[derive(Clone)]
pub struct IntervalsConfig {
    pub api_key: String,
    pub athlete_id: String,
    pub api_base: String,
}

impl IntervalsConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("INTERVALS_ICU_API_KEY").ok()?;
        let athlete_id = env::var("INTERVALS_ICU_ATHLETE_ID").ok()?;

        Some(Self {
            api_key,
            athlete_id,
            api_base: env::var("INTERVALS_API_BASE")
                .unwrap_or_else(|_| "https://intervals.icu/api/v1".to_string()),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub app_url: String,
    pub strava: StravaConfig,
    pub intervals: Option<IntervalsConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn from_env() -> color_eyre::Result<Self> {
        let app_url = env::var("APP_URL")
            .map_err(|_| eyre!("APP_URL environment variable not set"))?
            .trim_end_matches('/')
            .to_string();

        let strava = StravaConfig::from_env()?;

        let intervals = IntervalsConfig::from_env();
        if intervals.is_none() {
            tracing::warn!(
                "Intervals.icu credentials not configured, /api/intervals endpoints disabled"
            );
        }

        // One shared client; every outbound call is bounded by this timeout.
        let http = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .use_rustls_tls()
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self {
            app_url,
            strava,
            intervals,
            http,
        })
    }

    /// Returns the canonical redirect URI registered with Strava
    pub fn redirect_uri(&self) -> String {
        format!("{}/connect/callback", self.app_url)
    }

    /// Returns the connect page URL the callback hands its result to
    pub fn connect_url(&self) -> String {
        format!("{}/connect", self.app_url)
    }
}
