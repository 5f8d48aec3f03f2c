//! Strava integration: OAuth authorization-code flow and the v3 API client.

pub mod client;
pub mod oauth;

pub use client::{ApiError, StravaActivity, StravaAthlete, StravaClient};
pub use oauth::{authorize_url, exchange_code, ExchangeError, TokenResponse};
