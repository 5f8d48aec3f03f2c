use serde::{Deserialize, Serialize};
use tracing::error;

use crate::state::StravaConfig;

/// Scopes requested during authorization, in the order they are sent.
/// Strava treats the scope set as unordered; the fixed order keeps the
/// generated URL reproducible.
pub const SCOPES: &str = "read,activity:read_all,activity:write";

#[derive(Serialize)]
struct AuthUrlParams<'a> {
    client_id: &'a str,
    redirect_uri: &'a str,
    response_type: &'static str,
    scope: &'static str,
    approval_prompt: &'static str,
}

/// Build the Strava authorization URL.
///
/// Pure function of configuration: no validation, no side effects. A missing
/// client id yields a syntactically valid but non-functional URL, which is a
/// deployment problem rather than something this layer can fix.
pub fn authorize_url(config: &StravaConfig, redirect_uri: &str) -> String {
    let params = AuthUrlParams {
        client_id: &config.client_id,
        redirect_uri,
        response_type: "code",
        scope: SCOPES,
        // "auto" re-authorizes silently when already granted; "force" would
        // always show the consent screen.
        approval_prompt: "auto",
    };

    let query = serde_urlencoded::to_string(&params)
        .unwrap_or_else(|_| format!("client_id={}", config.client_id));

    format!("{}?{}", config.authorize_url, query)
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    grant_type: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenAthlete {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
}

/// Successful token-endpoint response, validated strictly: a missing or
/// mistyped field fails deserialization and surfaces as an exchange failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub athlete: TokenAthlete,
}

#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("token endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed token response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Exchange an authorization code for a token pair.
///
/// The code is single-use and already consumed by the time Strava answers,
/// so this performs exactly one POST and never retries: any transport error,
/// non-2xx status, or malformed body is terminal and the user has to restart
/// the flow to obtain a fresh code.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &StravaConfig,
    code: &str,
) -> Result<TokenResponse, ExchangeError> {
    let request = TokenRequest {
        client_id: &config.client_id,
        client_secret: &config.client_secret,
        code,
        grant_type: "authorization_code",
    };

    let response = http.post(&config.token_url).json(&request).send().await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        error!(%status, "Token exchange rejected by Strava");
        return Err(ExchangeError::Status { status, body });
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StravaConfig {
        StravaConfig {
            client_id: "12345".to_string(),
            client_secret: "secret".to_string(),
            authorize_url: "https://www.strava.com/oauth/authorize".to_string(),
            token_url: "https://www.strava.com/oauth/token".to_string(),
            api_base: "https://www.strava.com/api/v3".to_string(),
        }
    }

    #[test]
    fn test_authorize_url_contains_all_parameters() {
        let url = authorize_url(&config(), "https://coach.example.com/connect/callback");

        assert_eq!(
            url,
            "https://www.strava.com/oauth/authorize\
             ?client_id=12345\
             &redirect_uri=https%3A%2F%2Fcoach.example.com%2Fconnect%2Fcallback\
             &response_type=code\
             &scope=read%2Cactivity%3Aread_all%2Cactivity%3Awrite\
             &approval_prompt=auto"
        );
    }

    #[test]
    fn test_authorize_url_is_deterministic() {
        let config = config();
        let first = authorize_url(&config, "http://localhost:3000/connect/callback");
        let second = authorize_url(&config, "http://localhost:3000/connect/callback");

        assert_eq!(first, second);
    }

    #[test]
    fn test_authorize_url_with_empty_client_id_is_still_well_formed() {
        let mut config = config();
        config.client_id = String::new();

        let url = authorize_url(&config, "http://localhost:3000/connect/callback");

        assert!(url.contains("client_id=&"));
        assert!(url.contains("response_type=code"));
    }

    #[test]
    fn test_token_response_parses_well_formed_body() {
        let body = r#"{
            "token_type": "Bearer",
            "access_token": "tok1",
            "refresh_token": "ref1",
            "expires_at": 1700000000,
            "expires_in": 21600,
            "athlete": {"id": 42, "firstname": "Jane", "lastname": "Doe", "city": "Gent"}
        }"#;

        let token: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.access_token, "tok1");
        assert_eq!(token.refresh_token, "ref1");
        assert_eq!(token.expires_at, 1700000000);
        assert_eq!(token.athlete.id, 42);
        assert_eq!(token.athlete.firstname, "Jane");
        assert_eq!(token.athlete.lastname, "Doe");
    }

    #[test]
    fn test_token_response_rejects_missing_fields() {
        let body = r#"{"access_token": "tok1"}"#;
        assert!(serde_json::from_str::<TokenResponse>(body).is_err());
    }

    #[test]
    fn test_token_response_rejects_mistyped_fields() {
        let body = r#"{
            "access_token": "tok1",
            "refresh_token": "ref1",
            "expires_at": "not-a-number",
            "athlete": {"id": 42, "firstname": "Jane", "lastname": "Doe"}
        }"#;
        assert!(serde_json::from_str::<TokenResponse>(body).is_err());
    }
}
