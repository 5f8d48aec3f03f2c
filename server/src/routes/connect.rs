use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use chrono::DateTime;
use color_eyre::eyre::WrapErr;
use maud::{html, Render};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    components::{
        layout::{strava_glyph, Card, ContentSection, Page},
        ui::{
            badge::{Badge, BadgeColor},
            button::{Button, ButtonSize, ButtonVariant},
            heading::Heading,
        },
    },
    errors::ServerResult,
    state::AppState,
    strava,
};

pub const REASON_NO_CODE: &str = "no_code";
pub const REASON_EXCHANGE_FAILED: &str = "token_exchange_failed";

/// Start the Strava OAuth flow: send the browser to the authorization URL.
pub async fn start(State(state): State<AppState>) -> Redirect {
    let url = strava::authorize_url(&state.strava, &state.redirect_uri());
    Redirect::to(&url)
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub scope: Option<String>,
}

/// What a callback request asks us to do. Single pass, first branch wins:
/// a provider error takes priority even when a code is also present.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackAction {
    ProviderError(String),
    MissingCode,
    Exchange(String),
}

pub fn classify(params: &CallbackParams) -> CallbackAction {
    // Empty-string parameters are treated as absent.
    if let Some(error) = params.error.as_deref().filter(|e| !e.is_empty()) {
        return CallbackAction::ProviderError(error.to_string());
    }

    match params.code.as_deref().filter(|c| !c.is_empty()) {
        Some(code) => CallbackAction::Exchange(code.to_string()),
        None => CallbackAction::MissingCode,
    }
}

/// Credential payload handed to the connect page via the redirect query.
/// Field order matches the query-string order of the documented contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenHandoff {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub athlete_id: i64,
    pub athlete_name: String,
    pub success: bool,
}

impl From<strava::TokenResponse> for TokenHandoff {
    fn from(token: strava::TokenResponse) -> Self {
        Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token.expires_at,
            athlete_id: token.athlete.id,
            athlete_name: format!("{} {}", token.athlete.firstname, token.athlete.lastname),
            success: true,
        }
    }
}

/// Exactly one of these is produced per callback invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    Success(TokenHandoff),
    Failure { reason: String },
}

#[derive(Serialize)]
struct ErrorHandoff<'a> {
    error: &'a str,
}

/// Decide the outcome of a callback. This owns the whole decision; the
/// handler below only turns the outcome into a redirect.
pub async fn resolve_callback(state: &AppState, params: &CallbackParams) -> ConnectOutcome {
    match classify(params) {
        CallbackAction::ProviderError(reason) => {
            // The user declined, or Strava reported some other error. Pass
            // the provider's error token through verbatim.
            warn!(%reason, "Strava reported an authorization error");
            ConnectOutcome::Failure { reason }
        }
        CallbackAction::MissingCode => {
            warn!("Callback arrived without a code or an error");
            ConnectOutcome::Failure {
                reason: REASON_NO_CODE.to_string(),
            }
        }
        CallbackAction::Exchange(code) => {
            info!(scope = ?params.scope, "Exchanging authorization code for tokens");

            // The code is single-use; win or lose, this is the only attempt.
            match strava::exchange_code(&state.http, &state.strava, &code).await {
                Ok(token) => {
                    info!(
                        athlete_id = token.athlete.id,
                        firstname = %token.athlete.firstname,
                        lastname = %token.athlete.lastname,
                        "Token exchange successful"
                    );
                    ConnectOutcome::Success(token.into())
                }
                Err(err) => {
                    // Full detail stays in the logs; the browser only sees
                    // the generic reason.
                    error!(error = %err, "Token exchange failed");
                    ConnectOutcome::Failure {
                        reason: REASON_EXCHANGE_FAILED.to_string(),
                    }
                }
            }
        }
    }
}

pub fn handoff_query(outcome: &ConnectOutcome) -> Result<String, serde_urlencoded::ser::Error> {
    match outcome {
        ConnectOutcome::Success(handoff) => serde_urlencoded::to_string(handoff),
        ConnectOutcome::Failure { reason } => {
            serde_urlencoded::to_string(ErrorHandoff { error: reason })
        }
    }
}

/// Handle the redirect back from Strava and hand the result to the connect
/// page. Every failure becomes a typed reason in the redirect; a server
/// error surfaces only if the redirect itself cannot be encoded.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> ServerResult<Redirect, StatusCode> {
    let outcome = resolve_callback(&state, &params).await;

    // TODO: store the tokens in a server-side session instead of the redirect
    // query before this leaves demo deployments.
    let query = handoff_query(&outcome).wrap_err("Failed to encode hand-off parameters")?;

    Ok(Redirect::to(&format!("{}?{}", state.connect_url(), query)))
}

#[derive(Debug, Deserialize)]
pub struct ConnectPageParams {
    pub success: Option<String>,
    pub access_token: Option<String>,
    pub expires_at: Option<String>,
    pub athlete_id: Option<String>,
    pub athlete_name: Option<String>,
    pub error: Option<String>,
}

fn failure_message(reason: &str) -> &str {
    match reason {
        "access_denied" => "You denied access to Strava",
        REASON_NO_CODE => "No authorization code received",
        REASON_EXCHANGE_FAILED => "Failed to exchange code for tokens",
        other => other,
    }
}

/// The connect page: shows the success panel, the failure panel, or the
/// initial "Connect with Strava" card, depending on the hand-off parameters.
pub async fn connect_page(Query(params): Query<ConnectPageParams>) -> Page {
    let body = if params.success.is_some() && params.access_token.is_some() {
        success_panel(&params)
    } else if let Some(reason) = params.error.as_deref().filter(|e| !e.is_empty()) {
        failure_panel(reason)
    } else {
        connect_card()
    };

    let content = html! {
        main class="mx-auto max-w-3xl px-4 sm:px-6 lg:px-8 py-8" {
            div class="mb-8" {
                (Heading::h1("Connect Strava"))
                p class="mt-2 text-gray-600" {
                    "Connect your Strava account to fetch your training data automatically"
                }
            }
            (body)
        }
    };

    Page::new("Connect Strava - Virtual Coach".to_string(), Box::new(content))
}

fn success_panel(params: &ConnectPageParams) -> maud::Markup {
    let access_token = params.access_token.as_deref().unwrap_or_default();
    let athlete_name = params.athlete_name.as_deref().unwrap_or("your account");
    let expires_at = params
        .expires_at
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
        .map(|when| when.format("%Y-%m-%d %H:%M UTC").to_string());

    let test_link = format!(
        "/test/strava?access_token={}&days=30",
        urlencoding::encode(access_token)
    );

    html! {
        div class="bg-green-50 border border-green-200 rounded-lg p-6 mb-8" {
            (Heading::h2("Successfully Connected!").with_color("text-green-900"))
            p class="text-green-800 mb-4" {
                "Your Strava account has been connected. Athlete: "
                strong { (athlete_name) }
                @if let Some(id) = &params.athlete_id {
                    " (#" (id) ")"
                }
            }
            div class="bg-white rounded-lg p-4 mb-4" {
                p class="text-sm text-gray-600 mb-2" { "Your access token (for testing):" }
                code class="block text-xs bg-gray-100 p-2 rounded break-all" { (access_token) }
                @if let Some(expires) = expires_at {
                    p class="text-xs text-gray-500 mt-2" { "Expires: " (expires) }
                }
            }
            div class="flex gap-4" {
                (Button::strava("Test Integration →", &test_link))
                (Button::primary("Go to Dashboard →", "/dashboard"))
            }
        }
    }
}

fn failure_panel(reason: &str) -> maud::Markup {
    html! {
        div class="bg-red-50 border border-red-200 rounded-lg p-6 mb-8" {
            (Heading::h2("Connection Failed").with_color("text-red-900"))
            p class="text-red-800 mb-2" { (failure_message(reason)) }
            div class="mb-4" {
                (Badge::new(reason, BadgeColor::Red).rounded(true))
            }
            (Button::new("Try Again", "/connect/strava").variant(ButtonVariant::Danger))
        }
    }
}

fn connect_card() -> maud::Markup {
    let card_body = html! {
        div class="text-center" {
            div class="mx-auto w-20 h-20 bg-orange-100 rounded-full flex items-center justify-center mb-6 text-orange-600" {
                (strava_glyph("w-12 h-12"))
            }
            (Heading::h2("Connect Your Strava Account"))
            p class="text-gray-600 mb-8 max-w-lg mx-auto" {
                "Click the button below to authorize Virtual Coach to access your "
                "Strava activities. We'll request permission to read your activity "
                "data including power, heart rate, and other metrics."
            }
            (Button::strava("Connect with Strava", "/connect/strava")
                .size(ButtonSize::Large)
                .icon(strava_glyph("w-6 h-6")))
            p class="mt-6 text-xs text-gray-500" {
                "You can revoke access at any time from your Strava settings."
            }
        }
    };

    Card::new(ContentSection::new(card_body).with_padding("px-8 py-10")).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(
        code: Option<&str>,
        error: Option<&str>,
        scope: Option<&str>,
    ) -> CallbackParams {
        CallbackParams {
            code: code.map(String::from),
            error: error.map(String::from),
            scope: scope.map(String::from),
        }
    }

    #[test]
    fn test_classify_provider_error_wins_over_code() {
        let action = classify(&params(Some("abc123"), Some("access_denied"), None));
        assert_eq!(
            action,
            CallbackAction::ProviderError("access_denied".to_string())
        );
    }

    #[test]
    fn test_classify_missing_both_is_missing_code() {
        assert_eq!(classify(&params(None, None, None)), CallbackAction::MissingCode);
    }

    #[test]
    fn test_classify_empty_strings_are_absent() {
        assert_eq!(
            classify(&params(Some(""), Some(""), None)),
            CallbackAction::MissingCode
        );
    }

    #[test]
    fn test_classify_code_only_exchanges() {
        assert_eq!(
            classify(&params(Some("abc123"), None, Some("read,activity:read_all"))),
            CallbackAction::Exchange("abc123".to_string())
        );
    }

    #[test]
    fn test_success_handoff_query_matches_contract() {
        let outcome = ConnectOutcome::Success(TokenHandoff {
            access_token: "tok1".to_string(),
            refresh_token: "ref1".to_string(),
            expires_at: 1700000000,
            athlete_id: 42,
            athlete_name: "Jane Doe".to_string(),
            success: true,
        });

        assert_eq!(
            handoff_query(&outcome).unwrap(),
            "access_token=tok1&refresh_token=ref1&expires_at=1700000000\
             &athlete_id=42&athlete_name=Jane+Doe&success=true"
        );
    }

    #[test]
    fn test_failure_handoff_query() {
        let outcome = ConnectOutcome::Failure {
            reason: "access_denied".to_string(),
        };

        assert_eq!(handoff_query(&outcome).unwrap(), "error=access_denied");
    }

    #[test]
    fn test_handoff_from_token_response_joins_names() {
        let token: strava::TokenResponse = serde_json::from_str(
            r#"{
                "access_token": "tok1",
                "refresh_token": "ref1",
                "expires_at": 1700000000,
                "athlete": {"id": 42, "firstname": "Jane", "lastname": "Doe"}
            }"#,
        )
        .unwrap();

        let handoff = TokenHandoff::from(token);
        assert_eq!(handoff.athlete_name, "Jane Doe");
        assert_eq!(handoff.athlete_id, 42);
        assert!(handoff.success);
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(failure_message("no_code"), "No authorization code received");
        assert_eq!(
            failure_message("token_exchange_failed"),
            "Failed to exchange code for tokens"
        );
        assert_eq!(failure_message("access_denied"), "You denied access to Strava");
        // Unknown provider errors surface verbatim.
        assert_eq!(failure_message("server_error"), "server_error");
    }
}
