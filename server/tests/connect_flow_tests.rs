use std::net::SocketAddr;

use fixtures::strava::StravaFixture;
use virtual_coach::routes;
use virtual_coach::state::{AppState, IntervalsConfig, StravaConfig};
use virtual_coach::strava::{exchange_code, ExchangeError};

async fn serve(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server died");
    });

    addr
}

fn test_state(strava_addr: SocketAddr, intervals_addr: Option<SocketAddr>) -> AppState {
    AppState {
        app_url: "http://coach.test".to_string(),
        strava: StravaConfig {
            client_id: "12345".to_string(),
            client_secret: "secret".to_string(),
            authorize_url: format!("http://{strava_addr}/oauth/authorize"),
            token_url: format!("http://{strava_addr}/oauth/token"),
            api_base: format!("http://{strava_addr}/api/v3"),
        },
        intervals: intervals_addr.map(|addr| IntervalsConfig {
            api_key: "k3y".to_string(),
            athlete_id: "i12345".to_string(),
            api_base: format!("http://{addr}"),
        }),
        http: reqwest::Client::new(),
    }
}

fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build test client")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .expect("Redirect without a Location header")
        .to_str()
        .expect("Location header not UTF-8")
        .to_string()
}

#[tokio::test]
async fn test_exchange_code_returns_verbatim_token_fields() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture.clone())).await;
    let state = test_state(strava_addr, None);

    let token = exchange_code(&state.http, &state.strava, "abc123")
        .await
        .expect("Exchange should succeed");

    assert_eq!(token.access_token, "tok1");
    assert_eq!(token.refresh_token, "ref1");
    assert_eq!(token.expires_at, 1700000000);
    assert_eq!(token.athlete.id, 42);
    assert_eq!(token.athlete.firstname, "Jane");
    assert_eq!(token.athlete.lastname, "Doe");
    assert_eq!(fixture.token_hit_count(), 1);
}

#[tokio::test]
async fn test_exchange_code_maps_non_2xx_to_status_error() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture.clone())).await;
    let state = test_state(strava_addr, None);

    let err = exchange_code(&state.http, &state.strava, "401")
        .await
        .expect_err("Exchange should fail");

    assert!(matches!(
        err,
        ExchangeError::Status { status, .. } if status == reqwest::StatusCode::UNAUTHORIZED
    ));
    assert_eq!(fixture.token_hit_count(), 1);
}

#[tokio::test]
async fn test_exchange_code_rejects_malformed_body() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture.clone())).await;
    let state = test_state(strava_addr, None);

    let err = exchange_code(&state.http, &state.strava, "malformed")
        .await
        .expect_err("Exchange should fail");

    assert!(matches!(err, ExchangeError::Malformed(_)));
}

#[tokio::test]
async fn test_callback_success_redirects_with_full_handoff() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture.clone())).await;
    let state = test_state(strava_addr, None);
    let app_addr = serve(routes::routes(state)).await;

    let response = no_redirect_client()
        .get(format!(
            "http://{app_addr}/connect/callback?code=abc123&scope=read,activity:read_all"
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "http://coach.test/connect\
         ?access_token=tok1&refresh_token=ref1&expires_at=1700000000\
         &athlete_id=42&athlete_name=Jane+Doe&success=true"
    );
    assert_eq!(fixture.token_hit_count(), 1);
}

#[tokio::test]
async fn test_callback_provider_error_skips_token_endpoint() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture.clone())).await;
    let state = test_state(strava_addr, None);
    let app_addr = serve(routes::routes(state)).await;

    let response = no_redirect_client()
        .get(format!(
            "http://{app_addr}/connect/callback?error=access_denied&code=abc123"
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(
        location(&response),
        "http://coach.test/connect?error=access_denied"
    );
    // The provider error short-circuits before any exchange.
    assert_eq!(fixture.token_hit_count(), 0);
}

#[tokio::test]
async fn test_callback_without_code_or_error_is_no_code() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture.clone())).await;
    let state = test_state(strava_addr, None);
    let app_addr = serve(routes::routes(state)).await;

    let response = no_redirect_client()
        .get(format!("http://{app_addr}/connect/callback"))
        .send()
        .await
        .unwrap();

    assert_eq!(location(&response), "http://coach.test/connect?error=no_code");
    assert_eq!(fixture.token_hit_count(), 0);
}

#[tokio::test]
async fn test_callback_exchange_failure_is_generic_reason() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture.clone())).await;
    let state = test_state(strava_addr, None);
    let app_addr = serve(routes::routes(state)).await;

    let response = no_redirect_client()
        .get(format!("http://{app_addr}/connect/callback?code=401"))
        .send()
        .await
        .unwrap();

    // A rejected exchange is a redirect with a typed reason, never a 5xx.
    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "http://coach.test/connect?error=token_exchange_failed"
    );
    assert_eq!(fixture.token_hit_count(), 1);
}

#[tokio::test]
async fn test_connect_strava_redirects_to_authorize_url() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture)).await;
    let state = test_state(strava_addr, None);
    let app_addr = serve(routes::routes(state)).await;

    let response = no_redirect_client()
        .get(format!("http://{app_addr}/connect/strava"))
        .send()
        .await
        .unwrap();

    let location = location(&response);
    assert!(location.starts_with(&format!("http://{strava_addr}/oauth/authorize?")));
    assert!(location.contains("client_id=12345"));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("approval_prompt=auto"));
    assert!(location.contains("redirect_uri=http%3A%2F%2Fcoach.test%2Fconnect%2Fcallback"));
}

#[tokio::test]
async fn test_strava_activities_proxy() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture)).await;
    let state = test_state(strava_addr, None);
    let app_addr = serve(routes::routes(state)).await;

    // Without a token: 400 with a hint.
    let response = reqwest::get(format!("http://{app_addr}/api/strava/activities"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing access token");

    // With a token: pass-through of the fixture's activities.
    let response = reqwest::get(format!(
        "http://{app_addr}/api/strava/activities?access_token=tok1&days=7"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["dateRange"]["days"], 7);
    assert_eq!(body["activities"][0]["name"], "Morning Endurance Ride");
    assert_eq!(body["activities"][0]["kudos_count"], 12);
}

#[tokio::test]
async fn test_intervals_proxies() {
    let fixture = StravaFixture::new();
    let strava_addr = serve(fixtures::strava::router(fixture)).await;
    let intervals_addr = serve(fixtures::intervals::router()).await;

    // Configured: activities and fitness pass through.
    let state = test_state(strava_addr, Some(intervals_addr));
    let app_addr = serve(routes::routes(state)).await;

    let response = reqwest::get(format!("http://{app_addr}/api/intervals/activities"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], 2);
    assert_eq!(body["activities"][0]["icu_training_load"], 145.0);

    let response = reqwest::get(format!("http://{app_addr}/api/intervals/fitness?days=30"))
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["count"], 3);
    assert_eq!(body["latest"]["date"], "2025-06-03");

    // Unconfigured: 503.
    let state = test_state(strava_addr, None);
    let app_addr = serve(routes::routes(state)).await;

    let response = reqwest::get(format!("http://{app_addr}/api/intervals/fitness"))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
}
