use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use virtual_coach::{routes, state::AppState};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Initialize Sentry for error tracking
    let _sentry_guard = setup_sentry();

    // Create and run the tokio runtime
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()?
        .block_on(async { run_application().await })
}

fn setup_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok()?;

    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

async fn run_application() -> color_eyre::Result<()> {
    setup_tracing();

    info!("Virtual Coach {} starting", env!("CARGO_PKG_VERSION"));

    let app_state = AppState::from_env()?;

    // Spawn application tasks
    let futures = spawn_application_tasks(app_state);

    // Wait for all tasks to complete
    futures::future::try_join_all(futures).await?;

    Ok(())
}

/// Spawn all application background tasks
fn spawn_application_tasks(
    app_state: AppState,
) -> Vec<tokio::task::JoinHandle<color_eyre::Result<()>>> {
    let mut futures = vec![];

    if is_feature_enabled("SERVER") {
        info!("Server Enabled");
        futures.push(tokio::spawn(run_server(routes::routes(app_state))));
    } else {
        info!("Server Disabled");
    }

    futures
}

async fn run_server(app: axum::Router) -> color_eyre::Result<()> {
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Check if a feature is enabled based on environment variables
fn is_feature_enabled(feature: &str) -> bool {
    std::env::var(format!("{}_DISABLED", feature)).unwrap_or_else(|_| "false".to_string()) != "true"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_is_feature_enabled_when_env_var_not_set() {
        env::remove_var("TEST_FEATURE_DISABLED");

        assert!(is_feature_enabled("TEST_FEATURE"));
    }

    #[test]
    fn test_is_feature_disabled_when_env_var_is_true() {
        env::set_var("OTHER_FEATURE_DISABLED", "true");

        assert!(!is_feature_enabled("OTHER_FEATURE"));

        env::remove_var("OTHER_FEATURE_DISABLED");
    }

    #[test]
    fn test_is_feature_enabled_with_other_values() {
        env::set_var("THIRD_FEATURE_DISABLED", "yes");

        assert!(is_feature_enabled("THIRD_FEATURE"));

        env::remove_var("THIRD_FEATURE_DISABLED");
    }
}
