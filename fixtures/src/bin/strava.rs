use clap::Parser;
use fixtures::{run_server, strava, FixtureArgs};

/// Mock Strava server for local development and tests
#[derive(Parser, Debug)]
#[clap(name = "strava-fixture")]
struct Cli {
    #[clap(flatten)]
    common: FixtureArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let app = strava::router(strava::StravaFixture::new());

    run_server(args.common, app).await
}
