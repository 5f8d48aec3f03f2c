use clap::Parser;
use fixtures::{intervals, run_server, FixtureArgs};

/// Mock Intervals.icu server for local development and tests
#[derive(Parser, Debug)]
#[clap(name = "intervals-fixture")]
struct Cli {
    #[clap(flatten)]
    common: FixtureArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    run_server(args.common, intervals::router()).await
}
