use clap::Parser;
use todoproxy::app::App;
use todoproxy::cli::Args;
use todoproxy::config::Config;
use todoproxy::logging::setup_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config and setup logging before App::new() so startup logs are never silently dropped
    let config = Config::load()?;
    setup_logging(&config, args.tracing);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("GIT_COMMIT_SHORT"),
        environment = if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        },
        "starting todoproxy"
    );

    App::new(config).run().await
}
