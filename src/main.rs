use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use feedback_triage::cli::{self, Cli};
use feedback_triage::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();

    // A missing credential is fatal before any command runs.
    config.require_api_key()?;

    cli::handle(cli, config).await?;
    Ok(())
}
