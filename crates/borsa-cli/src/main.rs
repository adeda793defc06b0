//! Command-line interface for borsa

mod cli;
mod commands;
mod render;

use clap::Parser;
use cli::Cli;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = borsa_utils::Settings::from_env();
    if let Some(url) = cli.gateway_url.clone() {
        settings.gateway_url = url;
    }
    if let Some(dir) = cli.data_dir.clone() {
        settings.data_dir = dir;
    }

    borsa_utils::init_tracing_with(&settings);
    debug!(environment = %settings.environment, "Starting borsa");

    commands::run(cli, &settings).await
}
