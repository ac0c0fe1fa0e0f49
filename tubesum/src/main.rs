use anyhow::{Context, Result};
use clap::Parser;

use tubesum::cli::Cli;
use tubesum::logging::init_logging;
use tubesum::App;
use tubesum_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let log = init_logging(cli.verbose)?;
    if cli.verbose {
        eprintln!("Logging to {}", log.path().display());
    }

    let mut settings = Settings::new().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    App::new(settings, cli.ephemeral).run(cli.command).await
}
