use clap::Parser;
use prewarm::{logging, Cli};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init().map_err(|e| eyre::eyre!("failed to initialise logging: {e}"))?;

    let loaded = cli.global.load_config()?;
    tracing::debug!(source = ?loaded.source, "effective configuration resolved");

    cli.command.unwrap_or_default().execute(loaded).await?;
    Ok(())
}
