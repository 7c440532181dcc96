use anyhow::Context;
use booking_desk::cli::Cli;
use booking_desk::{Desk, commands, logger};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = logger::init_logger(&cli.config.log_level, cli.config.log_dir.as_deref());

    let mut desk = Desk::from_config(&cli.config).context("Failed to start booking desk")?;
    let output = commands::execute(&mut desk, cli.command).await?;
    print!("{output}");
    Ok(())
}
