use anyhow::Result;
use clap::Parser;
use log::info;

use dreaming_cli::api::DreamingClient;
use dreaming_cli::cli::Cli;
use dreaming_cli::migrate::{MigrationMode, Migrator};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    info!("Starting dreaming-cli");

    let mode = if cli.execute {
        MigrationMode::Execute
    } else {
        MigrationMode::DryRun
    };
    if mode == MigrationMode::DryRun {
        println!("Running in DRY RUN mode (no changes will be made)");
        println!();
    }

    let source = DreamingClient::with_base_url(cli.api_url.clone(), cli.source_token);
    let target = DreamingClient::with_base_url(cli.api_url, cli.target_token);
    let migrator = Migrator::new(source, target, cli.source_language, cli.target_language);

    let report = migrator.run(mode).await?;
    info!(
        "Run finished: {} fetched, {} submitted, {} failed",
        report.fetched, report.submitted, report.failed
    );

    Ok(())
}
