use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trivia_api::config::DatabaseSettings;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::telemetry::init_tracing;
use trivia_api::transfer::{export_bank, import_bank};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = DatabaseSettings {
        path: cli.db_path.display().to_string(),
        max_connections: 1,
    };
    let pool = establish_connection(&settings)
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::Export { path } => {
            let size = export_bank(&pool, &path).await.context("Cannot export")?;
            tracing::info!(
                categories = size.categories,
                questions = size.questions,
                "Exported to {}",
                path.display()
            );
        }
        Commands::Import { path } => {
            let size = import_bank(&pool, &path).await.context("Cannot import")?;
            tracing::info!(
                categories = size.categories,
                questions = size.questions,
                "Imported from {}",
                path.display()
            );
        }
    }
    Ok(())
}
