mod commands;
mod output;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use torrentapi::{Client, Config};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "torrentapi")]
#[command(about = "List and search torrents on torrentapi.org")]
struct Cli {
    /// Output format: table, json or csv
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Override the API endpoint (or set TORRENTAPI_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Application id sent with every request (or set TORRENTAPI_APP_ID)
    #[arg(long, global = true)]
    app_id: Option<String>,

    /// Minimum milliseconds between requests (or set TORRENTAPI_MIN_INTERVAL_MS)
    #[arg(long, global = true)]
    min_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the most recent torrents
    List(commands::list::ListArgs),
    /// Search torrents by text or database id
    Search(commands::search::SearchArgs),
    /// Fetch a fresh API token
    Token,
    /// Show category names and ids
    Categories,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(app_id) = &self.app_id {
            config = config.with_app_id(app_id);
        }
        if let Some(ms) = self.min_interval_ms {
            config = config.with_min_interval(Duration::from_millis(ms));
        }
        config
    }
}

fn build_client(cli: &Cli) -> Result<Client> {
    Client::from_config(cli.config()).context("failed to build API client")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("torrentapi=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output)?;

    match &cli.command {
        Commands::List(args) => commands::list::run(args, &build_client(&cli)?, &format).await?,
        Commands::Search(args) => {
            commands::search::run(args, &build_client(&cli)?, &format).await?
        }
        Commands::Token => commands::token::run(&build_client(&cli)?, &format).await?,
        Commands::Categories => commands::categories::run(&format)?,
    }

    Ok(())
}
