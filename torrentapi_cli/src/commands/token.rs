//! The `token` subcommand: fetch a fresh API token.

use anyhow::Result;
use torrentapi::Client;

use crate::output::{print_json, OutputFormat};

pub async fn run(client: &Client, format: &OutputFormat) -> Result<()> {
    let token = client.force_token().await?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "token": token })),
        OutputFormat::Table | OutputFormat::Csv => println!("{}", token),
    }
    Ok(())
}
