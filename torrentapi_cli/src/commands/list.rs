//! The `list` subcommand: most recent torrents, optionally filtered.

use anyhow::Result;
use clap::Args;
use torrentapi::{Client, ListQuery};

use super::FilterArgs;
use crate::output::{print_torrents, OutputFormat};

/// Arguments for the `list` subcommand.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
}

pub async fn run(args: &ListArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = args.filters.apply(ListQuery::default())?;
    let torrents = client.list(&query).await?;
    tracing::info!("{} torrents", torrents.len());
    print_torrents(&torrents, format)
}
