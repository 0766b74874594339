//! The `search` subcommand: search by text or external database id.

use anyhow::Result;
use clap::Args;
use torrentapi::{Client, SearchQuery};

use super::FilterArgs;
use crate::output::{print_torrents, OutputFormat};

/// Arguments for the `search` subcommand. At least one of `--string`,
/// `--imdb`, `--tvdb` or `--themoviedb` is required.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text search
    #[arg(long)]
    pub string: Option<String>,

    /// IMDb id, with or without the tt prefix
    #[arg(long)]
    pub imdb: Option<String>,

    /// TheTVDB id
    #[arg(long)]
    pub tvdb: Option<String>,

    /// The Movie Database id
    #[arg(long)]
    pub themoviedb: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

impl SearchArgs {
    fn to_query(&self) -> Result<SearchQuery> {
        let mut query = SearchQuery::default();
        if let Some(string) = &self.string {
            query = query.with_string(string);
        }
        if let Some(imdb) = &self.imdb {
            query = query.with_imdb(imdb);
        }
        if let Some(tvdb) = &self.tvdb {
            query = query.with_tvdb(tvdb);
        }
        if let Some(themoviedb) = &self.themoviedb {
            query = query.with_themoviedb(themoviedb);
        }
        self.filters.apply(query)
    }
}

pub async fn run(args: &SearchArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = args.to_query()?;
    let torrents = client.search(&query).await?;
    tracing::info!("{} torrents", torrents.len());
    print_torrents(&torrents, format)
}
