//! CLI subcommand implementations.

pub mod categories;
pub mod list;
pub mod search;
pub mod token;

use anyhow::{bail, Result};
use clap::Args;
use torrentapi::types::category_id;
use torrentapi::{Format, Query, Sort};

/// Filters shared by `list` and `search`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Category ids or names, comma-separated (e.g. 44,"TV HD Episodes")
    #[arg(long)]
    pub category: Option<String>,

    /// Result format: json or json_extended
    #[arg(long)]
    pub format: Option<String>,

    /// Maximum results: 25, 50 or 100
    #[arg(long)]
    pub limit: Option<u32>,

    /// Minimum number of seeders
    #[arg(long)]
    pub min_seeders: Option<u32>,

    /// Minimum number of leechers
    #[arg(long)]
    pub min_leechers: Option<u32>,

    /// Only ranked torrents
    #[arg(long, conflicts_with = "unranked")]
    pub ranked: bool,

    /// Include unranked torrents
    #[arg(long)]
    pub unranked: bool,

    /// Sort order: last, seeders or leechers
    #[arg(long)]
    pub sort: Option<String>,
}

impl FilterArgs {
    /// Applies the filters to a query builder.
    pub fn apply<Q: Query>(&self, mut query: Q) -> Result<Q> {
        if let Some(category) = &self.category {
            query = query.with_categories(&parse_categories(category)?);
        }
        if let Some(format) = &self.format {
            query = query.with_format(format.parse::<Format>()?);
        }
        if let Some(limit) = self.limit {
            query = query.with_limit(limit);
        }
        if let Some(min_seeders) = self.min_seeders {
            query = query.with_min_seeders(min_seeders);
        }
        if let Some(min_leechers) = self.min_leechers {
            query = query.with_min_leechers(min_leechers);
        }
        if self.ranked {
            query = query.with_ranked(true);
        } else if self.unranked {
            query = query.with_ranked(false);
        }
        if let Some(sort) = &self.sort {
            query = query.with_sort(sort.parse::<Sort>()?);
        }
        Ok(query)
    }
}

/// Parses a comma-separated list of category ids or names.
pub fn parse_categories(input: &str) -> Result<Vec<u32>> {
    let mut ids = Vec::new();
    for part in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id = match part.parse::<u32>() {
            Ok(id) => id,
            Err(_) => match category_id(part) {
                Some(id) => id,
                None => bail!(
                    "unknown category '{}'; run `torrentapi categories` for the list",
                    part
                ),
            },
        };
        ids.push(id);
    }
    Ok(ids)
}
