//! The `categories` subcommand: print the category name/id table.

use anyhow::Result;
use torrentapi::types::CATEGORIES;

use crate::output::{print_categories_csv, print_categories_table, print_json, OutputFormat};

pub fn run(format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_categories_table(&CATEGORIES),
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = CATEGORIES
                .iter()
                .map(|&(name, id)| (name.to_string(), id.into()))
                .collect();
            print_json(&map);
        }
        OutputFormat::Csv => print_categories_csv(&CATEGORIES)?,
    }
    Ok(())
}
