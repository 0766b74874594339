use anyhow::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use torrentapi::Torrent;

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => anyhow::bail!("unknown output format '{}', expected table, json or csv", s),
        }
    }
}

#[derive(Tabled, Serialize)]
struct TorrentRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    #[serde(rename = "Category")]
    category: String,
    #[tabled(rename = "Seeders")]
    #[serde(rename = "Seeders")]
    seeders: String,
    #[tabled(rename = "Leechers")]
    #[serde(rename = "Leechers")]
    leechers: String,
    #[tabled(rename = "Size")]
    #[serde(rename = "Size")]
    size: String,
    #[tabled(rename = "Magnet")]
    #[serde(rename = "Magnet")]
    download: String,
}

#[derive(Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
}

// -- Row builders --

fn build_torrent_rows(torrents: &[Torrent]) -> Vec<TorrentRow> {
    torrents
        .iter()
        .map(|t| TorrentRow {
            name: t.name().unwrap_or_default().to_string(),
            category: t.category().unwrap_or_default().to_string(),
            seeders: t.seeders().map(|n| n.to_string()).unwrap_or_default(),
            leechers: t.leechers().map(|n| n.to_string()).unwrap_or_default(),
            size: t.size().map(format_size).unwrap_or_default(),
            download: t.download().unwrap_or_default().to_string(),
        })
        .collect()
}

fn build_category_rows(categories: &[(&str, u32)]) -> Vec<CategoryRow> {
    categories
        .iter()
        .map(|&(name, id)| CategoryRow {
            id,
            name: name.to_string(),
        })
        .collect()
}

// -- Table output --

pub fn print_torrents_table(torrents: &[Torrent]) {
    if torrents.is_empty() {
        eprintln!("No results found.");
        return;
    }
    let mut table = Table::new(build_torrent_rows(torrents));
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn print_categories_table(categories: &[(&str, u32)]) {
    let mut table = Table::new(build_category_rows(categories));
    table.with(Style::rounded());
    println!("{}", table);
}

// -- CSV output --

pub fn print_torrents_csv(torrents: &[Torrent]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_torrent_rows(torrents) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_categories_csv(categories: &[(&str, u32)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_category_rows(categories) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Torrents in the requested format. JSON keeps the full objects.
pub fn print_torrents(torrents: &[Torrent], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_torrents_table(torrents),
        OutputFormat::Json => print_json(&torrents),
        OutputFormat::Csv => print_torrents_csv(torrents)?,
    }
    Ok(())
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
