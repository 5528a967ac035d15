use std::num::{NonZeroU32, NonZeroUsize};

use clap::{Args, Parser, Subcommand};

use crate::analysis::SortOrder;
use crate::config::{DEFAULT_BASE_URL, DEFAULT_PAGE_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::export::ExportFormat;
use crate::formats::Rating;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Scrape(ScrapeArgs),
    Report(ReportArgs),
    Query(QueryArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Number of listing pages to scrape (20 books per page).
    #[arg(long, default_value_t = NonZeroU32::new(5).unwrap_or(NonZeroU32::MIN))]
    pub pages: NonZeroU32,

    /// Catalog root; page 1 is fetched from here.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path of page 2 and later, relative to the base url.
    #[arg(long, default_value = DEFAULT_PAGE_PATH)]
    pub page_path: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Output file for the table.
    #[arg(long, default_value = "data/books_data.csv")]
    pub out: String,

    /// Output format (default: from the file extension).
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Overwrite an existing output file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// CSV snapshot written by `scrape`.
    #[arg(long, default_value = "data/books_data.csv")]
    pub input: String,

    /// Number of price histogram bins.
    #[arg(long, default_value_t = NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN))]
    pub bins: NonZeroUsize,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// CSV snapshot written by `scrape`.
    #[arg(long, default_value = "data/books_data.csv")]
    pub input: String,

    /// Keep titles containing this text (case-insensitive).
    #[arg(long)]
    pub search: Option<String>,

    /// Keep these ratings (repeatable).
    #[arg(long = "rating", value_parser = parse_rating)]
    pub ratings: Vec<Rating>,

    #[arg(long, value_parser = parse_price)]
    pub min_price: Option<f64>,

    #[arg(long, value_parser = parse_price)]
    pub max_price: Option<f64>,

    #[arg(long, value_enum, default_value_t = SortOrder::None)]
    pub sort: SortOrder,

    /// Write matches here instead of printing them.
    #[arg(long)]
    pub out: Option<String>,

    /// Output format (default: from the file extension).
    #[arg(long, value_enum, requires = "out")]
    pub format: Option<ExportFormat>,

    /// Overwrite an existing output file.
    #[arg(long, requires = "out")]
    pub force: bool,
}

fn parse_rating(value: &str) -> Result<Rating, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn parse_price(value: &str) -> Result<f64, String> {
    let price: f64 = value.parse().map_err(|err| format!("{err}"))?;
    if !price.is_finite() {
        return Err(format!("price bound must be a finite number, got {value}"));
    }
    Ok(price)
}
