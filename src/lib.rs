#![forbid(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod csv;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod paginate;
pub mod price;
pub mod query;
pub mod report;
pub mod scrape;
pub mod table;

pub use config::ScrapeConfig;
pub use error::{FetchError, NormalizationError, ParseError, ScrapeError};
pub use extract::BookExtractor;
pub use fetch::{HttpFetcher, PageSource};
pub use formats::{Book, Rating, RawBook};
pub use paginate::{collect_pages, scrape_books};
pub use price::normalize_price;
pub use table::BookTable;
