use std::num::NonZeroU32;

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::extract::BookExtractor;
use crate::fetch::{HttpFetcher, PageSource};
use crate::formats::RawBook;
use crate::table::BookTable;

/// Fetches and extracts pages `1..=pages` strictly in order.
///
/// There is no next-page discovery: a page past the end of the catalog fails
/// like any other page would.
pub fn collect_pages<S: PageSource + ?Sized>(
    source: &S,
    extractor: &BookExtractor,
    config: &ScrapeConfig,
    pages: NonZeroU32,
) -> Result<Vec<RawBook>, ScrapeError> {
    let mut books = Vec::new();

    for page in 1..=pages.get() {
        let url = config.page_url(page)?;
        let html = source.fetch(&url)?;
        let page_books = extractor
            .extract(&html)
            .map_err(|err| ScrapeError::Parse {
                page,
                url: url.to_string(),
                source: err,
            })?;

        tracing::info!(page, found = page_books.len(), "extracted books");
        books.extend(page_books);
    }

    Ok(books)
}

pub fn scrape_books(config: &ScrapeConfig, pages: NonZeroU32) -> Result<BookTable, ScrapeError> {
    let fetcher = HttpFetcher::new(config)?;
    let extractor = BookExtractor::new().map_err(ScrapeError::Selectors)?;

    let raw = collect_pages(&fetcher, &extractor, config, pages)?;
    let table = BookTable::assemble(raw)?;
    tracing::info!(rows = table.len(), pages = pages.get(), "scrape complete");
    Ok(table)
}
