use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;

use crate::cli::ScrapeArgs;
use crate::config::ScrapeConfig;
use crate::export::ExportFormat;

pub fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    let config = ScrapeConfig::new(
        &args.base_url,
        &args.page_path,
        &args.user_agent,
        Duration::from_secs(args.timeout_secs),
    )
    .context("scrape configuration")?;

    let out = PathBuf::from(&args.out);
    if out.exists() && !args.force {
        anyhow::bail!("scrape output already exists: {}", out.display());
    }

    tracing::info!(base_url = %config.base_url, pages = args.pages.get(), "scrape");
    let table = crate::paginate::scrape_books(&config, args.pages).context("scrape books")?;

    let format = args.format.unwrap_or_else(|| ExportFormat::from_path(&out));
    crate::export::write(&table, &out, format, args.force).context("write scraped table")?;

    println!("Finished scraping. Total rows: {}", table.len());
    println!();
    println!("First few rows:");
    print!("{}", crate::report::render_rows(table.head(5)));
    println!();
    println!("Data saved to {}", out.display());

    Ok(())
}
