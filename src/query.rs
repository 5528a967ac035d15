use std::path::PathBuf;

use anyhow::Context as _;

use crate::analysis::BookFilter;
use crate::cli::QueryArgs;
use crate::export::ExportFormat;

pub fn run(args: QueryArgs) -> anyhow::Result<()> {
    let table = crate::report::load(&args.input)?;

    let filter = BookFilter {
        keyword: args.search,
        ratings: args.ratings,
        min_price: args.min_price,
        max_price: args.max_price,
    };
    let matches = crate::analysis::sort(filter.apply(&table), args.sort);
    tracing::debug!(?filter, total = table.len(), matched = matches.len(), "query");

    match args.out {
        Some(out) => {
            let out = PathBuf::from(out);
            let format = args.format.unwrap_or_else(|| ExportFormat::from_path(&out));
            crate::export::write(&matches, &out, format, args.force)
                .context("write query results")?;
            println!("Wrote {} of {} books to {}", matches.len(), table.len(), out.display());
        }
        None => {
            println!("Showing {} of {} books:", matches.len(), table.len());
            print!("{}", crate::report::render_rows(matches.rows()));
        }
    }

    Ok(())
}
