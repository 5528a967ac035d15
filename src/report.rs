use std::fmt::Write as _;
use std::num::NonZeroUsize;

use anyhow::Context as _;

use crate::analysis::{self, HistogramBin, PriceSummary};
use crate::cli::ReportArgs;
use crate::formats::Book;
use crate::table::BookTable;

const BAR_WIDTH: usize = 40;
const PREVIEW_ROWS: usize = 5;

pub fn run(args: ReportArgs) -> anyhow::Result<()> {
    let table = load(&args.input)?;
    print!("{}", render(&table, args.bins));
    Ok(())
}

pub fn load(input: &str) -> anyhow::Result<BookTable> {
    let text = std::fs::read_to_string(input).with_context(|| format!("read input: {input}"))?;
    crate::csv::read_table(&text).with_context(|| format!("parse csv: {input}"))
}

pub fn render(table: &BookTable, bins: NonZeroUsize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total rows: {}", table.len());
    let _ = writeln!(out, "\nFirst {PREVIEW_ROWS} rows:");
    out.push_str(&render_rows(table.head(PREVIEW_ROWS)));

    let _ = writeln!(out, "\nSummary of prices (price_clean):");
    match PriceSummary::of(table) {
        Some(summary) => out.push_str(&render_summary(&summary)),
        None => out.push_str("  (no rows)\n"),
    }

    if let (Some(cheap), Some(dear)) = (analysis::cheapest(table), analysis::costliest(table)) {
        let _ = writeln!(out, "\nCheapest book: {} -> £{:.2}", cheap.title, cheap.price_clean);
        let _ = writeln!(
            out,
            "Most expensive book: {} -> £{:.2}",
            dear.title, dear.price_clean
        );
    }

    let _ = writeln!(out, "\nBooks count by rating:");
    out.push_str(&render_bars(&analysis::rating_counts(table)));

    let _ = writeln!(out, "\nAvailability counts:");
    out.push_str(&render_bars(&analysis::availability_counts(table)));

    let prices: Vec<f64> = table.prices().collect();
    let _ = writeln!(out, "\nDistribution of book prices (£):");
    out.push_str(&render_histogram(&analysis::histogram(&prices, bins)));

    out
}

pub fn render_rows(rows: &[Book]) -> String {
    let mut out = String::new();
    let title_width = rows
        .iter()
        .map(|book| book.title.chars().count())
        .max()
        .unwrap_or(0)
        .clamp("title".len(), 50);

    let _ = writeln!(
        out,
        "  {:<title_width$}  {:>10}  {:<12}  {:<6}",
        "title", "price", "availability", "rating"
    );
    for book in rows {
        let rating = book.rating.map(|r| r.as_str()).unwrap_or("-");
        let _ = writeln!(
            out,
            "  {:<title_width$}  {:>10.2}  {:<12}  {:<6}",
            truncate(&book.title, title_width),
            book.price_clean,
            book.availability,
            rating
        );
    }
    out
}

fn render_summary(summary: &PriceSummary) -> String {
    let std = summary
        .std
        .map(|std| format!("{std:.6}"))
        .unwrap_or_else(|| "NaN".to_owned());

    let mut out = String::new();
    let _ = writeln!(out, "  count  {}", summary.count);
    let _ = writeln!(out, "  mean   {:.6}", summary.mean);
    let _ = writeln!(out, "  std    {std}");
    let _ = writeln!(out, "  min    {:.6}", summary.min);
    let _ = writeln!(out, "  25%    {:.6}", summary.q25);
    let _ = writeln!(out, "  50%    {:.6}", summary.median);
    let _ = writeln!(out, "  75%    {:.6}", summary.q75);
    let _ = writeln!(out, "  max    {:.6}", summary.max);
    out
}

fn render_bars(counts: &[(String, usize)]) -> String {
    if counts.is_empty() {
        return "  (none)\n".to_owned();
    }
    let label_width = counts.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let peak = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);

    let mut out = String::new();
    for (label, count) in counts {
        let _ = writeln!(
            out,
            "  {label:<label_width$}  {count:>5}  {}",
            bar(*count, peak)
        );
    }
    out
}

fn render_histogram(bins: &[HistogramBin]) -> String {
    if bins.is_empty() {
        return "  (none)\n".to_owned();
    }
    let peak = bins.iter().map(|bin| bin.count).max().unwrap_or(0);

    let mut out = String::new();
    for bin in bins {
        let _ = writeln!(
            out,
            "  {:>8.2} - {:<8.2}  {:>5}  {}",
            bin.lower,
            bin.upper,
            bin.count,
            bar(bin.count, peak)
        );
    }
    out
}

fn bar(count: usize, peak: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(peak);
    "#".repeat(len)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
