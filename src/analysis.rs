use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::formats::{Book, Rating};
use crate::table::BookTable;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; undefined for a single row.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl PriceSummary {
    pub fn of(table: &BookTable) -> Option<Self> {
        let mut prices: Vec<f64> = table.prices().collect();
        if prices.is_empty() {
            return None;
        }
        prices.sort_by(f64::total_cmp);

        let count = prices.len();
        let n = count as f64;
        let mean = prices.iter().sum::<f64>() / n;
        let std = (count > 1).then(|| {
            let squares: f64 = prices.iter().map(|p| (p - mean).powi(2)).sum();
            (squares / (n - 1.0)).sqrt()
        });

        Some(Self {
            count,
            mean,
            std,
            min: prices[0],
            q25: quantile(&prices, 0.25),
            median: quantile(&prices, 0.5),
            q75: quantile(&prices, 0.75),
            max: prices[count - 1],
        })
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (pos - lower as f64)
}

pub fn cheapest(table: &BookTable) -> Option<&Book> {
    table.iter().fold(None, |best: Option<&Book>, book| match best {
        Some(best) if best.price_clean <= book.price_clean => Some(best),
        _ => Some(book),
    })
}

pub fn costliest(table: &BookTable) -> Option<&Book> {
    table.iter().fold(None, |best: Option<&Book>, book| match best {
        Some(best) if best.price_clean >= book.price_clean => Some(best),
        _ => Some(book),
    })
}

/// Counts distinct values, most frequent first. Ties keep first-seen order.
pub fn value_counts<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value.to_owned(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn rating_counts(table: &BookTable) -> Vec<(String, usize)> {
    value_counts(table.iter().filter_map(|book| book.rating.map(Rating::as_str)))
}

pub fn availability_counts(table: &BookTable) -> Vec<(String, usize)> {
    value_counts(table.iter().map(|book| book.availability.as_str()))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning `[min, max]`. Every bin is half-open except the
/// last, which also holds `max`.
pub fn histogram(values: &[f64], bins: NonZeroUsize) -> Vec<HistogramBin> {
    let Some(mut lower) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let mut upper = values.iter().copied().fold(lower, f64::max);
    if lower == upper {
        lower -= 0.5;
        upper += 0.5;
    }

    let bins = bins.get();
    let width = (upper - lower) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lower + width * i as f64,
            upper: if i + 1 == bins {
                upper
            } else {
                lower + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        let slot = (((value - lower) / width) as usize).min(bins - 1);
        out[slot].count += 1;
    }

    out
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub keyword: Option<String>,
    /// Accepted ratings; empty accepts any rating, including none.
    pub ratings: Vec<Rating>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(keyword) = self.keyword.as_deref()
            && !keyword.is_empty()
            && !book.title.to_lowercase().contains(&keyword.to_lowercase())
        {
            return false;
        }
        if !self.ratings.is_empty()
            && !book
                .rating
                .is_some_and(|rating| self.ratings.contains(&rating))
        {
            return false;
        }
        if self.min_price.is_some_and(|min| book.price_clean < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| book.price_clean > max) {
            return false;
        }
        true
    }

    pub fn apply(&self, table: &BookTable) -> BookTable {
        table.iter().filter(|book| self.matches(book)).cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
}

/// Stable sort; `SortOrder::None` keeps scrape order.
pub fn sort(table: BookTable, order: SortOrder) -> BookTable {
    let mut rows = table.into_rows();
    match order {
        SortOrder::None => {}
        SortOrder::PriceAsc => rows.sort_by(|a, b| a.price_clean.total_cmp(&b.price_clean)),
        SortOrder::PriceDesc => rows.sort_by(|a, b| b.price_clean.total_cmp(&a.price_clean)),
        SortOrder::TitleAsc => rows.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOrder::TitleDesc => rows.sort_by(|a, b| b.title.cmp(&a.title)),
    }
    BookTable::from_rows(rows)
}
