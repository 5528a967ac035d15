use serde::Serialize;

use crate::error::NormalizationError;
use crate::formats::{Book, RawBook};
use crate::price::normalize_price;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BookTable {
    rows: Vec<Book>,
}

impl BookTable {
    /// Attaches `price_clean` to every raw record without reordering,
    /// filtering or deduplicating. The first unusable price aborts.
    pub fn assemble(raw: Vec<RawBook>) -> Result<Self, NormalizationError> {
        let rows = raw
            .into_iter()
            .map(|record| {
                let price_clean = normalize_price(&record.price_raw)?;
                Ok(Book::from_raw(record, price_clean))
            })
            .collect::<Result<Vec<_>, NormalizationError>>()?;

        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<Book>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Book] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.rows.iter()
    }

    pub fn head(&self, n: usize) -> &[Book] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|book| book.price_clean)
    }

    pub fn into_rows(self) -> Vec<Book> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a BookTable {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<Book> for BookTable {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
