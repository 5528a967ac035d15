use std::io::Write;

use crate::formats::{Book, COLUMNS};
use crate::table::BookTable;

#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    #[error("csv input is empty")]
    Empty,

    #[error("unexpected csv header {found:?}, expected {expected:?}")]
    Header {
        found: Vec<String>,
        expected: Vec<String>,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub fn write_table<W: Write>(out: W, table: &BookTable) -> Result<(), CsvError> {
    // Header is written explicitly so an empty table still gets one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(COLUMNS)?;
    for book in table {
        writer.serialize(book)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn read_table(text: &str) -> Result<BookTable, CsvError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());

    let header = reader.headers()?;
    if header.is_empty() {
        return Err(CsvError::Empty);
    }
    if header.iter().ne(COLUMNS) {
        return Err(CsvError::Header {
            found: header.iter().map(str::to_owned).collect(),
            expected: COLUMNS.iter().map(|c| (*c).to_owned()).collect(),
        });
    }

    let rows = reader
        .deserialize::<Book>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BookTable::from_rows(rows))
}
