use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;
use rust_xlsxwriter::Workbook;

use crate::formats::{Book, COLUMNS};
use crate::table::BookTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Jsonl,
    Xlsx,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") => ExportFormat::Jsonl,
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => ExportFormat::Xlsx,
            _ => ExportFormat::Csv,
        }
    }
}

/// Writes `table` to `out`, creating missing parent directories.
///
/// An existing file is only replaced when `force` is set.
pub fn write(table: &BookTable, out: &Path, format: ExportFormat, force: bool) -> anyhow::Result<()> {
    if out.exists() && !force {
        anyhow::bail!("export output already exists: {}", out.display());
    }
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create export output dir: {}", parent.display()))?;
    }

    let file = open_output(out, force)?;
    let mut writer = BufWriter::new(file);

    tracing::info!(out = %out.display(), ?format, rows = table.len(), "export");
    match format {
        ExportFormat::Csv => crate::csv::write_table(&mut writer, table)
            .with_context(|| format!("write csv: {}", out.display()))?,
        ExportFormat::Jsonl => {
            for book in table {
                serde_json::to_writer(&mut writer, book).context("write book json")?;
                writer.write_all(b"\n").context("write book newline")?;
            }
        }
        ExportFormat::Xlsx => {
            let bytes = xlsx_bytes(table)?;
            writer
                .write_all(&bytes)
                .with_context(|| format!("write xlsx: {}", out.display()))?;
        }
    }

    writer
        .flush()
        .with_context(|| format!("flush output: {}", out.display()))?;
    Ok(())
}

fn xlsx_bytes(table: &BookTable) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("books").context("name xlsx sheet")?;

    for (col, name) in (0u16..).zip(COLUMNS) {
        sheet.write_string(0, col, name).context("write xlsx header")?;
    }
    for (row, book) in (1u32..).zip(table) {
        write_xlsx_row(sheet, row, book)
            .with_context(|| format!("write xlsx row {row}: {}", book.title))?;
    }

    workbook.save_to_buffer().context("encode xlsx")
}

fn write_xlsx_row(
    sheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    book: &Book,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    sheet.write_string(row, 0, &book.title)?;
    sheet.write_string(row, 1, &book.price_raw)?;
    sheet.write_string(row, 2, &book.availability)?;
    if let Some(rating) = book.rating {
        sheet.write_string(row, 3, rating.as_str())?;
    }
    sheet.write_number(row, 4, book.price_clean)?;
    Ok(())
}

fn open_output(out: &Path, force: bool) -> anyhow::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options
        .open(out)
        .with_context(|| format!("open output: {}", out.display()))
}
