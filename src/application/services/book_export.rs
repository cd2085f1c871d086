//! CSV export of book listings.

use std::string::FromUtf8Error;

use crate::domain::Book;

/// Column order of every exported file.
pub const CSV_COLUMNS: [&str; 6] = [
    "id",
    "title",
    "author",
    "description",
    "publication_year",
    "isbn",
];

/// Errors raised while encoding an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// Encode books as CSV with a header row. Absent optional values become empty cells.
pub fn write_csv(books: &[Book]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;

    for book in books {
        writer.write_record([
            book.id.to_string(),
            book.title.clone(),
            book.author.clone(),
            book.description.clone().unwrap_or_default(),
            book.publication_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            book.isbn.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
