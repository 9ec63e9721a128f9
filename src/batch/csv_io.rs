use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{PhishError, Result};

/// Name of the column holding the URLs
pub const URL_COLUMN: &str = "url";

/// An input table with its URL column located.
#[derive(Debug, Clone, Default)]
pub struct UrlTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub url_index: usize,
    /// Records the CSV reader could not decode; they are dropped
    pub unreadable: usize,
}

impl UrlTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// URL cell of every row, in row order
    pub fn urls(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(self.url_index).cloned().unwrap_or_default())
            .collect()
    }
}

/// Reads a CSV with a header row and a `url` column.
///
/// Short rows are padded with empty cells so every row matches the header.
pub fn read_url_table(path: &Path) -> Result<UrlTable> {
    if !path.is_file() {
        return Err(PhishError::MissingFile {
            name: "batch input",
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let url_index = headers
        .iter()
        .position(|h| h.trim() == URL_COLUMN)
        .ok_or_else(|| PhishError::MissingColumn {
            column: URL_COLUMN.to_string(),
            path: path.to_path_buf(),
        })?;

    let mut table = UrlTable {
        headers,
        url_index,
        ..Default::default()
    };

    for (row, record) in reader.records().enumerate() {
        match record {
            Ok(record) => {
                let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
                cells.resize(table.headers.len().max(cells.len()), String::new());
                table.rows.push(cells);
            }
            Err(e) => {
                warn!("Unreadable row {} in {}: {}", row + 1, path.display(), e);
                table.unreadable += 1;
            }
        }
    }

    debug!(
        "Read {} rows ({} unreadable) from {}",
        table.rows.len(),
        table.unreadable,
        path.display()
    );
    Ok(table)
}

/// Writes `headers` followed by `rows`, creating parent directories.
pub fn write_table<H, R>(path: &Path, headers: &[H], rows: &[R]) -> Result<()>
where
    H: AsRef<str>,
    R: AsRef<[String]>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    writer.write_record(headers.iter().map(|h| h.as_ref()))?;
    for row in rows {
        writer.write_record(row.as_ref())?;
    }
    writer.flush()?;
    Ok(())
}
