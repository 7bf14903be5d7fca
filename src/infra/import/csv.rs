use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::usecase::ports::tabular::{DatasetReader, PortError, TabularData};

pub struct CsvReader;

impl DatasetReader for CsvReader {
    fn read(&self, path: &Path) -> Result<TabularData, PortError> {
        read_csv_path(path).map_err(PortError::from)
    }
}

pub fn read_csv_path(csv_path: &Path) -> Result<TabularData> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    read_csv(file).with_context(|| format!("failed to read csv: {}", csv_path.display()))
}

/// Parses delimited text with the first row as header. Blank lines are
/// skipped; any malformed record fails the whole read.
pub fn read_csv<R: Read>(input: R) -> Result<TabularData> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .context("failed to read csv header")?
        .iter()
        .map(|header| header.trim().to_string())
        .collect::<Vec<_>>();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        anyhow::bail!("csv header is required")
    }

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("failed to parse csv record {}", row_idx + 1))?;
        if record.iter().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(TabularData {
        columns: headers,
        rows,
    }
    .without_unnamed_columns())
}
