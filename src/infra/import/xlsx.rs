use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::usecase::ports::tabular::{DatasetReader, PortError, TabularData};

pub struct WorkbookReader;

impl DatasetReader for WorkbookReader {
    fn read(&self, path: &Path) -> Result<TabularData, PortError> {
        read_first_sheet(path).map_err(PortError::from)
    }
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn read_first_sheet(workbook_path: &Path) -> Result<TabularData> {
    let mut workbook = open_workbook_auto(workbook_path)
        .with_context(|| format!("failed to open workbook: {}", workbook_path.display()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook has no sheets")?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();

    rows_to_tabular(rows)
}

/// First non-empty row becomes the header; empty rows are dropped and
/// trailing empty cells trimmed so they do not widen the row.
pub fn rows_to_tabular(rows: Vec<Vec<String>>) -> Result<TabularData> {
    let mut rows = rows
        .into_iter()
        .map(|mut row| {
            while row.last().is_some_and(|cell| cell.is_empty()) {
                row.pop();
            }
            row
        })
        .filter(|row| !row.is_empty());

    let columns: Vec<String> = rows
        .next()
        .context("sheet header is required")?
        .into_iter()
        .map(|header| header.trim().to_string())
        .collect();

    Ok(TabularData {
        columns,
        rows: rows.collect(),
    }
    .without_unnamed_columns())
}
