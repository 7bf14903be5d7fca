use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::dataset::Dataset;
use crate::usecase::ports::tabular::{DatasetWriter, PortError};

pub struct CsvWriter;

impl DatasetWriter for CsvWriter {
    fn write(&self, path: &Path, dataset: &Dataset) -> Result<usize, PortError> {
        write_csv_path(path, dataset).map_err(PortError::from)
    }
}

/// Dataset columns first, then any field that only appears on records,
/// in first-seen order.
pub fn export_headers(dataset: &Dataset) -> Vec<String> {
    let mut headers = dataset.columns.clone();
    for record in &dataset.records {
        for name in record.field_names() {
            if !headers.iter().any(|header| header == name) {
                headers.push(name.to_string());
            }
        }
    }
    headers
}

pub fn write_csv<W: Write>(output: W, dataset: &Dataset) -> Result<usize> {
    let headers = export_headers(dataset);
    let mut writer = csv::Writer::from_writer(output);
    writer
        .write_record(&headers)
        .context("failed to write csv header")?;

    for record in &dataset.records {
        let row = headers.iter().map(|header| {
            record
                .get(header)
                .map(|value| value.to_string())
                .unwrap_or_default()
        });
        writer
            .write_record(row)
            .with_context(|| format!("failed to write ticket {}", record.ticket_id()))?;
    }
    writer.flush().context("failed to flush csv output")?;

    Ok(dataset.records.len())
}

pub fn write_csv_path(csv_path: &Path, dataset: &Dataset) -> Result<usize> {
    if let Some(parent) = csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }
    let file = std::fs::File::create(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;
    write_csv(file, dataset).with_context(|| format!("failed to export csv: {}", csv_path.display()))
}
