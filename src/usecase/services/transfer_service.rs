use std::path::Path;

use tracing::info;

use crate::domain::entities::dataset::Dataset;
use crate::infra::export::csv::CsvWriter;
use crate::infra::import::csv::CsvReader;
use crate::infra::import::xlsx::WorkbookReader;
use crate::usecase::ports::tabular::{DatasetReader, DatasetWriter, PortError, TabularData};

pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Moves datasets between files and the review store.
pub struct TransferService {
    csv_reader: Box<dyn DatasetReader>,
    workbook_reader: Box<dyn DatasetReader>,
    writer: Box<dyn DatasetWriter>,
}

impl Default for TransferService {
    fn default() -> Self {
        Self::new(
            Box::new(CsvReader),
            Box::new(WorkbookReader),
            Box::new(CsvWriter),
        )
    }
}

impl TransferService {
    pub fn new(
        csv_reader: Box<dyn DatasetReader>,
        workbook_reader: Box<dyn DatasetReader>,
        writer: Box<dyn DatasetWriter>,
    ) -> Self {
        Self {
            csv_reader,
            workbook_reader,
            writer,
        }
    }

    pub fn import(&self, path: &Path) -> Result<TabularData, PortError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();

        let data = if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            self.workbook_reader.read(path)?
        } else {
            self.csv_reader.read(path)?
        };
        info!(path = %path.display(), rows = data.rows.len(), "file parsed");
        Ok(data)
    }

    pub fn export(&self, path: &Path, dataset: &Dataset) -> Result<usize, PortError> {
        let rows = self.writer.write(path, dataset)?;
        info!(path = %path.display(), rows, "dataset exported");
        Ok(rows)
    }
}
