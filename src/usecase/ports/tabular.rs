use std::path::Path;

use crate::domain::entities::dataset::Dataset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    Message(String),
}

impl std::fmt::Display for PortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PortError {}

impl From<anyhow::Error> for PortError {
    fn from(err: anyhow::Error) -> Self {
        PortError::Message(format!("{err:#}"))
    }
}

/// Header row plus data rows exactly as read from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    /// Drops columns whose header is blank along with their cells. Cells
    /// past the end of the header are kept so over-wide rows stay visible,
    /// and rows left with only empty cells are dropped.
    pub fn without_unnamed_columns(self) -> Self {
        if self.columns.iter().all(|column| !column.is_empty()) {
            return self;
        }

        let keep: Vec<bool> = self.columns.iter().map(|column| !column.is_empty()).collect();
        let columns = self
            .columns
            .into_iter()
            .filter(|column| !column.is_empty())
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .enumerate()
                    .filter(|(idx, _)| keep.get(*idx).copied().unwrap_or(true))
                    .map(|(_, value)| value)
                    .collect::<Vec<_>>()
            })
            .filter(|row| row.iter().any(|value| !value.is_empty()))
            .collect();

        Self { columns, rows }
    }
}

pub trait DatasetReader {
    fn read(&self, path: &Path) -> Result<TabularData, PortError>;
}

pub trait DatasetWriter {
    /// Writes every record of `dataset` and returns the number of rows written.
    fn write(&self, path: &Path, dataset: &Dataset) -> Result<usize, PortError>;
}
