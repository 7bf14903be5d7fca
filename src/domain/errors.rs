use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid upload: {0}")]
    InvalidInput(String),
    #[error("ticket not found: {0}")]
    NotFound(String),
    #[error("no ticket is selected")]
    NoSelection,
}
