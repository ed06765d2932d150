use thiserror::Error;

/// Reasons a dataset cannot be turned into a [`RecordStore`](super::RecordStore).
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("dataset is missing the '{0}' column")]
    MissingColumn(String),

    #[error("row {row}: location is missing or has no country segment")]
    MissingLocation { row: usize },
}
