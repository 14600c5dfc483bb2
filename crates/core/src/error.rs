use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("interaction dataset not found: {}", .0.display())]
    DatasetMissing(PathBuf),
    #[error("failed to read interaction dataset {}: {source}", path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("interaction dataset contains no usable rows: {}", .0.display())]
    DatasetEmpty(PathBuf),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
