use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    /// Master data files exist but could not be read back. The caller
    /// recovers by regenerating the full master triad.
    #[error("Master data load error: {0}")]
    MasterDataLoad(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GenResult<T> = Result<T, GenError>;
