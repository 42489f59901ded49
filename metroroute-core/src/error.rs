use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No usable network data: {0}")]
    DataUnavailable(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
