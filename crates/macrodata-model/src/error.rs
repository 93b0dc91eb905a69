use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown data source: {0}")]
    UnknownSource(String),
    #[error("unknown frequency: {0}")]
    UnknownFrequency(String),
}
