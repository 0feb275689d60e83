use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid viewer configuration: {0}")]
    Config(#[source] serde_json::Error),

    #[error("invalid viewer configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid info dataset: {0}")]
    Dataset(#[source] serde_json::Error),

    #[error("region {id} has invalid bounds")]
    InvalidRegion { id: u32 },
}

pub type Result<T> = std::result::Result<T, ViewerError>;
