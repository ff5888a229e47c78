use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
