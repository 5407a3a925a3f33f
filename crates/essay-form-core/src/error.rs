use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Invalid form configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse form configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("DOM operation failed: {0}")]
    Dom(String),
}
