use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TourcoinError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
