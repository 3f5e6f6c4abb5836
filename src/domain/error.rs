use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Save cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
