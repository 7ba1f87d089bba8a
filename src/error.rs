use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyEvolveError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Layout Validation Error: {0}")]
    Validation(String),

    #[error("Key '{0}' is not present on the layout")]
    KeyNotFound(char),

    #[error("Layout Generation Error: {0}")]
    Generation(String),
}

pub type KeResult<T> = Result<T, KeyEvolveError>;
