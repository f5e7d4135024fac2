use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("Attach error: {0}")]
    Attach(String),

    #[error("Detach error: {0}")]
    Detach(String),

    #[error("Chain query error: {0}")]
    Query(String),

    #[error("Decode error: {kind} event is missing expected argument '{field}'")]
    Decode { kind: String, field: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
