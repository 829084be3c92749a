use thiserror::Error;

#[derive(Error, Debug)]
pub enum FfargsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Probe data error: {0}")]
    Probe(String),
}

pub type Result<T> = std::result::Result<T, FfargsError>;
