use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuerypadError {
    #[error("{0}")]
    Parse(#[from] crate::query::ParseError),

    #[error("Malformed share token: {0}")]
    Token(#[from] crate::share::TokenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuerypadError>;
