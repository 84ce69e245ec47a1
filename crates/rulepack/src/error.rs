use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse rulepack: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read rulepack: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid rulepack: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
