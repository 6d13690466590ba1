use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuddyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Identity error: {0}")]
    Identity(String),
}

pub type Result<T> = std::result::Result<T, BuddyError>;
