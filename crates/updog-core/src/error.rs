use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown game: {0}")]
    UnknownGame(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
