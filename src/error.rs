#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Data source error: {0}")]
    SourceError(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
