use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Mock,
    Simulated,
    File,
}

impl SourceKind {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "mock" => Some(Self::Mock),
            "simulated" | "sim" => Some(Self::Simulated),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub symbol: String,
    pub source: SourceKind,
    /// Snapshot document read by the file source.
    pub snapshot_path: PathBuf,
    pub refresh_ms: u64,
    /// Rows shown per book side.
    pub book_depth: usize,
    pub trade_rows: usize,
    pub chart_rows: u16,
    pub spread_decimals: u32,
    pub spread_pct_decimals: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            symbol: "SOL/USDC".to_string(),
            source: SourceKind::Mock,
            snapshot_path: PathBuf::from("demos/snapshot.json"),
            refresh_ms: 250,
            book_depth: 12,
            trade_rows: 20,
            chart_rows: 16,
            spread_decimals: 2,
            spread_pct_decimals: 3,
        }
    }
}

impl ViewConfig {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trade_view")
            .join("config.json")
    }

    /// Loads the user config file, falling back to defaults when it is absent,
    /// then applies `TRADE_VIEW_SYMBOL` / `TRADE_VIEW_SOURCE` overrides.
    pub fn load() -> Result<Self, ViewError> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            debug!("Loading config from {}", path.display());
            Self::from_json(&fs::read_to_string(&path)?)?
        } else {
            Self::default()
        };

        if let Ok(symbol) = std::env::var("TRADE_VIEW_SYMBOL") {
            config.symbol = symbol.trim().to_uppercase();
        }
        if let Ok(source) = std::env::var("TRADE_VIEW_SOURCE") {
            match SourceKind::parse(&source) {
                Some(kind) => config.source = kind,
                None => warn!("Ignoring unknown TRADE_VIEW_SOURCE value: {}", source),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self, ViewError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ViewError> {
        if self.symbol.is_empty() {
            return Err(ViewError::ConfigError("symbol must not be empty".to_string()));
        }
        if self.refresh_ms == 0 {
            return Err(ViewError::ConfigError("refresh_ms must be positive".to_string()));
        }
        Ok(())
    }
}
