use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::mock::normalize_symbol;
use super::traits::MarketDataSource;
use super::types::{Balance, BookLevels, Kline, MarketSnapshot, MarketSummary, Trade};
use crate::error::ViewError;

/// Reads a JSON `MarketSnapshot` document on every refresh, so edits to the
/// file show up on the next one. The document is read once per refresh.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<MarketSnapshot, ViewError> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        let snapshot: MarketSnapshot = serde_json::from_str(&data)?;
        if snapshot.symbol.trim().is_empty() {
            return Err(ViewError::InvalidSnapshot(format!(
                "{} has an empty symbol",
                self.path.display()
            )));
        }
        debug!(
            "Loaded snapshot {} seq={} from {}",
            snapshot.symbol,
            snapshot.sequence,
            self.path.display()
        );
        Ok(snapshot)
    }

    async fn load_for(&self, symbol: &str) -> Result<MarketSnapshot> {
        let snapshot = self.load().await?;
        if normalize_symbol(&snapshot.symbol) != normalize_symbol(symbol) {
            return Err(ViewError::SymbolNotFound(symbol.to_string()).into());
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl MarketDataSource for FileSource {
    fn name(&self) -> &str {
        "File"
    }

    async fn get_levels(&self, symbol: &str) -> Result<BookLevels> {
        Ok(self.load_for(symbol).await?.book)
    }

    async fn get_trades(&self, symbol: &str) -> Result<Vec<Trade>> {
        Ok(self.load_for(symbol).await?.trades)
    }

    async fn get_balances(&self) -> Result<Vec<Balance>> {
        Ok(self.load().await?.balances)
    }

    async fn get_summary(&self, symbol: &str) -> Result<MarketSummary> {
        self.load_for(symbol)
            .await?
            .summary
            .ok_or_else(|| ViewError::SourceError(format!("no summary for {}", symbol)).into())
    }

    async fn get_klines(&self, symbol: &str) -> Result<Vec<Kline>> {
        Ok(self.load_for(symbol).await?.klines)
    }

    async fn get_snapshot(&self, symbol: &str) -> Result<Option<MarketSnapshot>> {
        self.load_for(symbol).await.map(Some)
    }
}
