use anyhow::Result;
use async_trait::async_trait;

use super::types::{Balance, BookLevels, Kline, MarketSnapshot, MarketSummary, Trade};

#[async_trait]
pub trait MarketDataSource {
    fn name(&self) -> &str;
    async fn get_levels(&self, symbol: &str) -> Result<BookLevels>;
    async fn get_trades(&self, symbol: &str) -> Result<Vec<Trade>>;
    async fn get_balances(&self) -> Result<Vec<Balance>>;
    async fn get_summary(&self, symbol: &str) -> Result<MarketSummary>;
    async fn get_klines(&self, symbol: &str) -> Result<Vec<Kline>>;

    /// Whole snapshot read in one go, for sources that publish one document.
    /// `None` means the five parts are queried separately.
    async fn get_snapshot(&self, _symbol: &str) -> Result<Option<MarketSnapshot>> {
        Ok(None)
    }
}
