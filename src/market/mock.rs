use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use super::traits::MarketDataSource;
use super::types::{Balance, BookLevels, Kline, MarketSummary, PriceLevel, Trade, TradeSide};
use crate::error::ViewError;

pub const MOCK_SYMBOL: &str = "SOL/USDC";

const MOCK_BIDS: [(&str, &str); 12] = [
    ("112.94", "532.29"),
    ("112.93", "201.15"),
    ("112.92", "148.50"),
    ("112.91", "98.32"),
    ("112.90", "245.67"),
    ("112.89", "132.45"),
    ("112.88", "175.21"),
    ("112.87", "93.76"),
    ("112.86", "156.89"),
    ("112.85", "218.45"),
    ("112.84", "189.32"),
    ("112.83", "114.67"),
];

const MOCK_ASKS: [(&str, &str); 9] = [
    ("112.95", "431.56"),
    ("112.96", "176.23"),
    ("112.97", "210.45"),
    ("112.98", "98.76"),
    ("112.99", "342.87"),
    ("113.00", "187.65"),
    ("113.01", "124.39"),
    ("113.02", "203.74"),
    ("113.03", "167.82"),
];

// (price, size, side, age in ms)
const MOCK_TRADES: [(&str, &str, TradeSide, i64); 10] = [
    ("112.94", "0.42", TradeSide::Buy, 5_000),
    ("112.96", "0.15", TradeSide::Sell, 10_000),
    ("112.92", "0.35", TradeSide::Buy, 15_000),
    ("112.91", "0.27", TradeSide::Buy, 25_000),
    ("112.99", "0.51", TradeSide::Sell, 35_000),
    ("113.01", "0.19", TradeSide::Sell, 45_000),
    ("112.87", "0.33", TradeSide::Buy, 55_000),
    ("112.85", "0.44", TradeSide::Buy, 65_000),
    ("112.97", "0.28", TradeSide::Sell, 75_000),
    ("113.02", "0.37", TradeSide::Sell, 85_000),
];

// (hours ago, open, high, low, close, volume)
const MOCK_KLINES: [(i64, &str, &str, &str, &str, &str); 11] = [
    (11, "110.50", "111.80", "110.20", "111.50", "1500"),
    (10, "111.50", "112.90", "111.00", "112.78", "2500"),
    (9, "112.78", "113.31", "112.08", "112.95", "1800"),
    (8, "112.95", "114.50", "112.80", "114.20", "3200"),
    (7, "114.20", "114.80", "112.50", "112.78", "2800"),
    (6, "112.78", "112.90", "111.20", "111.50", "1900"),
    (5, "111.50", "112.50", "111.30", "112.30", "2100"),
    (4, "112.30", "113.00", "112.20", "112.70", "2300"),
    (3, "112.70", "114.00", "112.60", "113.80", "2700"),
    (2, "113.80", "114.20", "112.97", "113.00", "2400"),
    (1, "113.00", "113.20", "111.90", "112.94", "1800"),
];

// (asset, ticker, icon, lend/borrow)
const MOCK_ASSETS: [(&str, &str, &str, Option<&str>); 7] = [
    ("USDC", "USD Coin", "$", Some("0")),
    ("SOL", "Solana", "S", Some("0")),
    ("BTC", "Bitcoin", "B", Some("0")),
    ("USDT", "USDT", "T", Some("0")),
    ("ETH", "Ethereum", "E", Some("0")),
    ("AAVE", "Aave", "A", None),
    ("ACT", "Act I The AI Prophecy", "Ac", None),
];

/// Normalizes "sol_usdc" and "SOL/USDC" to the same key.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase().replace(['_', '-'], "/")
}

/// Serves the hardcoded fixtures of the trading screen.
#[derive(Debug, Clone)]
pub struct MockSource {
    symbol: String,
}

impl Default for MockSource {
    fn default() -> Self {
        Self { symbol: MOCK_SYMBOL.to_string() }
    }
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn check_symbol(&self, symbol: &str) -> Result<()> {
        if normalize_symbol(symbol) == self.symbol {
            Ok(())
        } else {
            Err(ViewError::SymbolNotFound(symbol.to_string()).into())
        }
    }

    pub fn levels() -> BookLevels {
        BookLevels {
            bids: MOCK_BIDS.iter().map(|(p, s)| PriceLevel::bid(p, s)).collect(),
            asks: MOCK_ASKS.iter().map(|(p, s)| PriceLevel::ask(p, s)).collect(),
        }
    }

    /// Trades stamped relative to `now_ms`, newest first.
    pub fn trades(now_ms: i64) -> Vec<Trade> {
        MOCK_TRADES
            .iter()
            .enumerate()
            .map(|(idx, (price, size, side, age))| Trade {
                id: (idx + 1).to_string(),
                price: price.to_string(),
                size: size.to_string(),
                side: *side,
                timestamp: now_ms - age,
            })
            .collect()
    }

    pub fn klines(now_ms: i64) -> Vec<Kline> {
        MOCK_KLINES
            .iter()
            .map(|(hours, open, high, low, close, volume)| Kline {
                timestamp: now_ms - hours * 3_600_000,
                open: open.to_string(),
                high: high.to_string(),
                low: low.to_string(),
                close: close.to_string(),
                volume: volume.to_string(),
            })
            .collect()
    }

    pub fn balances() -> Vec<Balance> {
        MOCK_ASSETS
            .iter()
            .map(|(asset, ticker, icon, lend_borrow)| Balance {
                asset: asset.to_string(),
                ticker: ticker.to_string(),
                icon: Some(icon.to_string()),
                balance: "0".to_string(),
                balance_value: "$0.00".to_string(),
                available: "0".to_string(),
                available_value: "$0.00".to_string(),
                lend_borrow: lend_borrow.map(str::to_string),
                open_orders: "0".to_string(),
            })
            .collect()
    }

    pub fn summary() -> MarketSummary {
        MarketSummary {
            symbol: MOCK_SYMBOL.to_string(),
            last_price: "112.63".to_string(),
            mark_price: "112.63".to_string(),
        }
    }
}

#[async_trait]
impl MarketDataSource for MockSource {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn get_levels(&self, symbol: &str) -> Result<BookLevels> {
        self.check_symbol(symbol)?;
        Ok(Self::levels())
    }

    async fn get_trades(&self, symbol: &str) -> Result<Vec<Trade>> {
        self.check_symbol(symbol)?;
        Ok(Self::trades(Utc::now().timestamp_millis()))
    }

    async fn get_balances(&self) -> Result<Vec<Balance>> {
        Ok(Self::balances())
    }

    async fn get_summary(&self, symbol: &str) -> Result<MarketSummary> {
        self.check_symbol(symbol)?;
        Ok(Self::summary())
    }

    async fn get_klines(&self, symbol: &str) -> Result<Vec<Kline>> {
        self.check_symbol(symbol)?;
        Ok(Self::klines(Utc::now().timestamp_millis()))
    }
}
