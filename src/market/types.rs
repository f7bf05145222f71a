use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookSide {
    Bid,
    Ask,
}

/// One book row as received from upstream. Prices and sizes stay display strings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PriceLevel {
    pub price: String,
    pub size: String,
    pub side: BookSide,
}

impl PriceLevel {
    pub fn bid(price: &str, size: &str) -> Self {
        Self { price: price.to_string(), size: size.to_string(), side: BookSide::Bid }
    }

    pub fn ask(price: &str, size: &str) -> Self {
        Self { price: price.to_string(), size: size.to_string(), side: BookSide::Ask }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    Buy,
    Sell,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Trade {
    pub id: String,
    pub price: String,
    pub size: String,
    pub side: TradeSide,
    /// Unix time in milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Balance {
    pub asset: String,
    pub ticker: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub balance: String,
    pub balance_value: String,
    pub available: String,
    pub available_value: String,
    #[serde(default)]
    pub lend_borrow: Option<String>,
    pub open_orders: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Kline {
    pub timestamp: i64,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MarketSummary {
    pub symbol: String,
    pub last_price: String,
    pub mark_price: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct BookLevels {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

/// One consistent set of inputs for a render. Higher `sequence` wins.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub symbol: String,
    #[serde(default)]
    pub sequence: u64,
    #[serde(default)]
    pub book: BookLevels,
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default)]
    pub klines: Vec<Kline>,
    #[serde(default)]
    pub summary: Option<MarketSummary>,
}

impl MarketSnapshot {
    pub fn empty(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            sequence: 0,
            book: BookLevels::default(),
            trades: Vec::new(),
            balances: Vec::new(),
            klines: Vec::new(),
            summary: None,
        }
    }
}
