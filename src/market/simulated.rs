use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::trace;

use super::mock::MockSource;
use super::traits::MarketDataSource;
use super::types::{Balance, BookLevels, Kline, MarketSummary, PriceLevel, Trade, TradeSide};
use crate::view::decimal::parse_f64;

const MAX_TRADES: usize = 50;

struct SimState {
    rng: StdRng,
    levels: BookLevels,
    trades: Vec<Trade>,
    next_trade_id: u64,
}

/// Random walk over the mock fixtures: sizes drift on every book read and a new
/// print is added to the tape on every trade read.
#[derive(Clone)]
pub struct SimulatedSource {
    fixtures: MockSource,
    state: Arc<Mutex<SimState>>,
}

impl std::fmt::Debug for SimulatedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedSource")
            .field("fixtures", &self.fixtures)
            .finish_non_exhaustive()
    }
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let trades = MockSource::trades(Utc::now().timestamp_millis());
        let next_trade_id = trades.len() as u64 + 1;
        Self {
            fixtures: MockSource::new(),
            state: Arc::new(Mutex::new(SimState {
                rng,
                levels: MockSource::levels(),
                trades,
                next_trade_id,
            })),
        }
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

fn drift(level: &PriceLevel, rng: &mut StdRng) -> PriceLevel {
    let size = parse_f64(&level.size) * rng.gen_range(0.9_f64..1.1);
    PriceLevel {
        price: level.price.clone(),
        size: format!("{:.2}", size),
        side: level.side,
    }
}

#[async_trait]
impl MarketDataSource for SimulatedSource {
    fn name(&self) -> &str {
        "Simulated"
    }

    async fn get_levels(&self, symbol: &str) -> Result<BookLevels> {
        self.fixtures.check_symbol(symbol)?;
        let mut state = self.state.lock().await;
        let SimState { rng, levels, .. } = &mut *state;
        let bids: Vec<_> = levels.bids.iter().map(|l| drift(l, rng)).collect();
        let asks: Vec<_> = levels.asks.iter().map(|l| drift(l, rng)).collect();
        levels.bids = bids;
        levels.asks = asks;
        Ok(levels.clone())
    }

    async fn get_trades(&self, symbol: &str) -> Result<Vec<Trade>> {
        self.fixtures.check_symbol(symbol)?;
        let mut state = self.state.lock().await;

        let side = if state.rng.gen_bool(0.5) { TradeSide::Buy } else { TradeSide::Sell };
        // Buys lift the best ask, sells hit the best bid.
        let price = match side {
            TradeSide::Buy => state.levels.asks.first(),
            TradeSide::Sell => state.levels.bids.first(),
        }
        .map(|l| l.price.clone());

        if let Some(price) = price {
            let size: f64 = state.rng.gen_range(0.01..1.0);
            let trade = Trade {
                id: state.next_trade_id.to_string(),
                price,
                size: format!("{:.2}", size),
                side,
                timestamp: Utc::now().timestamp_millis(),
            };
            trace!("Simulated print {} {:?} {}@{}", trade.id, trade.side, trade.size, trade.price);
            state.next_trade_id += 1;
            state.trades.insert(0, trade);
            state.trades.truncate(MAX_TRADES);
        }

        Ok(state.trades.clone())
    }

    async fn get_balances(&self) -> Result<Vec<Balance>> {
        self.fixtures.get_balances().await
    }

    async fn get_summary(&self, symbol: &str) -> Result<MarketSummary> {
        let mut summary = self.fixtures.get_summary(symbol).await?;
        if let Some(last) = self.state.lock().await.trades.first() {
            summary.last_price = last.price.clone();
        }
        Ok(summary)
    }

    async fn get_klines(&self, symbol: &str) -> Result<Vec<Kline>> {
        self.fixtures.get_klines(symbol).await
    }
}
