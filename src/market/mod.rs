pub mod file;
pub mod mock;
pub mod simulated;
pub mod traits;
pub mod types;


use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::{SourceKind, ViewConfig};
use crate::error::ViewError;
use crate::view::{render, state::UiState, ScreenView};
use file::FileSource;
use mock::{normalize_symbol, MockSource};
use simulated::SimulatedSource;
use traits::MarketDataSource;
use types::{Balance, BookLevels, Kline, MarketSnapshot, MarketSummary, Trade};

#[derive(Debug, Clone)]
pub enum Source {
    Mock(MockSource),
    Simulated(SimulatedSource),
    File(FileSource),
}

impl Source {
    pub fn from_config(config: &ViewConfig) -> Self {
        match config.source {
            SourceKind::Mock => Source::Mock(MockSource::new()),
            SourceKind::Simulated => Source::Simulated(SimulatedSource::new()),
            SourceKind::File => Source::File(FileSource::new(&config.snapshot_path)),
        }
    }
}

#[async_trait]
impl MarketDataSource for Source {
    fn name(&self) -> &str {
        match self {
            Source::Mock(s) => s.name(),
            Source::Simulated(s) => s.name(),
            Source::File(s) => s.name(),
        }
    }

    async fn get_levels(&self, symbol: &str) -> Result<BookLevels> {
        match self {
            Source::Mock(s) => s.get_levels(symbol).await,
            Source::Simulated(s) => s.get_levels(symbol).await,
            Source::File(s) => s.get_levels(symbol).await,
        }
    }

    async fn get_trades(&self, symbol: &str) -> Result<Vec<Trade>> {
        match self {
            Source::Mock(s) => s.get_trades(symbol).await,
            Source::Simulated(s) => s.get_trades(symbol).await,
            Source::File(s) => s.get_trades(symbol).await,
        }
    }

    async fn get_balances(&self) -> Result<Vec<Balance>> {
        match self {
            Source::Mock(s) => s.get_balances().await,
            Source::Simulated(s) => s.get_balances().await,
            Source::File(s) => s.get_balances().await,
        }
    }

    async fn get_summary(&self, symbol: &str) -> Result<MarketSummary> {
        match self {
            Source::Mock(s) => s.get_summary(symbol).await,
            Source::Simulated(s) => s.get_summary(symbol).await,
            Source::File(s) => s.get_summary(symbol).await,
        }
    }

    async fn get_klines(&self, symbol: &str) -> Result<Vec<Kline>> {
        match self {
            Source::Mock(s) => s.get_klines(symbol).await,
            Source::Simulated(s) => s.get_klines(symbol).await,
            Source::File(s) => s.get_klines(symbol).await,
        }
    }

    async fn get_snapshot(&self, symbol: &str) -> Result<Option<MarketSnapshot>> {
        match self {
            Source::Mock(s) => s.get_snapshot(symbol).await,
            Source::Simulated(s) => s.get_snapshot(symbol).await,
            Source::File(s) => s.get_snapshot(symbol).await,
        }
    }
}

/// Book, trades, balances, summary and klines.
const SNAPSHOT_PARTS: usize = 5;

/// Keeps the latest snapshot for one symbol and renders it on demand.
pub struct MarketView {
    config: ViewConfig,
    source: Source,
    snapshot: MarketSnapshot,
}

impl MarketView {
    pub fn new(mut config: ViewConfig, source: Source) -> Self {
        config.symbol = normalize_symbol(&config.symbol);
        let snapshot = MarketSnapshot::empty(&config.symbol);
        Self { config, source, snapshot }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn snapshot(&self) -> &MarketSnapshot {
        &self.snapshot
    }

    /// Last write wins: a snapshot older than the current one is dropped.
    /// Returns whether the snapshot was taken.
    pub fn apply(&mut self, snapshot: MarketSnapshot) -> bool {
        if snapshot.sequence < self.snapshot.sequence {
            debug!(
                "Dropping stale snapshot seq={} (current seq={})",
                snapshot.sequence, self.snapshot.sequence
            );
            return false;
        }
        self.snapshot = snapshot;
        true
    }

    /// Switches symbol and clears data from the previous one.
    pub fn set_symbol(&mut self, symbol: &str) {
        let symbol = normalize_symbol(symbol);
        info!("Switching symbol to {}", symbol);
        let sequence = self.snapshot.sequence;
        self.config.symbol = symbol.clone();
        self.snapshot = MarketSnapshot { sequence, ..MarketSnapshot::empty(&symbol) };
    }

    /// Reads the next snapshot and counts the parts that failed. A whole-document
    /// source is read once; its own sequence is kept when it carries one.
    /// Otherwise every part is queried concurrently and a part that fails keeps
    /// its last known value.
    pub async fn fetch(&self) -> (MarketSnapshot, usize) {
        let symbol = self.config.symbol.as_str();
        let current = &self.snapshot;

        match self.source.get_snapshot(symbol).await {
            Ok(Some(document)) => {
                let sequence = match document.sequence {
                    0 => current.sequence + 1,
                    sequence => sequence,
                };
                let snapshot = MarketSnapshot {
                    symbol: current.symbol.clone(),
                    sequence,
                    summary: document.summary.or_else(|| current.summary.clone()),
                    ..document
                };
                return (snapshot, 0);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("{} snapshot update failed for {}: {}", self.source.name(), symbol, e);
                return (current.clone(), SNAPSHOT_PARTS);
            }
        }

        let (levels, trades, balances, summary, klines) = futures::join!(
            self.source.get_levels(symbol),
            self.source.get_trades(symbol),
            self.source.get_balances(),
            self.source.get_summary(symbol),
            self.source.get_klines(symbol),
        );

        let mut failures = 0;
        let mut keep = |part: &str, err: anyhow::Error| {
            failures += 1;
            warn!("{} {} update failed for {}: {}", self.source.name(), part, symbol, err);
        };

        let book = levels.unwrap_or_else(|e| {
            keep("book", e);
            current.book.clone()
        });
        let trades = trades.unwrap_or_else(|e| {
            keep("trades", e);
            current.trades.clone()
        });
        let balances = balances.unwrap_or_else(|e| {
            keep("balances", e);
            current.balances.clone()
        });
        let summary = match summary {
            Ok(summary) => Some(summary),
            Err(e) => {
                keep("summary", e);
                current.summary.clone()
            }
        };
        let klines = klines.unwrap_or_else(|e| {
            keep("klines", e);
            current.klines.clone()
        });

        let snapshot = MarketSnapshot {
            symbol: current.symbol.clone(),
            sequence: current.sequence + 1,
            book,
            trades,
            balances,
            klines,
            summary,
        };
        (snapshot, failures)
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let (snapshot, failures) = self.fetch().await;
        if !self.apply(snapshot) {
            warn!("{} served an older snapshot than seq={}", self.source.name(), self.snapshot.sequence);
        }
        if failures == SNAPSHOT_PARTS {
            return Err(ViewError::SourceError(format!(
                "{} returned no data for {}",
                self.source.name(),
                self.config.symbol
            ))
            .into());
        }
        Ok(())
    }

    pub fn screen(&self, state: &UiState) -> ScreenView {
        render(state, &self.snapshot, &self.config)
    }
}
