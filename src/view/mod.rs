pub mod balances;
pub mod chart;
pub mod decimal;
pub mod order_entry;
pub mod orderbook;
pub mod state;
pub mod trades;

#[cfg(test)]
mod tests;

use crate::config::ViewConfig;
use crate::market::types::MarketSnapshot;
use balances::{balance_rows, BalanceRow};
use chart::{place_candles, ChartView};
use order_entry::OrderEntryView;
use orderbook::{Imbalance, OrderBookView};
use state::UiState;
use trades::{format_trades, tape_ratio, TapeRatio, TradeRow};

/// Shown in place of the spread when either side of the book is empty.
pub const UNAVAILABLE: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct InfoBar {
    pub symbol: String,
    pub last_price: String,
    pub mark_price: String,
}

/// Everything the terminal needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView {
    pub state: UiState,
    pub symbol: String,
    pub info: Option<InfoBar>,
    pub book: OrderBookView,
    pub spread_text: String,
    pub spread_pct_text: String,
    pub imbalance: Imbalance,
    pub trades: Vec<TradeRow>,
    pub tape: TapeRatio,
    pub balances: Vec<BalanceRow>,
    pub chart: ChartView,
    pub order_entry: OrderEntryView,
}

pub fn render(state: &UiState, snapshot: &MarketSnapshot, config: &ViewConfig) -> ScreenView {
    let book = OrderBookView::grouped(
        &snapshot.book.bids,
        &snapshot.book.asks,
        state.grouping.tick(),
        config.book_depth,
    );

    let (spread_text, spread_pct_text) = match &book.spread {
        Some(spread) => (
            spread.value_text(config.spread_decimals),
            spread
                .pct_text(config.spread_pct_decimals)
                .map(|pct| format!("{}%", pct))
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
        ),
        None => (UNAVAILABLE.to_string(), UNAVAILABLE.to_string()),
    };

    let recent = &snapshot.trades[..snapshot.trades.len().min(config.trade_rows)];

    ScreenView {
        state: state.clone(),
        symbol: snapshot.symbol.clone(),
        info: snapshot.summary.as_ref().map(|s| InfoBar {
            symbol: s.symbol.clone(),
            last_price: s.last_price.clone(),
            mark_price: format!("${}", s.mark_price),
        }),
        imbalance: book.imbalance(),
        book,
        spread_text,
        spread_pct_text,
        trades: format_trades(recent),
        tape: tape_ratio(recent),
        balances: balance_rows(&snapshot.balances, state.hide_zero),
        chart: place_candles(&snapshot.klines, config.chart_rows),
        order_entry: OrderEntryView::build(state),
    }
}
