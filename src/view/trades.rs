use std::fmt::Display;

use chrono::{Local, TimeZone};

use crate::market::types::{Trade, TradeSide};

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRow {
    pub id: String,
    pub price: String,
    pub size: String,
    pub side: TradeSide,
    pub side_label: &'static str,
    /// HH:MM:SS in the viewer's time zone.
    pub time_of_day: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapeRatio {
    pub buy_pct: f64,
    pub sell_pct: f64,
}

pub fn side_label(side: TradeSide) -> &'static str {
    match side {
        TradeSide::Buy => "Buy",
        TradeSide::Sell => "Sell",
    }
}

pub fn format_time_of_day<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

pub fn format_trades_in<Tz>(trades: &[Trade], tz: &Tz) -> Vec<TradeRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    trades
        .iter()
        .map(|trade| TradeRow {
            id: trade.id.clone(),
            price: trade.price.clone(),
            size: trade.size.clone(),
            side: trade.side,
            side_label: side_label(trade.side),
            time_of_day: format_time_of_day(trade.timestamp, tz),
        })
        .collect()
}

/// Formats trades for the tape in local time. Input order is preserved.
pub fn format_trades(trades: &[Trade]) -> Vec<TradeRow> {
    format_trades_in(trades, &Local)
}

/// Buy and sell share of the tape by number of prints.
pub fn tape_ratio(trades: &[Trade]) -> TapeRatio {
    if trades.is_empty() {
        return TapeRatio { buy_pct: 50.0, sell_pct: 50.0 };
    }
    let buys = trades.iter().filter(|t| t.side == TradeSide::Buy).count();
    let buy_pct = buys as f64 / trades.len() as f64 * 100.0;
    TapeRatio { buy_pct, sell_pct: 100.0 - buy_pct }
}
