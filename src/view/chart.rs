use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::decimal::{format_fixed, parse_decimal};
use crate::market::types::Kline;

/// Row indices of one candle, counted from the bottom of the plot (row 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandlePlacement {
    pub wick_low: u16,
    pub wick_high: u16,
    pub body_low: u16,
    pub body_high: u16,
    pub bullish: bool,
}

impl CandlePlacement {
    pub fn covers_wick(&self, row: u16) -> bool {
        (self.wick_low..=self.wick_high).contains(&row)
    }

    pub fn covers_body(&self, row: u16) -> bool {
        (self.body_low..=self.body_high).contains(&row)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcHeader {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub change: String,
    pub change_pct: String,
    pub bullish: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartView {
    pub candles: Vec<CandlePlacement>,
    pub rows: u16,
    pub price_low: Decimal,
    pub price_high: Decimal,
    pub header: Option<OhlcHeader>,
}

/// Scales every kline into `rows` rows between the lowest low and the highest
/// high of the set. Bodies always cover at least one row.
pub fn place_candles(klines: &[Kline], rows: u16) -> ChartView {
    if klines.is_empty() || rows == 0 {
        return ChartView { rows, ..ChartView::default() };
    }

    let low = klines
        .iter()
        .map(|k| parse_decimal(&k.low))
        .min()
        .unwrap_or(Decimal::ZERO);
    let high = klines
        .iter()
        .map(|k| parse_decimal(&k.high))
        .max()
        .unwrap_or(Decimal::ZERO);
    let range = (high - low).to_f64().unwrap_or(0.0);
    let top = f64::from(rows - 1);

    let to_row = |price: Decimal| -> u16 {
        if range <= 0.0 {
            return 0;
        }
        let offset = (price - low).to_f64().unwrap_or(0.0) / range;
        (offset.clamp(0.0, 1.0) * top).round() as u16
    };

    let candles = klines
        .iter()
        .map(|k| {
            let open = parse_decimal(&k.open);
            let close = parse_decimal(&k.close);
            let wick_a = to_row(parse_decimal(&k.low));
            let wick_b = to_row(parse_decimal(&k.high));
            let body_a = to_row(open.min(close));
            let body_b = to_row(open.max(close));
            CandlePlacement {
                wick_low: wick_a.min(wick_b),
                wick_high: wick_a.max(wick_b),
                body_low: body_a.min(body_b),
                body_high: body_a.max(body_b),
                bullish: close >= open,
            }
        })
        .collect();

    ChartView {
        candles,
        rows,
        price_low: low,
        price_high: high,
        header: klines.last().map(ohlc_header),
    }
}

pub fn ohlc_header(kline: &Kline) -> OhlcHeader {
    let open = parse_decimal(&kline.open);
    let close = parse_decimal(&kline.close);
    let change = close - open;
    let change_pct = change
        .checked_div(open)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO);
    let sign = if change >= Decimal::ZERO { "+" } else { "" };

    OhlcHeader {
        open: kline.open.clone(),
        high: kline.high.clone(),
        low: kline.low.clone(),
        close: kline.close.clone(),
        change: format_fixed(change, 2),
        change_pct: format!("{}{}%", sign, format_fixed(change_pct, 2)),
        bullish: change >= Decimal::ZERO,
    }
}
