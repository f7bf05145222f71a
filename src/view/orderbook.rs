//! Order book depth/spread view model.
//!
//! Raw levels arrive best price first on each side (bids descending, asks
//! ascending). Every row gets a running total scanned outward from the best
//! price and a depth fraction relative to the largest size on its side.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::decimal::{format_fixed, parse_decimal};
use crate::market::types::{BookSide, PriceLevel};

/// Floor for the depth-bar denominator so an empty or all-zero side never divides by zero.
const MIN_DEPTH_SCALE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLevel {
    pub price: String,
    pub size: String,
    pub side: BookSide,
    pub cumulative_total: Decimal,
    /// Width of the depth bar in [0, 1].
    pub depth_fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spread {
    pub value: Decimal,
    /// Percent of the best bid; absent when the best bid is zero.
    pub pct: Option<Decimal>,
}

impl Spread {
    pub fn between(best_bid: &PriceLevel, best_ask: &PriceLevel) -> Self {
        let bid = parse_decimal(&best_bid.price);
        let ask = parse_decimal(&best_ask.price);
        let value = ask.saturating_sub(bid);
        let pct = value
            .checked_div(bid)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
        Self { value, pct }
    }

    pub fn value_text(&self, decimals: u32) -> String {
        format_fixed(self.value, decimals)
    }

    pub fn pct_text(&self, decimals: u32) -> Option<String> {
        self.pct.map(|pct| format_fixed(pct, decimals))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Imbalance {
    pub bid_pct: f64,
    pub ask_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderBookView {
    /// Best bid first.
    pub bid_rows: Vec<DisplayLevel>,
    /// Best ask first. Use [`OrderBookView::asks_for_display`] for screen order.
    pub ask_rows: Vec<DisplayLevel>,
    pub max_bid_size: Decimal,
    pub max_ask_size: Decimal,
    /// Taken from the raw touch, never from grouped rows.
    pub spread: Option<Spread>,
    pub mid: Option<Decimal>,
}

/// Maps one side of the book to display rows and returns the largest size seen.
pub fn display_levels(levels: &[PriceLevel]) -> (Vec<DisplayLevel>, Decimal) {
    let sizes: Vec<Decimal> = levels.iter().map(|l| parse_decimal(&l.size)).collect();
    let max_size = sizes.iter().copied().fold(Decimal::ZERO, Decimal::max);
    let scale = max_size.to_f64().unwrap_or(0.0).max(MIN_DEPTH_SCALE);

    let mut running = Decimal::ZERO;
    let rows = levels
        .iter()
        .zip(sizes)
        .map(|(level, size)| {
            running = running.saturating_add(size);
            let fraction = size.to_f64().unwrap_or(0.0) / scale;
            DisplayLevel {
                price: level.price.clone(),
                size: level.size.clone(),
                side: level.side,
                cumulative_total: running,
                depth_fraction: fraction.clamp(0.0, 1.0),
            }
        })
        .collect();

    (rows, max_size)
}

fn touch(bids: &[PriceLevel], asks: &[PriceLevel]) -> (Option<Spread>, Option<Decimal>) {
    match (bids.first(), asks.first()) {
        (Some(best_bid), Some(best_ask)) => {
            let mid = parse_decimal(&best_bid.price)
                .checked_add(parse_decimal(&best_ask.price))
                .map(|sum| sum / Decimal::TWO);
            (Some(Spread::between(best_bid, best_ask)), mid)
        }
        _ => (None, None),
    }
}

impl OrderBookView {
    pub fn build(bids: &[PriceLevel], asks: &[PriceLevel]) -> Self {
        let (bid_rows, max_bid_size) = display_levels(bids);
        let (ask_rows, max_ask_size) = display_levels(asks);
        let (spread, mid) = touch(bids, asks);

        Self { bid_rows, ask_rows, max_bid_size, max_ask_size, spread, mid }
    }

    /// Rows are bucketed to `tick` and cut to `depth` per side. Spread and mid
    /// still come from the ungrouped best bid and ask.
    pub fn grouped(bids: &[PriceLevel], asks: &[PriceLevel], tick: Decimal, depth: usize) -> Self {
        let mut shown_bids = group_levels(bids, tick);
        let mut shown_asks = group_levels(asks, tick);
        shown_bids.truncate(depth);
        shown_asks.truncate(depth);

        let (bid_rows, max_bid_size) = display_levels(&shown_bids);
        let (ask_rows, max_ask_size) = display_levels(&shown_asks);
        let (spread, mid) = touch(bids, asks);

        Self { bid_rows, ask_rows, max_bid_size, max_ask_size, spread, mid }
    }

    /// Asks in screen order: worst price on top, best ask next to the spread row.
    pub fn asks_for_display(&self) -> impl Iterator<Item = &DisplayLevel> {
        self.ask_rows.iter().rev()
    }

    pub fn best_bid(&self) -> Option<&DisplayLevel> {
        self.bid_rows.first()
    }

    pub fn best_ask(&self) -> Option<&DisplayLevel> {
        self.ask_rows.first()
    }

    /// Midpoint of the touch, if both sides are present.
    pub fn mid_price(&self) -> Option<Decimal> {
        self.mid
    }

    /// Share of the displayed size resting on each side, in percent.
    pub fn imbalance(&self) -> Imbalance {
        let total = |rows: &[DisplayLevel]| {
            rows.last()
                .map(|r| r.cumulative_total)
                .unwrap_or(Decimal::ZERO)
                .to_f64()
                .unwrap_or(0.0)
                .max(0.0)
        };
        let bids = total(&self.bid_rows);
        let asks = total(&self.ask_rows);
        if bids + asks <= 0.0 {
            return Imbalance { bid_pct: 50.0, ask_pct: 50.0 };
        }
        let bid_pct = bids / (bids + asks) * 100.0;
        Imbalance { bid_pct, ask_pct: 100.0 - bid_pct }
    }
}

struct Bucket<'a> {
    price: Decimal,
    total: Decimal,
    side: BookSide,
    levels: Vec<&'a PriceLevel>,
}

/// Buckets levels to a price tick. Bids round down and asks round up so a
/// bucket never crosses the touch. Input order is kept; a non-positive tick
/// leaves the levels untouched. A bucket holding one level keeps its size text.
pub fn group_levels(levels: &[PriceLevel], tick: Decimal) -> Vec<PriceLevel> {
    if tick <= Decimal::ZERO {
        return levels.to_vec();
    }

    let mut grouped: Vec<Bucket<'_>> = Vec::new();
    for level in levels {
        let price = parse_decimal(&level.price);
        let bucket = price
            .checked_div(tick)
            .map(|steps| match level.side {
                BookSide::Bid => steps.floor(),
                BookSide::Ask => steps.ceil(),
            })
            .and_then(|steps| steps.checked_mul(tick))
            .unwrap_or(price);
        let size = parse_decimal(&level.size);

        match grouped.last_mut() {
            Some(last) if last.price == bucket && last.side == level.side => {
                last.total = last.total.saturating_add(size);
                last.levels.push(level);
            }
            _ => grouped.push(Bucket { price: bucket, total: size, side: level.side, levels: vec![level] }),
        }
    }

    grouped
        .into_iter()
        .map(|bucket| PriceLevel {
            price: format_fixed(bucket.price, tick.scale()),
            size: match bucket.levels.as_slice() {
                [only] => only.size.clone(),
                _ => bucket.total.to_string(),
            },
            side: bucket.side,
        })
        .collect()
}
