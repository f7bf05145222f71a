use std::str::FromStr;

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Lenient parse of a display string. Anything that is not a number reads as zero.
pub fn parse_decimal(input: &str) -> Decimal {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

pub fn parse_f64(input: &str) -> f64 {
    parse_decimal(input).to_f64().unwrap_or(0.0)
}

/// Fixed-decimal text, rounding half away from zero.
pub fn format_fixed(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}
