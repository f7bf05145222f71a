use rust_decimal::Decimal;

use super::decimal::parse_decimal;
use crate::market::types::Balance;

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRow {
    pub icon: String,
    pub asset: String,
    pub ticker: String,
    pub balance: String,
    pub balance_value: String,
    pub available: String,
    pub available_value: String,
    pub lend_borrow: String,
    pub open_orders: String,
}

impl From<&Balance> for BalanceRow {
    fn from(b: &Balance) -> Self {
        let icon = b
            .icon
            .clone()
            .filter(|icon| !icon.trim().is_empty())
            .unwrap_or_else(|| b.asset.chars().take(1).collect());
        Self {
            icon,
            asset: b.asset.clone(),
            ticker: b.ticker.clone(),
            balance: b.balance.clone(),
            balance_value: b.balance_value.clone(),
            available: b.available.clone(),
            available_value: b.available_value.clone(),
            lend_borrow: b.lend_borrow.clone().unwrap_or_else(|| "-".to_string()),
            open_orders: b.open_orders.clone(),
        }
    }
}

pub fn is_non_zero(balance: &Balance) -> bool {
    parse_decimal(&balance.balance) > Decimal::ZERO || parse_decimal(&balance.available) > Decimal::ZERO
}

/// With `hide_zero` off this is the identity; otherwise only holdings with a
/// positive total or available amount remain. Order is preserved.
pub fn filter_balances(balances: &[Balance], hide_zero: bool) -> Vec<Balance> {
    balances
        .iter()
        .filter(|b| !hide_zero || is_non_zero(b))
        .cloned()
        .collect()
}

pub fn balance_rows(balances: &[Balance], hide_zero: bool) -> Vec<BalanceRow> {
    filter_balances(balances, hide_zero).iter().map(BalanceRow::from).collect()
}
