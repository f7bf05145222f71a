use super::decimal::{format_fixed, parse_decimal};
use super::state::{OrderSide, OrderType, UiState};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntryView {
    pub side: OrderSide,
    pub order_type: OrderType,
    pub price: String,
    pub quantity: String,
    /// price * quantity, two decimals.
    pub order_value: String,
    pub show_margin: bool,
}

impl OrderEntryView {
    /// Display only: nothing here validates or submits the order.
    pub fn build(state: &UiState) -> Self {
        let value = parse_decimal(&state.price_input)
            .checked_mul(parse_decimal(&state.quantity_input))
            .unwrap_or_default();
        Self {
            side: state.side,
            order_type: state.order_type,
            price: state.price_input.clone(),
            quantity: state.quantity_input.clone(),
            order_value: format_fixed(value, 2),
            show_margin: state.margin,
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self.side {
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
        }
    }
}
