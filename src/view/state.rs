use rust_decimal::Decimal;

use super::decimal::format_fixed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookTab {
    #[default]
    OrderBook,
    Trades,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BottomTab {
    #[default]
    Balances,
    Positions,
    Borrows,
    OpenOrders,
    FillHistory,
    OrderHistory,
    PositionHistory,
}

impl BottomTab {
    pub const ALL: [BottomTab; 7] = [
        BottomTab::Balances,
        BottomTab::Positions,
        BottomTab::Borrows,
        BottomTab::OpenOrders,
        BottomTab::FillHistory,
        BottomTab::OrderHistory,
        BottomTab::PositionHistory,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            BottomTab::Balances => "Balances",
            BottomTab::Positions => "Positions",
            BottomTab::Borrows => "Borrows",
            BottomTab::OpenOrders => "Open Orders",
            BottomTab::FillHistory => "Fill History",
            BottomTab::OrderHistory => "Order History",
            BottomTab::PositionHistory => "Position History",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// Price bucket for the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// Levels as received.
    #[default]
    Raw,
    Cent,
    Dime,
    One,
}

impl Grouping {
    pub fn tick(&self) -> Decimal {
        match self {
            Grouping::Raw => Decimal::ZERO,
            Grouping::Cent => Decimal::new(1, 2),
            Grouping::Dime => Decimal::new(1, 1),
            Grouping::One => Decimal::ONE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grouping::Raw => "raw",
            Grouping::Cent => "0.01",
            Grouping::Dime => "0.1",
            Grouping::One => "1",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Grouping::Raw => Grouping::Cent,
            Grouping::Cent => Grouping::Dime,
            Grouping::Dime => Grouping::One,
            Grouping::One => Grouping::Raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSide {
    #[default]
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderType {
    #[default]
    Limit,
    Market,
    Conditional,
}

impl OrderType {
    pub fn next(&self) -> Self {
        match self {
            OrderType::Limit => OrderType::Market,
            OrderType::Market => OrderType::Conditional,
            OrderType::Conditional => OrderType::Limit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderType::Limit => "Limit",
            OrderType::Market => "Market",
            OrderType::Conditional => "Conditional",
        }
    }
}

/// Everything the screen toggles locally. Passed into rendering by value and
/// replaced on every action.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub book_tab: BookTab,
    pub bottom_tab: BottomTab,
    pub hide_zero: bool,
    pub margin: bool,
    pub grouping: Grouping,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub price_input: String,
    pub quantity_input: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            book_tab: BookTab::default(),
            bottom_tab: BottomTab::default(),
            hide_zero: false,
            margin: false,
            grouping: Grouping::default(),
            side: OrderSide::default(),
            order_type: OrderType::default(),
            price_input: "112.96".to_string(),
            quantity_input: "100".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    ShowBook(BookTab),
    ShowBottom(BottomTab),
    ToggleHideZero,
    ToggleMargin,
    CycleGrouping,
    SwitchSide,
    CycleOrderType,
    /// Replace the price input with the given mid price.
    UseMid(Decimal),
}

impl UiAction {
    /// Key bindings of the terminal screen. `p` (mid price) needs the book and
    /// is resolved by the caller.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            'b' => Some(Self::ShowBook(BookTab::OrderBook)),
            't' => Some(Self::ShowBook(BookTab::Trades)),
            '1'..='7' => {
                let idx = c.to_digit(10)? as usize - 1;
                BottomTab::ALL.get(idx).copied().map(Self::ShowBottom)
            }
            'h' => Some(Self::ToggleHideZero),
            'm' => Some(Self::ToggleMargin),
            'g' => Some(Self::CycleGrouping),
            's' => Some(Self::SwitchSide),
            'o' => Some(Self::CycleOrderType),
            _ => None,
        }
    }
}

impl UiState {
    pub fn apply(self, action: UiAction) -> Self {
        match action {
            UiAction::ShowBook(tab) => Self { book_tab: tab, ..self },
            UiAction::ShowBottom(tab) => Self { bottom_tab: tab, ..self },
            UiAction::ToggleHideZero => Self { hide_zero: !self.hide_zero, ..self },
            UiAction::ToggleMargin => Self { margin: !self.margin, ..self },
            UiAction::CycleGrouping => Self { grouping: self.grouping.next(), ..self },
            UiAction::SwitchSide => {
                let side = match self.side {
                    OrderSide::Buy => OrderSide::Sell,
                    OrderSide::Sell => OrderSide::Buy,
                };
                Self { side, ..self }
            }
            UiAction::CycleOrderType => Self { order_type: self.order_type.next(), ..self },
            UiAction::UseMid(mid) => Self { price_input: format_fixed(mid, 2), ..self },
        }
    }
}
