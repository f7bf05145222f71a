#[cfg(test)]
mod orderbook_tests {
    use crate::market::mock::MockSource;
    use crate::market::types::PriceLevel;
    use crate::view::decimal::parse_decimal;
    use crate::view::orderbook::OrderBookView;
    use rust_decimal::Decimal;

    fn bids() -> Vec<PriceLevel> {
        MockSource::levels().bids
    }

    fn asks() -> Vec<PriceLevel> {
        MockSource::levels().asks
    }

    #[test]
    fn cumulative_total_is_running_sum_from_best_price() {
        let book = OrderBookView::build(&bids(), &asks());
        for rows in [&book.bid_rows, &book.ask_rows] {
            let mut expected = Decimal::ZERO;
            for row in rows.iter() {
                expected += parse_decimal(&row.size);
                assert_eq!(row.cumulative_total, expected);
            }
            assert!(rows.windows(2).all(|w| w[0].cumulative_total <= w[1].cumulative_total));
        }
        assert_eq!(book.bid_rows[2].cumulative_total, Decimal::new(88194, 2));
        assert_eq!(book.ask_rows.last().map(|r| r.cumulative_total), Some(Decimal::new(194347, 2)));
    }

    #[test]
    fn depth_fraction_is_scaled_to_largest_size() {
        let book = OrderBookView::build(&bids(), &asks());
        for row in book.bid_rows.iter().chain(book.ask_rows.iter()) {
            assert!((0.0..=1.0).contains(&row.depth_fraction));
        }
        let full_bids: Vec<_> = book.bid_rows.iter().filter(|r| r.depth_fraction == 1.0).collect();
        assert_eq!(full_bids.len(), 1);
        assert_eq!(full_bids[0].price, "112.94");
        assert_eq!(book.max_bid_size, Decimal::new(53229, 2));

        let full_asks: Vec<_> = book.ask_rows.iter().filter(|r| r.depth_fraction == 1.0).collect();
        assert_eq!(full_asks.len(), 1);
        assert_eq!(full_asks[0].price, "112.95");
    }

    #[test]
    fn ties_share_the_full_bar() {
        let bids = vec![
            PriceLevel::bid("10", "5"),
            PriceLevel::bid("9", "2"),
            PriceLevel::bid("8", "5"),
        ];
        let book = OrderBookView::build(&bids, &[]);
        let fractions: Vec<f64> = book.bid_rows.iter().map(|r| r.depth_fraction).collect();
        assert_eq!(fractions, vec![1.0, 0.4, 1.0]);
    }

    #[test]
    fn spread_matches_the_touch() {
        let book = OrderBookView::build(&bids(), &asks());
        let spread = book.spread.clone().unwrap();
        assert_eq!(spread.value, Decimal::new(1, 2));
        assert_eq!(spread.value_text(2), "0.01");
        assert_eq!(spread.pct_text(3).as_deref(), Some("0.009"));
        assert_eq!(book.mid_price(), Some(Decimal::new(112945, 3)));
    }

    #[test]
    fn empty_side_has_no_spread() {
        let book = OrderBookView::build(&bids(), &[]);
        assert!(book.spread.is_none());
        assert!(book.ask_rows.is_empty());
        assert_eq!(book.max_ask_size, Decimal::ZERO);
        assert_eq!(book.mid_price(), None);

        let book = OrderBookView::build(&[], &[]);
        assert!(book.spread.is_none());
        assert_eq!(book.imbalance().bid_pct, 50.0);
    }

    #[test]
    fn zero_best_bid_keeps_spread_without_percentage() {
        let book = OrderBookView::build(&[PriceLevel::bid("0", "1")], &[PriceLevel::ask("0.5", "1")]);
        let spread = book.spread.unwrap();
        assert_eq!(spread.value_text(2), "0.50");
        assert_eq!(spread.pct_text(3), None);
    }

    #[test]
    fn malformed_numbers_degrade_to_zero() {
        let bids = vec![PriceLevel::bid("abc", "n/a"), PriceLevel::bid("9", "4")];
        let book = OrderBookView::build(&bids, &[PriceLevel::ask("10", "")]);
        assert_eq!(book.bid_rows[0].depth_fraction, 0.0);
        assert_eq!(book.bid_rows[0].cumulative_total, Decimal::ZERO);
        assert_eq!(book.bid_rows[1].cumulative_total, Decimal::new(4, 0));
        assert_eq!(book.ask_rows[0].depth_fraction, 0.0);
        assert_eq!(book.spread.unwrap().value, Decimal::TEN);
    }

    #[test]
    fn asks_display_best_price_last() {
        let book = OrderBookView::build(&bids(), &asks());
        let shown: Vec<&str> = book.asks_for_display().map(|r| r.price.as_str()).collect();
        assert_eq!(shown.first(), Some(&"113.03"));
        assert_eq!(shown.last(), Some(&"112.95"));
        // cumulative order is untouched by the display reversal
        assert_eq!(book.ask_rows[0].cumulative_total, Decimal::new(43156, 2));
    }

    #[test]
    fn imbalance_splits_displayed_size() {
        let book = OrderBookView::build(&[PriceLevel::bid("1", "3")], &[PriceLevel::ask("2", "1")]);
        let imbalance = book.imbalance();
        assert_eq!(imbalance.bid_pct, 75.0);
        assert_eq!(imbalance.ask_pct, 25.0);
    }

    #[test]
    fn build_is_idempotent() {
        assert_eq!(OrderBookView::build(&bids(), &asks()), OrderBookView::build(&bids(), &asks()));
    }
}

#[cfg(test)]
mod trade_tests {
    use crate::market::types::{Trade, TradeSide};
    use crate::view::trades::{format_time_of_day, format_trades, format_trades_in, tape_ratio};
    use chrono::{FixedOffset, Local, TimeZone, Utc};

    fn trade(id: &str, side: TradeSide, timestamp: i64) -> Trade {
        Trade {
            id: id.to_string(),
            price: "112.94".to_string(),
            size: "0.42".to_string(),
            side,
            timestamp,
        }
    }

    #[test]
    fn formats_local_wall_clock() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 1, 23, 9, 5)
            .earliest()
            .unwrap()
            .timestamp_millis();
        let rows = format_trades(&[trade("1", TradeSide::Buy, at)]);
        assert_eq!(rows[0].time_of_day, "23:09:05");
        assert_eq!(rows[0].side_label, "Buy");
    }

    #[test]
    fn pads_every_component() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 4, 5, 6).unwrap().timestamp_millis();
        assert_eq!(format_time_of_day(at, &Utc), "04:05:06");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_time_of_day(at, &plus_two), "06:05:06");
    }

    #[test]
    fn preserves_order_and_sides() {
        let trades = vec![
            trade("3", TradeSide::Sell, 3_000),
            trade("2", TradeSide::Buy, 2_000),
            trade("1", TradeSide::Sell, 1_000),
        ];
        let rows = format_trades_in(&trades, &Utc);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(rows[0].side_label, "Sell");
        assert_eq!(rows, format_trades_in(&trades, &Utc));
    }

    #[test]
    fn tape_ratio_counts_prints() {
        let trades = vec![
            trade("1", TradeSide::Buy, 0),
            trade("2", TradeSide::Buy, 0),
            trade("3", TradeSide::Buy, 0),
            trade("4", TradeSide::Sell, 0),
        ];
        let ratio = tape_ratio(&trades);
        assert_eq!(ratio.buy_pct, 75.0);
        assert_eq!(ratio.sell_pct, 25.0);
        assert_eq!(tape_ratio(&[]).buy_pct, 50.0);
    }
}

#[cfg(test)]
mod balance_tests {
    use crate::market::mock::MockSource;
    use crate::market::types::Balance;
    use crate::view::balances::{balance_rows, filter_balances};

    fn balance(asset: &str, total: &str, available: &str) -> Balance {
        Balance {
            asset: asset.to_string(),
            ticker: asset.to_string(),
            icon: None,
            balance: total.to_string(),
            balance_value: "$0.00".to_string(),
            available: available.to_string(),
            available_value: "$0.00".to_string(),
            lend_borrow: None,
            open_orders: "0".to_string(),
        }
    }

    #[test]
    fn hide_zero_keeps_funded_assets() {
        let balances = vec![balance("USDC", "0", "0"), balance("SOL", "5", "0")];
        let kept = filter_balances(&balances, true);
        assert_eq!(kept, vec![balances[1].clone()]);
    }

    #[test]
    fn identity_when_not_hiding() {
        let balances = vec![balance("USDC", "0", "0"), balance("SOL", "5", "0")];
        assert_eq!(filter_balances(&balances, false), balances);
    }

    #[test]
    fn available_alone_is_enough_and_junk_is_zero() {
        let balances = vec![
            balance("A", "0", "0.1"),
            balance("B", "abc", "-"),
            balance("C", "-3", "0"),
            balance("D", "2", "x"),
        ];
        let kept: Vec<String> = filter_balances(&balances, true).into_iter().map(|b| b.asset).collect();
        assert_eq!(kept, vec!["A", "D"]);
    }

    #[test]
    fn rows_fill_display_defaults() {
        let rows = balance_rows(&[balance("AAVE", "1", "1")], false);
        assert_eq!(rows[0].lend_borrow, "-");
        assert_eq!(rows[0].icon, "A");

        let fixtures = balance_rows(&MockSource::balances(), true);
        assert!(fixtures.is_empty());
    }
}

#[cfg(test)]
mod chart_tests {
    use crate::market::mock::MockSource;
    use crate::market::types::Kline;
    use crate::view::chart::{ohlc_header, place_candles};

    fn kline(open: &str, high: &str, low: &str, close: &str) -> Kline {
        Kline {
            timestamp: 0,
            open: open.to_string(),
            high: high.to_string(),
            low: low.to_string(),
            close: close.to_string(),
            volume: "0".to_string(),
        }
    }

    #[test]
    fn candles_span_the_plot() {
        let klines = vec![kline("100", "110", "100", "105"), kline("105", "120", "104", "101")];
        let chart = place_candles(&klines, 21);
        assert_eq!(chart.candles[0].wick_low, 0);
        assert_eq!(chart.candles[1].wick_high, 20);
        assert_eq!(chart.candles[0].body_low, 0);
        assert_eq!(chart.candles[0].body_high, 5);
        assert!(chart.candles[0].bullish);
        assert!(!chart.candles[1].bullish);
        assert_eq!(chart.candles[1].body_low, 1);
        assert_eq!(chart.candles[1].body_high, 5);
    }

    #[test]
    fn candles_stay_inside_rows() {
        let chart = place_candles(&MockSource::klines(0), 16);
        assert_eq!(chart.candles.len(), 11);
        for candle in &chart.candles {
            assert!(candle.wick_low <= candle.body_low);
            assert!(candle.body_high <= candle.wick_high);
            assert!(candle.wick_high < 16);
        }
    }

    #[test]
    fn flat_or_empty_input_degrades() {
        assert!(place_candles(&[], 10).candles.is_empty());
        let flat = place_candles(&[kline("1", "1", "1", "1")], 10);
        assert_eq!(flat.candles[0].wick_high, 0);
        assert!(flat.candles[0].covers_body(0));
    }

    #[test]
    fn header_reports_change() {
        let header = ohlc_header(&kline("112.64", "112.97", "112.47", "112.94"));
        assert_eq!(header.change, "0.30");
        assert_eq!(header.change_pct, "+0.27%");
        assert!(header.bullish);
    }
}

#[cfg(test)]
mod state_tests {
    use crate::config::ViewConfig;
    use crate::market::mock::MockSource;
    use crate::market::types::{MarketSnapshot, PriceLevel};
    use crate::view::order_entry::OrderEntryView;
    use crate::view::render;
    use crate::view::state::{BookTab, BottomTab, Grouping, OrderSide, OrderType, UiAction, UiState};
    use rust_decimal::Decimal;

    fn snapshot() -> MarketSnapshot {
        MarketSnapshot {
            book: MockSource::levels(),
            trades: MockSource::trades(1_700_000_000_000),
            balances: MockSource::balances(),
            klines: MockSource::klines(1_700_000_000_000),
            summary: Some(MockSource::summary()),
            ..MarketSnapshot::empty("SOL/USDC")
        }
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(UiAction::from_key('t'), Some(UiAction::ShowBook(BookTab::Trades)));
        assert_eq!(UiAction::from_key('4'), Some(UiAction::ShowBottom(BottomTab::OpenOrders)));
        assert_eq!(UiAction::from_key('7'), Some(UiAction::ShowBottom(BottomTab::PositionHistory)));
        assert_eq!(UiAction::from_key('8'), None);
        assert_eq!(UiAction::from_key('x'), None);
    }

    #[test]
    fn actions_are_pure_transitions() {
        let state = UiState::default();
        let toggled = state.clone().apply(UiAction::ToggleHideZero);
        assert!(toggled.hide_zero);
        assert!(!state.hide_zero);
        assert!(!toggled.apply(UiAction::ToggleHideZero).hide_zero);

        let state = UiState::default()
            .apply(UiAction::CycleGrouping)
            .apply(UiAction::SwitchSide)
            .apply(UiAction::CycleOrderType)
            .apply(UiAction::ToggleMargin);
        assert_eq!(state.grouping, Grouping::Cent);
        assert_eq!(state.side, OrderSide::Sell);
        assert_eq!(state.order_type, OrderType::Market);
        assert!(state.margin);
        assert_eq!(state.grouping.next().next().next(), Grouping::Raw);
    }

    #[test]
    fn mid_price_fills_order_entry() {
        let state = UiState::default().apply(UiAction::UseMid(Decimal::new(112945, 3)));
        let entry = OrderEntryView::build(&state);
        assert_eq!(entry.price, "112.95");
        assert_eq!(entry.order_value, "11295.00");
        assert_eq!(entry.action_label(), "Buy");
    }

    #[test]
    fn render_applies_grouping_and_filter() {
        let config = ViewConfig::default();
        let state = UiState::default()
            .apply(UiAction::CycleGrouping)
            .apply(UiAction::CycleGrouping);
        let screen = render(&state, &snapshot(), &config);
        let prices: Vec<&str> = screen.book.bid_rows.iter().map(|r| r.price.as_str()).collect();
        assert_eq!(prices, vec!["112.9", "112.8"]);
        assert_eq!(screen.book.ask_rows[0].price, "113.0");
        assert_eq!(screen.spread_text, "0.01");

        let screen = render(&state.apply(UiAction::ToggleHideZero), &snapshot(), &config);
        assert!(screen.balances.is_empty());
        assert_eq!(screen.trades.len(), 10);
    }

    #[test]
    fn spread_and_mid_ignore_grouping() {
        let config = ViewConfig::default();
        let mut state = UiState::default();
        for _ in 0..4 {
            let screen = render(&state, &snapshot(), &config);
            assert_eq!(screen.spread_text, "0.01", "grouping {}", state.grouping.label());
            assert_eq!(screen.spread_pct_text, "0.009%");
            assert_eq!(screen.book.mid_price(), Some(Decimal::new(112945, 3)));
            state = state.apply(UiAction::CycleGrouping);
        }
        assert_eq!(state.grouping, Grouping::Raw);
    }

    #[test]
    fn default_grouping_shows_levels_as_received() {
        let mut snapshot = snapshot();
        snapshot.book.bids.insert(0, PriceLevel::bid("112.945", "n/a"));
        let screen = render(&UiState::default(), &snapshot, &ViewConfig::default());
        assert_eq!(screen.book.bid_rows[0].price, "112.945");
        assert_eq!(screen.book.bid_rows[0].size, "n/a");
        assert_eq!(screen.book.bid_rows[1].price, "112.94");
        assert_eq!(screen.book.bid_rows.len(), 12);
    }

    #[test]
    fn render_limits_depth_and_shows_placeholder() {
        let config = ViewConfig { book_depth: 3, ..ViewConfig::default() };
        let mut snapshot = snapshot();
        snapshot.book.asks.clear();
        let screen = render(&UiState::default(), &snapshot, &config);
        assert_eq!(screen.book.bid_rows.len(), 3);
        assert_eq!(screen.spread_text, crate::view::UNAVAILABLE);
        assert_eq!(screen.spread_pct_text, crate::view::UNAVAILABLE);
        assert_eq!(screen, render(&UiState::default(), &snapshot, &config));
    }
}
