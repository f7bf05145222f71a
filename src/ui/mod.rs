use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::view::chart::ChartView;
use crate::view::orderbook::DisplayLevel;
use crate::view::state::{BookTab, BottomTab, OrderSide};
use crate::view::ScreenView;
use crate::market::types::{BookSide, TradeSide};


const BID_COLOR: Color = Color::Green;
const ASK_COLOR: Color = Color::Red;
const BID_BAR: Color = Color::Rgb(14, 48, 30);
const ASK_BAR: Color = Color::Rgb(60, 18, 22);

/// Cells covered by a depth bar of `fraction` on a row `width` cells wide.
pub fn depth_bar_width(fraction: f64, width: usize) -> usize {
    if !fraction.is_finite() {
        return 0;
    }
    ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width)
}

pub fn draw(f: &mut Frame<'_>, screen: &ScreenView, source: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(3),  // Market info
            Constraint::Min(10),    // Chart, book, order entry
            Constraint::Length(12), // Bottom tabs
        ])
        .split(f.area());

    draw_header(f, chunks[0], source);
    draw_info_bar(f, chunks[1], screen);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Chart
            Constraint::Percentage(28), // Book / trades
            Constraint::Percentage(22), // Order entry
        ])
        .split(chunks[2]);

    draw_chart(f, main_chunks[0], &screen.chart);
    match screen.state.book_tab {
        BookTab::OrderBook => draw_order_book(f, main_chunks[1], screen),
        BookTab::Trades => draw_trades(f, main_chunks[1], screen),
    }
    draw_order_entry(f, main_chunks[2], screen);
    draw_bottom_tabs(f, chunks[3], screen);
}

fn draw_header(f: &mut Frame<'_>, area: Rect, source: &str) {
    let header = Paragraph::new(format!(
        "Spot  Futures  Lend  More    source: {}    b/t book/trades  1-7 tabs  h hide zero  g group  s side  o type  p mid  m margin  q quit",
        source
    ))
    .block(Block::default().borders(Borders::ALL).title("Trade View"));
    f.render_widget(header, area);
}

fn draw_info_bar(f: &mut Frame<'_>, area: Rect, screen: &ScreenView) {
    let line = match &screen.info {
        Some(info) => Line::from(vec![
            Span::styled(info.symbol.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled(
                info.last_price.clone(),
                Style::default().fg(BID_COLOR).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(info.mark_price.clone(), Style::default().fg(Color::Gray)),
        ]),
        None => Line::from(format!("{}  No data available", screen.symbol)),
    };
    f.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::ALL)), area);
}

fn chart_lines(chart: &ChartView) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(chart.rows as usize);
    for row in (0..chart.rows).rev() {
        let spans: Vec<Span> = chart
            .candles
            .iter()
            .map(|candle| {
                let color = if candle.bullish { BID_COLOR } else { ASK_COLOR };
                let glyph = if candle.covers_body(row) {
                    "█ "
                } else if candle.covers_wick(row) {
                    "│ "
                } else {
                    "  "
                };
                Span::styled(glyph, Style::default().fg(color))
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}

fn draw_chart(f: &mut Frame<'_>, area: Rect, chart: &ChartView) {
    let mut lines = Vec::new();
    if let Some(header) = &chart.header {
        let color = if header.bullish { BID_COLOR } else { ASK_COLOR };
        lines.push(Line::from(vec![
            Span::raw(format!("O {}  H {}  L {}  C {}  ", header.open, header.high, header.low, header.close)),
            Span::styled(
                format!("{} ({})", header.change, header.change_pct),
                Style::default().fg(color),
            ),
        ]));
        lines.push(Line::from(format!("range {} - {}", chart.price_low, chart.price_high)));
    } else {
        lines.push(Line::from("No candles"));
    }
    lines.extend(chart_lines(chart));

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Chart 1h"));
    f.render_widget(widget, area);
}

fn level_line(level: &DisplayLevel, width: usize) -> Line<'static> {
    let (fg, bar) = match level.side {
        BookSide::Bid => (BID_COLOR, BID_BAR),
        BookSide::Ask => (ASK_COLOR, ASK_BAR),
    };
    let column = width / 3;
    let text = format!(
        "{:<col$}{:>col$}{:>rest$}",
        level.price,
        level.size,
        level.cumulative_total.to_string(),
        col = column,
        rest = width.saturating_sub(column * 2)
    );
    let chars: Vec<char> = text.chars().collect();
    let filled = depth_bar_width(level.depth_fraction, chars.len());
    let (covered, uncovered) = chars.split_at(filled);

    Line::from(vec![
        Span::styled(covered.iter().collect::<String>(), Style::default().fg(fg).bg(bar)),
        Span::styled(uncovered.iter().collect::<String>(), Style::default().fg(fg)),
    ])
}

fn draw_order_book(f: &mut Frame<'_>, area: Rect, screen: &ScreenView) {
    let width = area.width.saturating_sub(2) as usize;
    let column = width / 3;
    let mut lines = vec![Line::from(Span::styled(
        format!("{:<col$}{:>col$}{:>rest$}", "Price", "Size", "Total", col = column, rest = width.saturating_sub(column * 2)),
        Style::default().fg(Color::Gray),
    ))];

    lines.extend(screen.book.asks_for_display().map(|level| level_line(level, width)));
    lines.push(Line::from(Span::styled(
        format!(
            "{:<half$}{:>rest$}",
            format!("{} Spread", screen.spread_text),
            screen.spread_pct_text,
            half = width / 2,
            rest = width - width / 2
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.extend(screen.book.bid_rows.iter().map(|level| level_line(level, width)));

    lines.push(Line::from(format!(
        "Bids: {:.1}%   group {}   Asks: {:.1}%",
        screen.imbalance.bid_pct,
        screen.state.grouping.label(),
        screen.imbalance.ask_pct
    )));

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Order Book"));
    f.render_widget(widget, area);
}

fn draw_trades(f: &mut Frame<'_>, area: Rect, screen: &ScreenView) {
    let rows = screen.trades.iter().map(|trade| {
        let color = match trade.side {
            TradeSide::Buy => BID_COLOR,
            TradeSide::Sell => ASK_COLOR,
        };
        Row::new(vec![trade.price.clone(), trade.size.clone(), trade.time_of_day.clone()])
            .style(Style::default().fg(color))
    });

    let title = format!(
        "Trades  Buy: {:.1}%  Sell: {:.1}%",
        screen.tape.buy_pct, screen.tape.sell_pct
    );
    let table = Table::new(
        rows,
        [Constraint::Percentage(35), Constraint::Percentage(30), Constraint::Percentage(35)],
    )
    .header(Row::new(vec!["Price", "Size", "Time"]).style(Style::default().fg(Color::Gray)))
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

fn draw_order_entry(f: &mut Frame<'_>, area: Rect, screen: &ScreenView) {
    let entry = &screen.order_entry;
    let side_color = match entry.side {
        OrderSide::Buy => BID_COLOR,
        OrderSide::Sell => ASK_COLOR,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("[{}] {}", entry.action_label(), entry.order_type.label()),
            Style::default().fg(side_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Price:       {:>12}", entry.price)),
        Line::from(format!("Quantity:    {:>12}", entry.quantity)),
        Line::from(format!("Order Value: {:>12}", entry.order_value)),
        Line::from(""),
        Line::from(format!("[{}] Margin", if entry.show_margin { "x" } else { " " })),
    ];
    if entry.show_margin {
        lines.push(Line::from("Cross Margin Overview"));
        lines.push(Line::from("Initial Margin       0%"));
        lines.push(Line::from("Maintenance Margin   0%"));
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Order Entry"));
    f.render_widget(widget, area);
}

fn draw_bottom_tabs(f: &mut Frame<'_>, area: Rect, screen: &ScreenView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let tabs = Tabs::new(BottomTab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .select(screen.state.bottom_tab.index())
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, chunks[0]);

    match screen.state.bottom_tab {
        BottomTab::Balances => draw_balances(f, chunks[1], screen),
        other => {
            let placeholder = Paragraph::new(format!("{} Content Placeholder", other.title()))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(placeholder, chunks[1]);
        }
    }
}

fn draw_balances(f: &mut Frame<'_>, area: Rect, screen: &ScreenView) {
    let rows = screen.balances.iter().map(|b| {
        Row::new(vec![
            format!("{:>2} {} ({})", b.icon, b.ticker, b.asset),
            format!("{} {}", b.balance, b.balance_value),
            format!("{} {}", b.available, b.available_value),
            b.lend_borrow.clone(),
            b.open_orders.clone(),
        ])
    });

    let title = format!(
        "Your Balances   [{}] Hide zero balances",
        if screen.state.hide_zero { "x" } else { " " }
    );
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30), // Asset
            Constraint::Percentage(20), // Total
            Constraint::Percentage(20), // Available
            Constraint::Percentage(15), // Lend & Borrow
            Constraint::Percentage(15), // Open orders
        ],
    )
    .header(
        Row::new(vec!["Asset", "Total Balance", "Available Balance", "Lend & Borrow", "Open Orders"])
            .style(Style::default().fg(Color::Gray)),
    )
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}
