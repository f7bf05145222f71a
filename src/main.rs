use trade_view::{
    market::{MarketView, Source},
    ui,
    view::state::{UiAction, UiState},
    ViewConfig,
};
use anyhow::Result;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use ratatui::{backend::CrosstermBackend, Terminal};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

pub fn init_file_logging() {
    let file_appender = RollingFileAppender::new(Rotation::NEVER, "logs", "trade_view.log");

    let result = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_level(true)
        .compact()
        .try_init();
    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

pub fn init_stderr_logging() {
    let result = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

struct App {
    view: MarketView,
    state: UiState,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Drop for App {
    fn drop(&mut self) {
        // Cleanup terminal
        let _ = self.terminal.show_cursor();
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}

impl App {
    fn new(view: MarketView) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            view,
            state: UiState::default(),
            terminal,
        })
    }

    async fn update(&mut self) {
        if let Err(e) = self.view.refresh().await {
            error!("Error updating market data: {}", e);
        }
    }

    fn draw(&mut self) -> Result<()> {
        let screen = self.view.screen(&self.state);
        let source = self.view.source_name().to_string();
        self.terminal.draw(|f| ui::draw(f, &screen, &source))?;
        Ok(())
    }

    /// Returns false when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let action = match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char('p') => self.view.screen(&self.state).book.mid_price().map(UiAction::UseMid),
            KeyCode::Char(c) => UiAction::from_key(c),
            _ => None,
        };

        if let Some(action) = action {
            self.state = std::mem::take(&mut self.state).apply(action);
        }
        true
    }
}

async fn run(mut app: App) -> Result<()> {
    let refresh_every = Duration::from_millis(app.view.config().refresh_ms);
    let mut last_refresh: Option<Instant> = None;

    loop {
        if last_refresh.map_or(true, |at| at.elapsed() >= refresh_every) {
            app.update().await;
            last_refresh = Some(Instant::now());
        }

        app.draw()?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if !app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }

    info!("Exiting");
    Ok(())
}

/// Prints the book once, without taking over the terminal.
async fn print_once(mut view: MarketView) -> Result<()> {
    view.refresh().await?;
    let screen = view.screen(&UiState::default());

    println!("{} ({})", screen.symbol, view.source_name());
    if let Some(info) = &screen.info {
        println!("Last: {}  Mark: {}", info.last_price, info.mark_price);
    }
    println!("{:<12} {:>12} {:>12}", "Price", "Size", "Total");
    println!("{:-<38}", "");

    for ask in screen.book.asks_for_display() {
        println!("\x1b[31m{:<12} {:>12} {:>12}\x1b[0m", ask.price, ask.size, ask.cumulative_total.to_string());
    }

    println!("{:-<38}", "");
    println!("Spread: {} ({})", screen.spread_text, screen.spread_pct_text);
    println!("{:-<38}", "");

    for bid in &screen.book.bid_rows {
        println!("\x1b[32m{:<12} {:>12} {:>12}\x1b[0m", bid.price, bid.size, bid.cumulative_total.to_string());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let once = std::env::args().any(|arg| arg == "--once");
    if once {
        init_stderr_logging();
    } else {
        init_file_logging();
    }

    let config = ViewConfig::load()?;
    info!("Starting trade_view for {} using {:?} source", config.symbol, config.source);
    let source = Source::from_config(&config);
    let view = MarketView::new(config, source);

    if once {
        return print_once(view).await;
    }

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let app = App::new(view)?;
    run(app).await
}
