//! EdgeQuant Decision Dashboard - Terminal UI for live trade decisions
//!
//! Loads instruments and snapshots from the backend REST API and follows the
//! live feed for ticks, trade decisions and ZeroHero suggestions.
//!
//! Usage:
//!   edgequant-dashboard [--config <path>] [--headless]
//!
//! With `--headless` the session runs without the terminal UI and logs a
//! periodic summary to stdout until Ctrl+C.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use edgequant::application::dashboard::{ui, App};
use edgequant::{init_tracing, init_tracing_to_file, DashboardConfig};
use edgequant_dashboard::bin_common::{
    interruptible_sleep, load_config_from_env, parse_args, parse_cli, BinaryRunner, RunConfig,
};

/// Interval between headless status summaries
const STATUS_INTERVAL_SECS: u64 = 30;

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = parse_cli(&parse_args())?;

    // Load config first (before logging is initialized)
    let config_path = load_config_from_env(cli.config_type());
    let config = DashboardConfig::load(&config_path)?;

    // Create tokio runtime
    let runtime = tokio::runtime::Runtime::new()?;

    if cli.headless {
        init_tracing(&config.log_level);
        config.log();

        return runtime.block_on(async {
            let app = App::initialize(&config).await?;
            let mut runner = HeadlessDashboard {
                run_config: RunConfig::new("EdgeQuant Dashboard (headless)")
                    .with_status_interval(STATUS_INTERVAL_SECS),
                app,
            };
            runner.execute().await
        });
    }

    // Logging goes to a file; writing to stdout would corrupt the alternate screen
    init_tracing_to_file(&config.log_level, &config.log_file)?;
    config.log();

    // Initialize the app (opens the live feed, requests instruments)
    let mut app = runtime.block_on(App::initialize(&config))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Shutdown app
    runtime.block_on(app.shutdown());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Pick up feed connect/close/error events for the footer
        app.poll_feed();

        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle input with 10ms timeout (for real-time updates)
        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Dashboard session without a terminal UI
struct HeadlessDashboard {
    run_config: RunConfig,
    app: App,
}

impl HeadlessDashboard {
    fn log_summary(&self) {
        let state = self.app.state.read();
        let selected = state
            .selected_instrument()
            .map(|instrument| instrument.label())
            .unwrap_or_else(|| "-".to_string());

        info!(
            "[Dashboard] Feed: {} | Instruments: {} | Selected: {} | Last: {} | Ticks: {} | Trades: {} | ZeroHero: {}",
            self.app.feed_state().label(),
            state.instruments().len(),
            selected,
            state.metrics().display("last_price"),
            state.tick_prices().len(),
            state.trade_count(),
            state.suggestions().len()
        );
    }
}

impl BinaryRunner for HeadlessDashboard {
    async fn run(&mut self) -> Result<()> {
        let mut last_summary = Instant::now();
        let mut last_status = None;

        while interruptible_sleep(self.run_config.poll_interval()).await {
            self.app.poll_feed();

            let status = self.app.status_line();
            if status.is_some() && status != last_status {
                if let Some(message) = &status {
                    info!("[Dashboard] {}", message);
                }
                last_status = status;
            }

            if last_summary.elapsed() >= self.run_config.status_interval() {
                self.log_summary();
                last_summary = Instant::now();
            }
        }

        self.log_summary();
        self.app.shutdown().await;
        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }
}
