//! UI widgets for the dashboard

pub mod overview;
pub mod panels;
pub mod sidebar;
pub mod trades;
pub mod zerohero;

use hypersockets::ConnectionState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::DashboardState;
use super::App;

/// Dashboard title shown in the header border
pub const TITLE: &str = " EdgeQuant — Decision Dashboard ";

const KEY_HELP: &str = "q=quit j/k=instrument PgUp/PgDn=trades z=ZeroHero r=refresh";

/// Draw the main UI layout
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(screen);

    let feed_state = app.feed_state();
    let status = app.status_line();
    let state = app.state.read();

    draw_header(frame, &state, feed_state, chunks[0]);
    draw_main(frame, &state, app.trade_scroll, chunks[1]);
    draw_footer(frame, status.as_deref(), chunks[2]);

    if app.popup_open {
        zerohero::draw(frame, &state, app.popup_scroll, screen);
    }
}

pub fn draw_header(frame: &mut Frame, state: &DashboardState, feed_state: ConnectionState, area: Rect) {
    let status_color = match feed_state {
        ConnectionState::Connected => Color::Green,
        ConnectionState::Connecting => Color::Yellow,
        ConnectionState::Disconnected | ConnectionState::ShuttingDown => Color::Red,
    };

    let last_tick = state
        .last_tick_at()
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let header_text = format!(
        " Feed: {} | Instruments: {} | Last tick: {}",
        feed_state.label(),
        state.instruments().len(),
        last_tick
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(status_color))
        .block(Block::default().borders(Borders::ALL).title(TITLE));

    frame.render_widget(header, area);
}

fn draw_main(frame: &mut Frame, state: &DashboardState, trade_scroll: usize, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32), // Instruments + metric cards
            Constraint::Min(0),     // Panels
        ])
        .split(area);

    sidebar::draw(frame, state, chunks[0]);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(chunks[1]);

    overview::draw(frame, state, sections[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(sections[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(columns[0]);

    trades::draw(frame, state, trade_scroll, left[0]);
    panels::draw_order_book(frame, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(columns[1]);

    panels::draw_greeks(frame, state, right[0]);
    panels::draw_execution(frame, right[1]);
}

pub fn draw_footer(frame: &mut Frame, status: Option<&str>, area: Rect) {
    let footer_text = match status {
        Some(status) if !status.is_empty() => format!(" {} | {}", KEY_HELP, status),
        _ => format!(" {}", KEY_HELP),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}


#[cfg(test)]
mod tests {
    use super::test_support::render;
    use super::*;
    use crate::application::dashboard::loader::DataLoader;
    use crate::domain::{Instrument, TradeDecision};
    use crate::infrastructure::client::backend::BackendClient;
    use std::sync::Arc;
    use std::time::Duration;

    fn app_with_data() -> App {
        let state = DashboardState::shared(10);
        {
            let mut s = state.write();
            s.set_instruments(vec![
                Instrument::new("1", "NIFTY", "NSE"),
                Instrument::new("2", "BANKNIFTY", "NSE"),
            ]);
            s.push_decision(TradeDecision {
                id: Some("d1".into()),
                symbol: Some("NIFTY 24000 CE".into()),
                entry: Some("120".into()),
                ..Default::default()
            });
        }
        let client = BackendClient::new("http://127.0.0.1:9", Duration::from_secs(1), Duration::from_secs(1)).unwrap();
        let loader = DataLoader::new(client, Arc::clone(&state), tokio::runtime::Handle::current());
        App::new(state, loader, None)
    }

    #[tokio::test]
    async fn test_full_layout_renders_every_panel() {
        let app = app_with_data();
        let screen = render(140, 45, |frame| draw(frame, &app));

        assert!(screen.contains("EdgeQuant — Decision Dashboard"));
        assert!(screen.contains("Feed: Disconnected"));
        assert!(screen.contains("NIFTY · NSE"));
        assert!(screen.contains("Trade Suggestions"));
        assert!(screen.contains("NIFTY 24000 CE"));
        assert!(screen.contains("Order Book / Depth"));
        assert!(screen.contains("Greeks & Options"));
        assert!(screen.contains("One-lot recommended"));
        assert!(screen.contains("q=quit"));
        assert!(!screen.contains("High Reward Picks"));
    }

    #[tokio::test]
    async fn test_popup_drawn_when_open() {
        let mut app = app_with_data();
        app.open_popup();
        let screen = render(140, 45, |frame| draw(frame, &app));

        assert!(screen.contains("ZeroHero — High Reward Picks"));
        assert!(screen.contains("No suggestions"));
    }

    #[test]
    fn test_footer_shows_status() {
        let screen = render(80, 3, |frame| {
            let area = frame.area();
            draw_footer(frame, Some("Loaded 2 instruments"), area)
        });
        assert!(screen.contains("q=quit"));
        assert!(screen.contains("Loaded 2 instruments"));
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(80, 60, area);
        assert_eq!(popup.width, 80);
        assert_eq!(popup.height, 30);
        assert_eq!(popup.x, 10);
        assert_eq!(popup.y, 10);
    }

    #[tokio::test]
    async fn test_every_stored_trade_reachable_on_small_terminal() {
        use crossterm::event::KeyCode;
        use std::collections::HashSet;

        let mut app = app_with_data();
        for n in 0..10 {
            app.state.write().push_decision(TradeDecision {
                symbol: Some(format!("SYM{:02}", n)),
                ..Default::default()
            });
        }

        let mut seen = HashSet::new();
        for _ in 0..=10 {
            let screen = render(80, 24, |frame| draw(frame, &app));
            for n in 0..10 {
                if screen.contains(&format!("SYM{:02}", n)) {
                    seen.insert(n);
                }
            }
            app.on_key(KeyCode::PageDown);
        }

        assert_eq!(seen.len(), 10);
    }
}
