//! Selected instrument panel with the tick price strip

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

use crate::application::dashboard::state::DashboardState;
use crate::domain::{fields, format_number, PLACEHOLDER};

/// Height of the scaled sparkline values
const SPARKLINE_SCALE: f64 = 100.0;

pub fn draw(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Selected ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let symbol = state
        .selected_instrument()
        .map(|i| i.symbol_or_placeholder())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let metrics = state.metrics();
    let summary = Line::from(vec![
        Span::styled(
            format!(" {}", symbol),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("    Vol: {}    VWAP: {}", metrics.display(fields::VOLUME), metrics.display(fields::VWAP)),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(summary), rows[0]);

    let prices = state.tick_prices();
    let range = match price_range(prices.iter().copied()) {
        Some((low, high)) => format!(
            " Ticks: {} | Low {} | High {}",
            prices.len(),
            format_number(low),
            format_number(high)
        ),
        None => " Waiting for ticks...".to_string(),
    };
    frame.render_widget(
        Paragraph::new(range).style(Style::default().fg(Color::DarkGray)),
        rows[1],
    );

    let data = scale_prices(prices.iter().copied());
    let sparkline = Sparkline::default()
        .data(&data)
        .max(SPARKLINE_SCALE as u64 + 1)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(sparkline, rows[2]);
}

fn price_range(prices: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    prices.fold(None, |range, price| match range {
        None => Some((price, price)),
        Some((low, high)) => Some((low.min(price), high.max(price))),
    })
}

/// Map prices onto 1..=101 so the lowest price still shows a bar
pub fn scale_prices(prices: impl Iterator<Item = f64> + Clone) -> Vec<u64> {
    let Some((low, high)) = price_range(prices.clone()) else {
        return Vec::new();
    };

    let span = high - low;
    prices
        .map(|price| {
            if span <= f64::EPSILON {
                (SPARKLINE_SCALE / 2.0) as u64 + 1
            } else {
                ((price - low) / span * SPARKLINE_SCALE).round() as u64 + 1
            }
        })
        .collect()
}
