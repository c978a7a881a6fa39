//! Static and metric side panels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::dashboard::state::DashboardState;
use crate::domain::fields;

pub fn draw_order_book(frame: &mut Frame, area: Rect) {
    let panel = Paragraph::new(" Top bids/asks placeholder")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Order Book / Depth "));
    frame.render_widget(panel, area);
}

pub fn draw_greeks(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let metrics = state.metrics();
    let lines = vec![
        Line::styled(
            format!(
                " Delta: {} · Gamma: {}",
                metrics.display(fields::DELTA),
                metrics.display(fields::GAMMA)
            ),
            Style::default().fg(Color::Gray),
        ),
        Line::from(""),
        Line::from(format!(" OI Change: {}", metrics.display(fields::OI_CHANGE))),
    ];

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Greeks & Options "));
    frame.render_widget(panel, area);
}

pub fn draw_execution(frame: &mut Frame, area: Rect) {
    let panel = Paragraph::new(" One-lot recommended. SL included for all suggestions.")
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Execution "));
    frame.render_widget(panel, area);
}
