//! Sidebar widget - instrument selector and metric cards

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::application::dashboard::state::DashboardState;
use crate::domain::fields;

/// Draw the instrument list above the Last / OI / PCR cards
pub fn draw(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Instruments
            Constraint::Length(3), // ZeroHero hint
            Constraint::Length(9), // Metric cards
        ])
        .split(area);

    draw_instruments(frame, state, chunks[0]);

    let hint = Paragraph::new(Line::from(vec![
        Span::styled(" z ", Style::default().fg(Color::Black).bg(Color::Green)),
        Span::raw(" Open ZeroHero"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hint, chunks[1]);

    draw_metric_cards(frame, state, chunks[2]);
}

fn draw_instruments(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Instrument ");

    if state.instruments().is_empty() {
        let text = if state.instruments_loaded {
            " No instruments"
        } else {
            " Loading..."
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let selected_index = state.selected_index();

    let items: Vec<ListItem> = state
        .instruments()
        .iter()
        .enumerate()
        .map(|(i, instrument)| {
            let is_selected = Some(i) == selected_index;

            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_selected { "> " } else { "  " };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(instrument.label(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default();
    list_state.select(selected_index);

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_metric_cards(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 3])
        .split(area);

    let metrics = state.metrics();
    for (idx, (title, field)) in [("Last", fields::LAST_PRICE), ("OI", fields::OI), ("PCR", fields::PCR)]
        .into_iter()
        .enumerate()
    {
        let card = Paragraph::new(format!(" {}", metrics.display(field)))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", title))
                    .title_style(Style::default().fg(Color::Gray)),
            );
        frame.render_widget(card, cards[idx]);
    }
}
