//! ZeroHero popup

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::application::dashboard::state::DashboardState;
use crate::domain::{display_text, ZeroHeroSuggestion};

pub const POPUP_TITLE: &str = " ZeroHero — High Reward Picks ";

/// Lines per suggestion, including the blank separator
const ENTRY_HEIGHT: usize = 4;

/// Draw the popup over `area`, clearing what is underneath.
///
/// `scroll` is the index of the first suggestion shown; it is clamped so the
/// last page stays full.
pub fn draw(frame: &mut Frame, state: &DashboardState, scroll: usize, area: Rect) {
    let popup = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup);

    let suggestions = state.suggestions();
    let total = suggestions.len();
    let fits = (popup.height.saturating_sub(2) as usize / ENTRY_HEIGHT).max(1);
    let first = scroll.min(total.saturating_sub(fits));
    let shown = fits.min(total - first);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(POPUP_TITLE)
        .title_bottom(Line::from(" Esc/z to close ").right_aligned())
        .border_style(Style::default().fg(Color::Green));
    if shown < total {
        block = block.title_bottom(Line::from(format!(
            " j/k scroll · {}-{} of {} ",
            first + 1,
            first + shown,
            total
        )));
    }

    if suggestions.is_empty() {
        let empty = Paragraph::new(" No suggestions")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, popup);
        return;
    }

    let mut lines = Vec::new();
    for suggestion in suggestions.iter().skip(first).take(shown) {
        lines.extend(suggestion_lines(suggestion));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Header, expiry/probability and levels for one suggestion
pub fn suggestion_lines(suggestion: &ZeroHeroSuggestion) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!(
                " {} · {}",
                suggestion.symbol.as_deref().unwrap_or(""),
                suggestion.reason.as_deref().unwrap_or("")
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "   Expiry: {} · Prob: {}%",
                display_text(suggestion.expiry.as_deref()),
                suggestion.prob_percent()
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(format!(
            "   Entry: {}  SL: {}  TP: {}",
            display_text(suggestion.entry.as_deref()),
            display_text(suggestion.sl.as_deref()),
            display_text(suggestion.tp.as_deref())
        )),
    ]
}
