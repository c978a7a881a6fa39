//! Trade suggestion cards

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::dashboard::state::DashboardState;
use crate::domain::{display_text, TradeDecision};

/// Draw the trade list.
///
/// Full three-line cards are used while every stored trade fits; otherwise
/// each trade gets one line and `scroll` picks the first one shown.
pub fn draw(frame: &mut Frame, state: &DashboardState, scroll: usize, area: Rect) {
    let total = state.trade_count();
    let rows = area.height.saturating_sub(2) as usize;

    if total == 0 {
        let block = trades_block(Line::from(" Recent ").right_aligned());
        let empty = Paragraph::new(" No trades")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    if total * CARD_HEIGHT <= rows {
        let block = trades_block(Line::from(" Recent ").right_aligned());
        let lines: Vec<Line> = state.trades().flat_map(trade_card).collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let visible = rows.max(1).min(total);
    let first = scroll.min(total - visible);
    let range = format!(" Recent {}-{} of {} ", first + 1, first + visible, total);
    let block = trades_block(Line::from(range).right_aligned());

    let lines: Vec<Line> = state.trades().skip(first).take(visible).map(trade_row).collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

const CARD_HEIGHT: usize = 3;

fn trades_block(right_title: Line<'static>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(" Trade Suggestions ")
        .title(right_title)
}

/// One-line form of a trade for short panels
pub fn trade_row(trade: &TradeDecision) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {}", display_text(trade.symbol.as_deref())),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  E {} SL {} TP {}",
            display_text(trade.entry.as_deref()),
            display_text(trade.sl.as_deref()),
            display_text(trade.tp.as_deref())
        )),
    ])
}

/// Three lines per trade: symbol with levels, note, greeks
pub fn trade_card(trade: &TradeDecision) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                format!(" {}", display_text(trade.symbol.as_deref())),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "   Entry {}  SL {}  TP {}",
                display_text(trade.entry.as_deref()),
                display_text(trade.sl.as_deref()),
                display_text(trade.tp.as_deref())
            )),
        ]),
        Line::from(Span::styled(
            format!("   {}", trade.note.as_deref().unwrap_or("")),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!(
                "   Delta: {} · OI Change: {} · PCR: {}",
                display_text(trade.delta.as_deref()),
                display_text(trade.oi_change.as_deref()),
                display_text(trade.pcr.as_deref())
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard::ui::test_support::render;

    fn draw_state(state: &DashboardState) -> String {
        render(90, 40, |frame| {
            let area = frame.area();
            draw(frame, state, 0, area)
        })
    }

    #[test]
    fn test_no_trades_placeholder() {
        let screen = draw_state(&DashboardState::default());
        assert!(screen.contains("No trades"));
        assert!(screen.contains("Recent"));
    }

    #[test]
    fn test_trade_card_placeholders() {
        let trade = TradeDecision {
            symbol: Some("NIFTY 24000 PE".into()),
            entry: Some("88.5".into()),
            sl: Some("70".into()),
            note: Some("PCR spike".into()),
            delta: Some("-0.42".into()),
            ..Default::default()
        };

        let text: Vec<String> = trade_card(&trade).iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], " NIFTY 24000 PE   Entry 88.5  SL 70  TP -");
        assert_eq!(text[1], "   PCR spike");
        assert_eq!(text[2], "   Delta: -0.42 · OI Change: - · PCR: -");
    }

    #[test]
    fn test_newest_trade_rendered_first() {
        let mut state = DashboardState::default();
        for symbol in ["FIRST", "SECOND"] {
            state.push_decision(TradeDecision {
                symbol: Some(symbol.into()),
                ..Default::default()
            });
        }

        let screen = draw_state(&state);
        let second = screen.find("SECOND").unwrap();
        let first = screen.find("FIRST").unwrap();
        assert!(second < first);
    }

    fn ten_trades() -> DashboardState {
        let mut state = DashboardState::default();
        for n in 0..10 {
            state.push_decision(TradeDecision {
                symbol: Some(format!("SYM{:02}", n)),
                entry: Some("ATM".into()),
                ..Default::default()
            });
        }
        state
    }

    #[test]
    fn test_short_panel_uses_one_line_per_trade() {
        let state = ten_trades();
        let screen = render(60, 12, |frame| {
            let area = frame.area();
            draw(frame, &state, 0, area)
        });

        for n in 0..10 {
            assert!(screen.contains(&format!("SYM{:02}", n)), "SYM{:02} missing", n);
        }
        assert!(screen.contains("E ATM SL - TP -"));
        assert!(!screen.contains("Delta:"));
    }

    #[test]
    fn test_scroll_reaches_oldest_trade() {
        let state = ten_trades();
        let draw_at = |scroll: usize| {
            render(60, 6, |frame| {
                let area = frame.area();
                draw(frame, &state, scroll, area)
            })
        };

        let top = draw_at(0);
        assert!(top.contains("SYM09"));
        assert!(top.contains("Recent 1-4 of 10"));
        assert!(!top.contains("SYM00"));

        // Past the end clamps to the last page
        let bottom = draw_at(50);
        assert!(bottom.contains("SYM00"));
        assert!(bottom.contains("Recent 7-10 of 10"));
    }
}
