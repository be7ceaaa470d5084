//! Terminal views
//!
//! Pure rendering over the current state snapshot. The main loop decides
//! *when* to draw (only when a subscribed slice changed); these functions
//! decide *what* a frame looks like.

use crate::state::CounterState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render one frame for the current state
pub fn render(state: &CounterState, frame: &mut Frame) {
    let area = frame.area();

    if state.is_initializing {
        render_initializing(frame);
        return;
    }

    let block = Block::default()
        .title(" Counter Demo ")
        .borders(Borders::ALL)
        .border_style(Style::new().cyan())
        .title_style(Style::new().cyan().bold());

    let status_line = if state.is_loading {
        Line::from(Span::styled("Loading...", Style::new().yellow().italic()))
    } else {
        Line::from("")
    };

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Counter: "),
            Span::styled(state.counter.to_string(), Style::new().green().bold()),
        ]),
        Line::from(""),
        status_line,
        Line::from(""),
        Line::from(Span::styled("Controls:", Style::new().bold())),
        Line::from(vec![
            Span::styled("  + or i  ", Style::new().cyan()),
            Span::raw("- Increment by 1"),
        ]),
        Line::from(vec![
            Span::styled("  2       ", Style::new().cyan()),
            Span::raw("- Increment by 2"),
        ]),
        Line::from(vec![
            Span::styled("  - or d  ", Style::new().cyan()),
            Span::raw("- Decrement by 1 (delayed)"),
        ]),
        Line::from(vec![
            Span::styled("  3       ", Style::new().cyan()),
            Span::raw("- Decrement by 3 (delayed)"),
        ]),
        Line::from(vec![
            Span::styled("  q / Esc ", Style::new().cyan()),
            Span::raw("- Quit"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Full-screen message while the default counter value is being fetched
fn render_initializing(frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let message = Paragraph::new(Line::from(Span::styled(
        "Initializing...",
        Style::new().yellow().bold(),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(message, chunks[1]);
}
