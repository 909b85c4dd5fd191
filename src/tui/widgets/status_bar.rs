// Status bar widget: dataset size, resolved-slot counter, mode indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Mode, ViewState};

/// Render the status bar into the given area.
///
/// Layout: [title] [skater count] [resolved counter] [mode]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let resolved = state.view.slots.len();
    let total = state.slot_labels.len();

    let mut spans = vec![
        Span::styled(
            " Skater Compare ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} skaters", state.dataset_len),
            Style::default().fg(Color::White),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{resolved}/{total} slots resolved"),
            Style::default().fg(if resolved == total && total > 0 {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
    ];
    spans.push(mode_span(state.mode));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Label shown for each input mode.
pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "NORMAL",
        Mode::Edit => "EDIT",
        Mode::ConfirmQuit => "QUIT?",
    }
}

fn mode_span(mode: Mode) -> Span<'static> {
    let style = match mode {
        Mode::Normal => Style::default().fg(Color::White),
        Mode::Edit => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Mode::ConfirmQuit => Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    };
    Span::styled(format!("[{}]", mode_label(mode)), style)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
