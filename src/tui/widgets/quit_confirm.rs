// Quit confirmation overlay, shown on top of the comparison screen while
// the UI is in confirm-quit mode.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const DIALOG_WIDTH: u16 = 32;
const DIALOG_HEIGHT: u16 = 6;

/// Render the quit confirmation dialog centered over the given area.
pub fn render(frame: &mut Frame, area: Rect) {
    let dialog = center(area, DIALOG_WIDTH, DIALOG_HEIGHT);

    // Clear whatever the panels drew underneath the dialog.
    frame.render_widget(Clear, dialog);

    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let lines = vec![
        Line::from("Leave the comparison?"),
        Line::default(),
        Line::from(vec![
            key("y", Color::Green),
            Span::raw(": quit    "),
            key("n", Color::Red),
            Span::raw(": keep comparing"),
        ]),
    ];

    let dialog_widget = Paragraph::new(lines)
        .centered()
        .style(Style::default().bg(Color::Black))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    " Quit ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    frame.render_widget(dialog_widget, dialog);
}

/// Center a `width` x `height` rectangle inside `area`, shrinking it when
/// the terminal is smaller than the dialog.
fn center(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
