// Selection row widget: one input box per comparison slot plus the add
// button, and the suggestion dropdown overlay anchored under the focused
// slot.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::{Mode, ViewState};

/// Width reserved for the add button at the right edge of the row.
const ADD_BUTTON_WIDTH: u16 = 9;

/// Series color for a slot, by display number. Matches the chart polygon
/// colors so the selection row doubles as the legend key.
pub fn slot_color(number: u8) -> Color {
    match number {
        1 => Color::Blue,
        2 => Color::Red,
        3 => Color::Green,
        4 => Color::Yellow,
        _ => Color::White,
    }
}

/// Split the selection row into one chunk per slot plus the add button.
fn slot_chunks(area: Rect, slot_count: usize) -> Vec<Rect> {
    let mut constraints: Vec<Constraint> =
        (0..slot_count.max(1)).map(|_| Constraint::Min(16)).collect();
    constraints.push(Constraint::Length(ADD_BUTTON_WIDTH));
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

/// Render the selection row into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let chunks = slot_chunks(area, state.slot_labels.len());

    for (label, chunk) in state.slot_labels.iter().zip(chunks.iter()) {
        let focused = label.id == state.focused;
        let editing = focused && state.mode == Mode::Edit;

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let name_style = if label.resolved {
            Style::default().fg(slot_color(label.number))
        } else if label.name.is_empty() {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            // Typed but not matching any dataset record.
            Style::default().fg(Color::Red)
        };

        let mut text = if label.name.is_empty() && !editing {
            "type a name...".to_string()
        } else {
            label.name.clone()
        };
        if editing {
            text.push('_');
        }

        let paragraph = Paragraph::new(ratatui::text::Span::styled(text, name_style)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" Player {} ", label.number)),
        );
        frame.render_widget(paragraph, *chunk);
    }

    // Add button
    if let Some(add_chunk) = chunks.last() {
        let (label, style) = if state.can_add {
            ("+ add", Style::default().fg(Color::Green))
        } else {
            ("  -  ", Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
        };
        let paragraph = Paragraph::new(ratatui::text::Span::styled(label, style)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, *add_chunk);
    }
}

/// Render the suggestion dropdown as an overlay below the focused slot.
/// Draws nothing unless edit mode is active and suggestions exist.
pub fn render_dropdown(frame: &mut Frame, selection: Rect, state: &ViewState) {
    if state.mode != Mode::Edit {
        return;
    }
    let Some(dd) = &state.dropdown else {
        return;
    };
    if dd.items.is_empty() {
        return;
    }

    let chunks = slot_chunks(selection, state.slot_labels.len());
    let idx = state
        .slot_labels
        .iter()
        .position(|l| l.id == state.focused)
        .unwrap_or(0);
    let anchor = chunks.get(idx).copied().unwrap_or(selection);

    let frame_area = frame.area();
    let y = anchor.y.saturating_add(anchor.height);
    let max_height = frame_area.height.saturating_sub(y);
    let height = (dd.items.len() as u16 + 2).min(12).min(max_height);
    let width = anchor
        .width
        .max(24)
        .min(frame_area.width.saturating_sub(anchor.x));
    if height < 3 || width < 4 {
        return;
    }
    let rect = Rect::new(anchor.x, y, width, height);

    // Clear the area behind the dropdown so it renders cleanly on top
    frame.render_widget(Clear, rect);

    let items: Vec<ListItem> = dd
        .items
        .iter()
        .map(|s| ListItem::new(format!("{}. {}", s.rank, s.name)))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Players "),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(dd.selected));
    frame.render_stateful_widget(list, rect, &mut list_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
