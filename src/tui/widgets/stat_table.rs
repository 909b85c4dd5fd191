// Side-by-side stat table: statistics as rows, one column per resolved
// slot, with a detail line expanding the focused player's team and
// position codes.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::dataset::Stat;
use crate::tui::ViewState;

use super::slots::slot_color;

/// Render the stat table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Stats");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 || inner.width < 8 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    render_table(frame, chunks[0], state);
    render_detail(frame, chunks[1], state);
}

/// Label column threshold: wide panels spell statistics out in full (the
/// browser tool put the full names in hover tooltips instead).
const WIDE_LABELS_MIN_WIDTH: u16 = 70;

fn render_table(frame: &mut Frame, area: Rect, state: &ViewState) {
    let slots = &state.view.slots;
    let wide = area.width >= WIDE_LABELS_MIN_WIDTH;

    let mut header_cells = vec![Cell::from("Stat").style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    for slot in slots {
        header_cells.push(
            Cell::from(slot.player_name.clone()).style(
                Style::default()
                    .fg(slot_color(slot.number))
                    .add_modifier(Modifier::BOLD),
            ),
        );
    }
    let header = Row::new(header_cells).bottom_margin(0);

    let label_style = Style::default().fg(Color::Gray);
    let mut rows: Vec<Row> = Vec::with_capacity(3 + Stat::COUNT);

    rows.push(info_row("Team", label_style, slots, |s| s.team.clone()));
    rows.push(info_row(
        if wide { "Position" } else { "Pos" },
        label_style,
        slots,
        |s| s.position.clone(),
    ));
    rows.push(info_row(
        if wide { "Games Played" } else { "GP" },
        label_style,
        slots,
        |s| fmt_count(s.games_played),
    ));

    for stat in Stat::ALL {
        let label = if wide { stat.full_name() } else { stat.abbrev() };
        rows.push(info_row(label, label_style, slots, move |s| {
            fmt_stat(stat, s.stats.get(stat))
        }));
    }

    let mut widths = vec![Constraint::Length(if wide { 20 } else { 5 })];
    widths.extend(slots.iter().map(|_| Constraint::Min(10)));

    let table = Table::new(rows, widths).header(header).column_spacing(1);
    frame.render_widget(table, area);
}

fn info_row<'a, F>(
    label: &'a str,
    label_style: Style,
    slots: &[crate::compare::SlotComparison],
    value: F,
) -> Row<'a>
where
    F: Fn(&crate::compare::SlotComparison) -> String,
{
    let mut cells = vec![Cell::from(label).style(label_style)];
    for slot in slots {
        let text = value(slot);
        let cell = if text == "-" {
            Cell::from(text).style(Style::default().fg(Color::DarkGray))
        } else {
            Cell::from(text)
        };
        cells.push(cell);
    }
    Row::new(cells)
}

/// Detail line: dictionary-expanded team and position of the focused
/// player, standing in for the browser tool's hover tooltips.
fn render_detail(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state
        .view
        .slots
        .iter()
        .find(|s| s.id == state.focused)
        .or_else(|| state.view.slots.first());

    let line = match focused {
        Some(slot) => {
            let team = if slot.team_full.is_empty() {
                slot.team.clone()
            } else {
                slot.team_full.clone()
            };
            let position = if slot.position_full.is_empty() {
                slot.position.clone()
            } else {
                slot.position_full.clone()
            };
            Line::from(vec![
                Span::styled(
                    slot.player_name.clone(),
                    Style::default().fg(slot_color(slot.number)),
                ),
                Span::styled(format!(": {team} | {position}"), Style::default().fg(Color::Gray)),
            ])
        }
        None => Line::from(Span::styled(
            "No players resolved",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Format a stat value for a table cell. Missing values render as a dash;
/// Points Per Game keeps two decimals, everything else is integral.
pub fn fmt_stat(stat: Stat, value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => match stat {
            Stat::PointsPerGame => format!("{v:.2}"),
            _ => format!("{v:.0}"),
        },
    }
}

/// Format a counting value (games played) for a table cell.
pub fn fmt_count(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => format!("{v:.0}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
