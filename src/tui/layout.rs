// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the comparison screen:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Selection Row (3 rows: slot inputs + add button)  |
// +-------------------------+------------------------+
// | Radar Chart (55%)        | Stat Table (45%)       |
// |                          |                        |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: dataset size, resolved-slot counter, mode indicator.
    pub status_bar: Rect,
    /// Second band: one input box per slot plus the add button.
    pub selection: Rect,
    /// Left side of the middle section: the radar chart canvas.
    pub radar: Rect,
    /// Right side of the middle section: the side-by-side stat table.
    pub table: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the comparison layout from the available terminal area.
///
/// Fixed heights for the status bar, selection row, and help bar; the
/// remaining space is split between the radar chart and the stat table.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: status(1) | selection(3) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // selection row
            Constraint::Min(10),   // middle section (radar + table)
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let selection = vertical[1];
    let middle = vertical[2];
    let help_bar = vertical[3];

    // Horizontal: radar (55%) | table (45%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(middle);

    let radar = horizontal[0];
    let table = horizontal[1];

    AppLayout {
        status_bar,
        selection,
        radar,
        table,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
