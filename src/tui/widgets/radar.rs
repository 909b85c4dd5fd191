// Radar chart widget: the eight stat axes with one overlaid polygon per
// resolved slot, drawn on a braille canvas.

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::dataset::Stat;
use crate::tui::ViewState;

use super::slots::slot_color;

/// Canvas coordinate bounds. Wider than tall to compensate for terminal
/// cell aspect ratio.
const X_BOUND: f64 = 1.8;
const Y_BOUND: f64 = 1.3;

/// Radii of the concentric reference rings.
const GRID_RINGS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Radius at which the axis abbreviation labels are printed.
const LABEL_RADIUS: f64 = 1.15;

/// Position of axis `i` (of `n`) at the given radius. Axis 0 points
/// straight up and the rest proceed clockwise, matching the axis order of
/// the radar on screen.
pub fn axis_point(i: usize, n: usize, radius: f64) -> (f64, f64) {
    let angle = FRAC_PI_2 - (i as f64) * TAU / (n as f64);
    (radius * angle.cos(), radius * angle.sin())
}

/// Render the radar chart into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Radar"))
        .marker(symbols::Marker::Braille)
        .x_bounds([-X_BOUND, X_BOUND])
        .y_bounds([-Y_BOUND, Y_BOUND])
        .paint(|ctx| paint(ctx, state));
    frame.render_widget(canvas, area);
}

fn paint(ctx: &mut Context, state: &ViewState) {
    let n = Stat::COUNT;

    // Reference rings
    for ring in GRID_RINGS {
        let points: Vec<(f64, f64)> = (0..n).map(|i| axis_point(i, n, ring)).collect();
        draw_polygon(ctx, &points, Color::DarkGray);
    }

    // Axes from center to full radius
    for i in 0..n {
        let (x, y) = axis_point(i, n, 1.0);
        ctx.draw(&CanvasLine {
            x1: 0.0,
            y1: 0.0,
            x2: x,
            y2: y,
            color: Color::DarkGray,
        });
    }

    // Axis abbreviation labels
    for (i, stat) in Stat::ALL.iter().enumerate() {
        let (x, y) = axis_point(i, n, LABEL_RADIUS);
        ctx.print(
            x,
            y,
            Line::from(Span::styled(
                stat.abbrev(),
                Style::default().fg(Color::Gray),
            )),
        );
    }

    // One closed polygon per resolved slot
    for slot in &state.view.slots {
        let color = slot_color(slot.number);
        let points: Vec<(f64, f64)> = slot
            .radar
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let r = if state.radar_max > 0.0 {
                    v / state.radar_max
                } else {
                    0.0
                };
                axis_point(i, n, r)
            })
            .collect();
        draw_polygon(ctx, &points, color);
    }

    // Legend in the top-left corner
    for (row, slot) in state.view.slots.iter().enumerate() {
        ctx.print(
            -X_BOUND + 0.04,
            Y_BOUND - 0.14 * row as f64 - 0.04,
            Line::from(Span::styled(
                format!("- {}", slot.player_name),
                Style::default().fg(slot_color(slot.number)),
            )),
        );
    }

    if state.view.slots.is_empty() {
        ctx.print(-0.55, 0.0, Line::from("No players resolved"));
    }
}

/// Draw a closed polygon through the given points.
fn draw_polygon(ctx: &mut Context, points: &[(f64, f64)], color: Color) {
    for (i, &(x1, y1)) in points.iter().enumerate() {
        let (x2, y2) = points[(i + 1) % points.len()];
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{ComparisonView, SlotComparison, SlotId};
    use crate::dataset::StatLine;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn axis_zero_points_straight_up() {
        let (x, y) = axis_point(0, 8, 1.0);
        assert!(approx(x, 0.0), "x was {x}");
        assert!(approx(y, 1.0), "y was {y}");
    }

    #[test]
    fn axes_proceed_clockwise() {
        // A quarter turn clockwise from "up" is "right".
        let (x, y) = axis_point(2, 8, 1.0);
        assert!(approx(x, 1.0), "x was {x}");
        assert!(approx(y, 0.0), "y was {y}");

        let (x, y) = axis_point(4, 8, 1.0);
        assert!(approx(x, 0.0), "x was {x}");
        assert!(approx(y, -1.0), "y was {y}");
    }

    #[test]
    fn axis_point_scales_with_radius() {
        let (x1, y1) = axis_point(3, 8, 1.0);
        let (x2, y2) = axis_point(3, 8, 0.5);
        assert!(approx(x2, x1 * 0.5));
        assert!(approx(y2, y1 * 0.5));
    }

    fn slot(number: u8, name: &str, radar: [f64; Stat::COUNT]) -> SlotComparison {
        SlotComparison {
            number,
            id: SlotId::default(),
            player_name: name.to_string(),
            radar,
            stats: StatLine::default(),
            team: String::new(),
            team_full: String::new(),
            position: String::new(),
            position_full: String::new(),
            games_played: None,
        }
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_four_slots() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.view = ComparisonView {
            slots: vec![
                slot(1, "Player One", [130.0; 8]),
                slot(2, "Player Two", [65.0; 8]),
                slot(3, "Player Three", [0.0; 8]),
                slot(4, "Player Four", [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0]),
            ],
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_does_not_panic_with_zero_radar_max() {
        // Degenerate config should not divide by zero.
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.radar_max = 0.0;
        state.view = ComparisonView {
            slots: vec![slot(1, "Player One", [130.0; 8])],
        };
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
