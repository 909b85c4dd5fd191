// TUI: layout, input handling, and widget rendering.
//
// The TUI owns the `CompareSession` and a `ViewState` holding everything the
// widgets need to draw. After every state-mutating key event the loop calls
// `refresh`, which re-derives the comparison view from the session; widgets
// are pure functions of `ViewState`. Rendering runs at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::time::Instant;

use crate::compare::{CompareSession, ComparisonView, SlotId, Suggestion};
use crate::config::UiConfig;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which input mode the UI is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Slot focus, add/remove, quit.
    #[default]
    Normal,
    /// Typing into the focused slot's name, dropdown open-able.
    Edit,
    /// Quit confirmation overlay; only y/n accepted.
    ConfirmQuit,
}

/// One slot as shown in the selection row, including unresolved slots that
/// the derived view omits.
#[derive(Debug, Clone)]
pub struct SlotLabel {
    pub number: u8,
    pub id: SlotId,
    pub name: String,
    /// Whether the name currently resolves against the dataset.
    pub resolved: bool,
}

/// The open suggestion dropdown for the focused slot.
#[derive(Debug, Clone)]
pub struct DropdownState {
    pub items: Vec<Suggestion>,
    pub selected: usize,
}

/// A scheduled dropdown re-filter for an optional slot. Replaced (never
/// stacked) on each keystroke, so at most one filter action is pending.
#[derive(Debug, Clone, Copy)]
pub struct PendingFilter {
    pub slot: SlotId,
    pub deadline: Instant,
}

/// TUI-local state read by the widgets.
///
/// `view` and `slot_labels` are derived data, rebuilt by `refresh` after
/// every mutation; the rest is UI-only state (focus, mode, dropdown).
pub struct ViewState {
    /// Derived comparison output for all resolved slots.
    pub view: ComparisonView,
    /// All active slots in display order, resolved or not.
    pub slot_labels: Vec<SlotLabel>,
    /// Stable id of the focused slot; survives renumbering.
    pub focused: SlotId,
    pub mode: Mode,
    pub dropdown: Option<DropdownState>,
    pub pending_filter: Option<PendingFilter>,
    /// Whether another optional slot can be added.
    pub can_add: bool,
    /// Radar axis maximum, for scaling the chart polygons.
    pub radar_max: f64,
    /// Total records in the loaded dataset.
    pub dataset_len: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            view: ComparisonView::default(),
            slot_labels: Vec::new(),
            focused: SlotId::default(),
            mode: Mode::Normal,
            dropdown: None,
            pending_filter: None,
            can_add: true,
            radar_max: 130.0,
            dataset_len: 0,
        }
    }
}

impl ViewState {
    /// Build the initial view state for a session and derive the first view.
    pub fn new(session: &CompareSession) -> Self {
        let mut state = ViewState {
            focused: session.selection.id_of(1).unwrap_or_default(),
            radar_max: session.radar_max(),
            dataset_len: session.dataset().len(),
            ..ViewState::default()
        };
        refresh(&mut state, session);
        state
    }

    /// Display number of the focused slot, if it still exists.
    pub fn focused_number(&self) -> Option<u8> {
        self.slot_labels
            .iter()
            .find(|l| l.id == self.focused)
            .map(|l| l.number)
    }
}

// ---------------------------------------------------------------------------
// Derive-and-render hook
// ---------------------------------------------------------------------------

/// Re-derive everything the widgets read from the session. Called after
/// every mutating operation so render order stays deterministic.
pub fn refresh(state: &mut ViewState, session: &CompareSession) {
    state.view = session.derive();
    state.slot_labels = session
        .selection
        .slots()
        .map(|(number, slot)| SlotLabel {
            number,
            id: slot.id(),
            name: slot.name.clone(),
            resolved: session.dataset().lookup(&slot.name).is_some(),
        })
        .collect();
    state.can_add = session.selection.can_add();

    // If the focused slot was removed, fall back to slot 1.
    if session.selection.number_of(state.focused).is_none() {
        state.focused = session.selection.id_of(1).unwrap_or_default();
    }
}

/// Rebuild the dropdown from a query, or close it when nothing matches.
pub(crate) fn open_dropdown(state: &mut ViewState, session: &CompareSession, query: &str) {
    let items = session.suggestions(query);
    state.dropdown = if items.is_empty() {
        None
    } else {
        Some(DropdownState { items, selected: 0 })
    };
}

/// Fire a due debounce deadline: re-filter the dropdown for the slot that
/// scheduled it, unless focus or mode moved on in the meantime.
fn apply_pending_filter(state: &mut ViewState, session: &CompareSession) {
    let Some(pending) = state.pending_filter.take() else {
        return;
    };
    if state.mode != Mode::Edit || state.focused != pending.slot {
        return;
    }
    let query = session
        .selection
        .number_of(pending.slot)
        .and_then(|n| session.selection.name(n))
        .unwrap_or("")
        .to_string();
    if query.is_empty() {
        state.dropdown = None;
    } else {
        open_dropdown(state, session, &query);
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete comparison frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::slots::render(frame, layout.selection, state);
    widgets::radar::render(frame, layout.radar, state);
    widgets::stat_table::render(frame, layout.table, state);
    render_help_bar(frame, layout.help_bar, state);

    // Overlays draw last so they sit on top of the panels.
    widgets::slots::render_dropdown(frame, layout.selection, state);
    if state.mode == Mode::ConfirmQuit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_help_bar(frame: &mut Frame, area: ratatui::layout::Rect, state: &ViewState) {
    let text = match state.mode {
        Mode::Normal => " 1-4/Tab:Focus | Enter:Edit | +:Add | x:Remove | q:Quit",
        Mode::Edit => " Type to search | Up/Down:Pick | Enter:Confirm | Esc:Cancel",
        Mode::ConfirmQuit => " y:Quit | n:Stay",
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: keyboard input, debounce deadline,
///    render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(mut session: CompareSession, ui: UiConfig) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Set panic hook to restore terminal on crash.
    //    We capture the original hook and chain ours before it.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    // 3. Create ViewState from the session
    let mut view_state = ViewState::new(&session);

    // 4. Create crossterm EventStream for async keyboard input
    let mut event_stream = EventStream::new();

    // 5. Create render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 6. Main loop
    loop {
        let filter_deadline = view_state.pending_filter.map(|p| p.deadline);

        tokio::select! {
            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        let outcome =
                            input::handle_key(key_event, &mut session, &mut view_state, &ui);
                        refresh(&mut view_state, &session);
                        if outcome == input::Outcome::Quit {
                            break;
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse events, resize events, etc. -- ignore
                    }
                    Some(Err(_)) => {
                        // Input error -- break out
                        break;
                    }
                    None => {
                        // Stream ended
                        break;
                    }
                }
            }

            // Debounced dropdown re-filter for optional slots
            _ = debounce_expiry(filter_deadline) => {
                apply_pending_filter(&mut view_state, &session);
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    // 7. Restore terminal
    ratatui::restore();

    Ok(())
}

/// Resolve when the debounce deadline passes; never resolves when no filter
/// is pending.
async fn debounce_expiry(deadline: Option<Instant>) {
    match deadline {
        Some(d) => tokio::time::sleep_until(d).await,
        None => std::future::pending().await,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NormalizationConfig, PlusMinusRange};
    use crate::dataset::Dataset;
    use crate::dictionary::Dictionaries;

    const CSV: &str = "\
Player,Team,Pos,GP,P,G,A,+/-,P/GP,EVP,PPP,PIM
Nathan MacKinnon,COL,C,82,140,51,89,35,1.71,83,55,50
Connor McDavid,EDM,C,76,132,32,100,35,1.74,84,48,30
Sidney Crosby,PIT,C,82,94,42,52,9,1.15,63,26,24";

    fn test_session() -> CompareSession {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        let normalization = NormalizationConfig {
            radar_max: 130.0,
            points: 130.0,
            goals: 60.0,
            assists: 90.0,
            points_per_game: 2.0,
            even_strength_points: 90.0,
            power_play_points: 50.0,
            penalty_minutes: 70.0,
            plus_minus: PlusMinusRange {
                min: -40.0,
                max: 40.0,
            },
        };
        CompareSession::new(dataset, normalization, Dictionaries::default(), 100)
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.view.slots.is_empty());
        assert!(state.slot_labels.is_empty());
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.dropdown.is_none());
        assert!(state.pending_filter.is_none());
        assert!(state.can_add);
        assert_eq!(state.dataset_len, 0);
    }

    #[test]
    fn view_state_new_derives_initial_view() {
        let session = test_session();
        let state = ViewState::new(&session);
        assert_eq!(state.slot_labels.len(), 2);
        assert_eq!(state.view.slots.len(), 2);
        assert_eq!(state.focused_number(), Some(1));
        assert_eq!(state.dataset_len, 3);
    }

    #[test]
    fn refresh_tracks_slot_changes() {
        let mut session = test_session();
        let mut state = ViewState::new(&session);

        session.selection.add_slot();
        session.selection.set_name(3, "Sidney Crosby");
        refresh(&mut state, &session);

        assert_eq!(state.slot_labels.len(), 3);
        assert_eq!(state.view.slots.len(), 3);
        assert!(state.can_add);
        assert!(state.slot_labels[2].resolved);
    }

    #[test]
    fn refresh_marks_unresolved_labels() {
        let mut session = test_session();
        let mut state = ViewState::new(&session);

        session.selection.set_name(2, "Not In Dataset");
        refresh(&mut state, &session);

        assert_eq!(state.slot_labels.len(), 2);
        assert!(!state.slot_labels[1].resolved);
        // Derived view omits the unresolved slot.
        assert_eq!(state.view.slots.len(), 1);
    }

    #[test]
    fn refresh_moves_focus_off_removed_slot() {
        let mut session = test_session();
        let mut state = ViewState::new(&session);

        session.selection.add_slot();
        refresh(&mut state, &session);
        state.focused = session.selection.id_of(3).unwrap();

        session.selection.remove_slot(3);
        refresh(&mut state, &session);

        assert_eq!(state.focused_number(), Some(1));
    }

    #[test]
    fn refresh_keeps_focus_across_renumbering() {
        let mut session = test_session();
        let mut state = ViewState::new(&session);

        session.selection.add_slot();
        session.selection.add_slot();
        refresh(&mut state, &session);
        let fourth_id = session.selection.id_of(4).unwrap();
        state.focused = fourth_id;

        session.selection.remove_slot(3);
        refresh(&mut state, &session);

        // Former slot 4 is now slot 3 and still focused.
        assert_eq!(state.focused, fourth_id);
        assert_eq!(state.focused_number(), Some(3));
    }

    #[test]
    fn open_dropdown_populates_and_closes() {
        let session = test_session();
        let mut state = ViewState::new(&session);

        open_dropdown(&mut state, &session, "ma");
        let dd = state.dropdown.as_ref().expect("dropdown open");
        assert_eq!(dd.items.len(), 1);
        assert_eq!(dd.items[0].name, "Nathan MacKinnon");
        assert_eq!(dd.selected, 0);

        open_dropdown(&mut state, &session, "zzz");
        assert!(state.dropdown.is_none());
    }

    #[test]
    fn apply_pending_filter_respects_focus_and_mode() {
        let session = test_session();
        let mut state = ViewState::new(&session);
        let slot1 = session.selection.id_of(1).unwrap();

        // Pending filter fires only in edit mode on the same slot.
        state.pending_filter = Some(PendingFilter {
            slot: slot1,
            deadline: Instant::now(),
        });
        state.mode = Mode::Normal;
        apply_pending_filter(&mut state, &session);
        assert!(state.dropdown.is_none());
        assert!(state.pending_filter.is_none());

        state.mode = Mode::Edit;
        state.focused = slot1;
        state.pending_filter = Some(PendingFilter {
            slot: slot1,
            deadline: Instant::now(),
        });
        apply_pending_filter(&mut state, &session);
        // Slot 1 holds "Nathan MacKinnon", which matches itself.
        assert!(state.dropdown.is_some());
    }

    #[test]
    fn apply_pending_filter_empty_name_closes_dropdown() {
        let mut session = test_session();
        let mut state = ViewState::new(&session);
        let slot1 = session.selection.id_of(1).unwrap();

        session.selection.set_name(1, "");
        state.mode = Mode::Edit;
        state.focused = slot1;
        state.dropdown = Some(DropdownState {
            items: vec![Suggestion {
                rank: 1,
                name: "Nathan MacKinnon".into(),
            }],
            selected: 0,
        });
        state.pending_filter = Some(PendingFilter {
            slot: slot1,
            deadline: Instant::now(),
        });

        apply_pending_filter(&mut state, &session);
        assert!(state.dropdown.is_none());
    }

    #[test]
    fn render_frame_does_not_panic_with_session_state() {
        let session = test_session();
        let state = ViewState::new(&session);
        let backend = ratatui::backend::TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }

    #[test]
    fn render_frame_does_not_panic_with_defaults() {
        let state = ViewState::default();
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }

    #[test]
    fn render_frame_does_not_panic_with_overlays() {
        let session = test_session();
        let mut state = ViewState::new(&session);
        state.mode = Mode::ConfirmQuit;
        state.dropdown = Some(DropdownState {
            items: vec![
                Suggestion {
                    rank: 1,
                    name: "Nathan MacKinnon".into(),
                },
                Suggestion {
                    rank: 2,
                    name: "Connor McDavid".into(),
                },
            ],
            selected: 1,
        });
        let backend = ratatui::backend::TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }
}
