// Keyboard input handling.
//
// Translates crossterm key events into session mutations and local
// ViewState changes. Modal: Normal (focus/add/remove/quit), Edit (typing a
// slot name with the suggestion dropdown), ConfirmQuit (y/n overlay).

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::time::Instant;

use crate::compare::selection::FIXED_SLOTS;
use crate::compare::CompareSession;
use crate::config::UiConfig;

use super::{open_dropdown, Mode, PendingFilter, ViewState};

/// What the event loop should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Handle a keyboard event.
///
/// Mutations go straight into the session's selection state; the event loop
/// re-derives the view afterwards, so handlers never touch `state.view`.
pub fn handle_key(
    key_event: KeyEvent,
    session: &mut CompareSession,
    state: &mut ViewState,
    ui: &UiConfig,
) -> Outcome {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return Outcome::Continue;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Outcome::Quit;
    }

    match state.mode {
        Mode::ConfirmQuit => handle_confirm_quit(key_event, state),
        Mode::Edit => handle_edit_mode(key_event, session, state, ui),
        Mode::Normal => handle_normal_mode(key_event, session, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal_mode(
    key_event: KeyEvent,
    session: &mut CompareSession,
    state: &mut ViewState,
) -> Outcome {
    match key_event.code {
        // Direct slot focus
        KeyCode::Char(c @ '1'..='4') => {
            focus_slot(session, state, c as u8 - b'0');
        }

        // Cycle focus through active slots
        KeyCode::Tab => {
            cycle_focus(session, state);
        }

        // Start editing the focused slot's name
        KeyCode::Enter | KeyCode::Char('e') => {
            enter_edit_mode(session, state);
        }

        // Add an optional slot and start naming it. add_slot() returning
        // None means we are at capacity; the add button renders disabled
        // then, so this is just belt and suspenders.
        KeyCode::Char('+') | KeyCode::Char('a') => {
            if let Some(number) = session.selection.add_slot() {
                focus_slot(session, state, number);
                enter_edit_mode(session, state);
            }
        }

        // Remove the focused optional slot (no-op for slots 1 and 2)
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(number) = session.selection.number_of(state.focused) {
                session.selection.remove_slot(number);
            }
        }

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            state.mode = Mode::ConfirmQuit;
        }

        KeyCode::Esc => {
            state.dropdown = None;
        }

        _ => {}
    }
    Outcome::Continue
}

// ---------------------------------------------------------------------------
// Confirm-quit mode
// ---------------------------------------------------------------------------

/// Handle key events while in quit confirmation mode.
///
/// - `y` or `q` confirms quit
/// - `n` or `Esc` cancels (returns to normal mode)
/// - All other keys are blocked (no-op)
fn handle_confirm_quit(key_event: KeyEvent, state: &mut ViewState) -> Outcome {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Outcome::Quit
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            Outcome::Continue
        }
        _ => Outcome::Continue, // Block all other input
    }
}

// ---------------------------------------------------------------------------
// Edit mode
// ---------------------------------------------------------------------------

/// Handle key events while editing the focused slot's name.
///
/// - Printable characters and Backspace edit the name (the view re-derives
///   immediately; the dropdown re-filter may be debounced)
/// - Up/Down move the dropdown selection
/// - Enter commits: the highlighted suggestion when the dropdown is open,
///   otherwise the typed text as-is
/// - Esc cancels out of edit mode, keeping the typed text
fn handle_edit_mode(
    key_event: KeyEvent,
    session: &mut CompareSession,
    state: &mut ViewState,
    ui: &UiConfig,
) -> Outcome {
    match key_event.code {
        KeyCode::Esc => {
            leave_edit_mode(state);
        }
        KeyCode::Enter => {
            if let Some(dd) = &state.dropdown {
                if let Some(pick) = dd.items.get(dd.selected) {
                    let name = pick.name.clone();
                    set_focused_name(session, state, name);
                }
            }
            leave_edit_mode(state);
        }
        KeyCode::Up => {
            if let Some(dd) = &mut state.dropdown {
                dd.selected = dd.selected.saturating_sub(1);
            }
        }
        KeyCode::Down => {
            if let Some(dd) = &mut state.dropdown {
                if dd.selected + 1 < dd.items.len() {
                    dd.selected += 1;
                }
            }
        }
        KeyCode::Backspace => {
            edit_focused_name(session, state, |name| {
                name.pop();
            });
            queue_filter(session, state, ui);
        }
        KeyCode::Char(c) => {
            edit_focused_name(session, state, |name| {
                name.push(c);
            });
            queue_filter(session, state, ui);
        }
        _ => {}
    }
    Outcome::Continue
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn focus_slot(session: &CompareSession, state: &mut ViewState, number: u8) {
    if let Some(id) = session.selection.id_of(number) {
        state.focused = id;
    }
}

/// Move focus to the next active slot, wrapping back to slot 1.
fn cycle_focus(session: &CompareSession, state: &mut ViewState) {
    let count = session.selection.slot_count() as u8;
    let current = session.selection.number_of(state.focused).unwrap_or(1);
    let next = current % count + 1;
    focus_slot(session, state, next);
}

/// Enter edit mode on the focused slot with the full suggestion list open,
/// like clicking the dropdown arrow in a search box.
fn enter_edit_mode(session: &CompareSession, state: &mut ViewState) {
    state.mode = Mode::Edit;
    open_dropdown(state, session, "");
}

fn leave_edit_mode(state: &mut ViewState) {
    state.mode = Mode::Normal;
    state.dropdown = None;
    state.pending_filter = None;
}

fn set_focused_name(session: &mut CompareSession, state: &ViewState, name: String) {
    if let Some(number) = session.selection.number_of(state.focused) {
        session.selection.set_name(number, name);
    }
}

fn edit_focused_name(
    session: &mut CompareSession,
    state: &ViewState,
    edit: impl FnOnce(&mut String),
) {
    if let Some(number) = session.selection.number_of(state.focused) {
        let mut name = session.selection.name(number).unwrap_or("").to_string();
        edit(&mut name);
        session.selection.set_name(number, name);
    }
}

/// Schedule (or perform) a dropdown re-filter after a name edit.
///
/// Fixed slots re-filter immediately. Optional slots arm the debounce
/// deadline instead; overwriting `pending_filter` cancels and restarts the
/// timer, so at most one filter action is pending per keystroke burst.
fn queue_filter(session: &CompareSession, state: &mut ViewState, ui: &UiConfig) {
    let Some(number) = session.selection.number_of(state.focused) else {
        return;
    };
    if number as usize <= FIXED_SLOTS {
        let name = session.selection.name(number).unwrap_or("").to_string();
        if name.is_empty() {
            state.dropdown = None;
        } else {
            open_dropdown(state, session, &name);
        }
    } else {
        state.pending_filter = Some(PendingFilter {
            slot: state.focused,
            deadline: Instant::now() + Duration::from_millis(ui.debounce_ms),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
