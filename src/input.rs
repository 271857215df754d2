//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  Adding a new keybinding is
//! a single match arm in [`handle_key_event`].
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_key_event`] that calls it.
//! 3. Update the help text in `ui::draw_status_bar`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{App, InputMode};

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.mode {
        InputMode::Browse => handle_browse_key(app, key.code),
        InputMode::PageJump => handle_page_jump_key(app, key.code),
    }
}

fn handle_browse_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Right | KeyCode::Char('l') => app.scroll_right(),
        KeyCode::Left | KeyCode::Char('h') => app.scroll_left(),
        KeyCode::Home | KeyCode::Char('[') => app.first_page(),
        KeyCode::PageUp | KeyCode::Char('p') => app.previous_page(),
        KeyCode::PageDown | KeyCode::Char('n') => app.next_page(),
        KeyCode::End | KeyCode::Char(']') => app.last_page(),
        KeyCode::Char('s') => app.cycle_page_size(),
        KeyCode::Char('t') => app.toggle_source(),
        KeyCode::Char(':') | KeyCode::Char('/') => app.begin_page_jump(),
        _ => {}
    }
}

fn handle_page_jump_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.submit_page_jump(),
        KeyCode::Esc => app.cancel_page_jump(),
        KeyCode::Backspace => app.pop_page_input(),
        KeyCode::Char(c) => app.push_page_input(c),
        _ => {}
    }
}
