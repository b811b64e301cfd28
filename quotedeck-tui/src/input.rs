//! Keyboard input dispatch.
//!
//! The dashboard is a single form: type to edit the symbol, Tab cycles the
//! period, Enter triggers a fetch, Up/Down scroll the table, Esc quits.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

/// Handle one key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Enter => {
            app.request_fetch();
        }
        KeyCode::Tab => {
            app.cycle_period();
        }
        KeyCode::Backspace => {
            app.pop_symbol_char();
        }
        KeyCode::Up => {
            app.scroll_up();
        }
        KeyCode::Down => {
            app.scroll_down();
        }
        KeyCode::Char(c) => {
            app.push_symbol_char(c);
        }
        _ => {}
    }
}
