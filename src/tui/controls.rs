//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
/// While a number is being typed, Enter applies it and Esc discards it.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    if app.editing.is_some() {
        match key.code {
            KeyCode::Enter => app.commit_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(ch) if is_number_char(ch) => app.type_char(ch),
            KeyCode::Up | KeyCode::BackTab => app.select_prev(),
            KeyCode::Down | KeyCode::Tab => app.select_next(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Up | KeyCode::BackTab => app.select_prev(),
        KeyCode::Down | KeyCode::Tab => app.select_next(),
        KeyCode::Left => app.nudge(-1),
        KeyCode::Right => app.nudge(1),
        KeyCode::PageDown => app.nudge_coarse(-1),
        KeyCode::PageUp => app.nudge_coarse(1),
        KeyCode::Char('o') => app.cycle_orientation(),
        KeyCode::Char('v') => app.toggle_policy(),
        KeyCode::Char('p') => app.print(),
        KeyCode::Char('r') => app.reset(),
        KeyCode::F(1) => app.switch_preset("default"),
        KeyCode::F(2) => app.switch_preset("no_battery"),
        KeyCode::F(3) => app.switch_preset("small_home"),
        KeyCode::F(4) => app.switch_preset("east_west"),
        KeyCode::Char(ch) if is_number_char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || ch == '-'
}
