//! Keyboard and mouse handling

use crate::app::App;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

pub fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Enter => app.toggle(),
        KeyCode::Char('s') | KeyCode::Char('x') => app.stop(),
        _ => {}
    }
}

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(button) = app.button_at(mouse.column, mouse.row) {
                tracing::debug!(?button, "Button clicked");
                app.press(button);
            }
        }
        MouseEventKind::Moved => {
            app.hovered_button = app.button_at(mouse.column, mouse.row);
        }
        _ => {}
    }
}
