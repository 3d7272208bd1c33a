use crate::ui::app::{App, Screen};
use crate::ui::drivers::DriverManagerIntent;
use crate::ui::editor::EditorIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match app.screen() {
        Screen::Editor => handle_editor_key(app, key),
        Screen::DriverManager => handle_driver_key(app, key),
    }
}

/// Bracketed paste goes into whichever text prompt is open.
pub fn handle_paste(app: &mut App, text: &str) {
    let chars = text.chars().filter(|ch| !ch.is_control());
    match app.screen() {
        Screen::Editor => {
            let editing = app
                .editor_state()
                .session()
                .is_some_and(|session| session.editing.is_some());
            if editing {
                for ch in chars {
                    app.dispatch_editor(EditorIntent::InputChar(ch));
                }
            }
        }
        Screen::DriverManager => {
            if app.driver_manager_state().import_path().is_some() {
                for ch in chars {
                    app.dispatch_drivers(DriverManagerIntent::ImportChar(ch));
                }
            }
        }
    }
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    let Some(session) = app.editor_state().session() else {
        return;
    };

    if session.editing.is_some() {
        let intent = match key.code {
            KeyCode::Enter => EditorIntent::CommitEdit,
            KeyCode::Esc => EditorIntent::CancelEdit,
            KeyCode::Backspace => EditorIntent::Backspace,
            KeyCode::Tab => EditorIntent::SuggestNext,
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                EditorIntent::InputChar(ch)
            }
            _ => return,
        };
        app.dispatch_editor(intent);
        return;
    }

    if session.confirm_discard {
        let intent = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => EditorIntent::ConfirmDiscard,
            KeyCode::Esc => EditorIntent::RequestClose,
            _ => EditorIntent::CancelDiscard,
        };
        app.dispatch_editor(intent);
        return;
    }

    if is_ctrl_char(key, 's') {
        app.dispatch_editor(EditorIntent::Save);
        return;
    }
    if is_ctrl_char(key, 'c') || is_ctrl_char(key, 'q') {
        app.dispatch_editor(EditorIntent::RequestClose);
        return;
    }

    let intent = match key.code {
        KeyCode::Up | KeyCode::Char('k') => EditorIntent::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => EditorIntent::MoveDown,
        KeyCode::Right | KeyCode::Char('l') => EditorIntent::Next,
        KeyCode::Left | KeyCode::Char('h') => EditorIntent::Previous,
        KeyCode::Enter | KeyCode::Char(' ') => EditorIntent::Activate,
        KeyCode::Delete | KeyCode::Char('d') => EditorIntent::RemoveFocused,
        KeyCode::Esc => EditorIntent::RequestClose,
        _ => return,
    };
    app.dispatch_editor(intent);
}

fn handle_driver_key(app: &mut App, key: KeyEvent) {
    let state = app.driver_manager_state();

    if state.import_path().is_some() {
        match key.code {
            KeyCode::Enter => app.submit_import(),
            KeyCode::Esc => app.dispatch_drivers(DriverManagerIntent::CancelImport),
            KeyCode::Backspace => app.dispatch_drivers(DriverManagerIntent::ImportBackspace),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.dispatch_drivers(DriverManagerIntent::ImportChar(ch))
            }
            _ => {}
        }
        return;
    }

    if state.pending_delete().is_some() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            _ => app.dispatch_drivers(DriverManagerIntent::CancelDelete),
        }
        return;
    }

    if is_ctrl_char(key, 'c') || is_ctrl_char(key, 'q') {
        app.dispatch_drivers(DriverManagerIntent::Close);
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.dispatch_drivers(DriverManagerIntent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => app.dispatch_drivers(DriverManagerIntent::MoveDown),
        KeyCode::Char('i') => app.dispatch_drivers(DriverManagerIntent::OpenImport),
        KeyCode::Delete | KeyCode::Char('d') => {
            app.dispatch_drivers(DriverManagerIntent::RequestDelete)
        }
        KeyCode::Esc | KeyCode::Char('q') => app.dispatch_drivers(DriverManagerIntent::Close),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}
