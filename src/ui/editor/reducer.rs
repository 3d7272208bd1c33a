use crate::config::{known_env_var, KNOWN_ENV_VARS};
use crate::edit::{self, FieldEdit};
use crate::ui::editor::fields::{Control, FieldKey};
use crate::ui::editor::intent::EditorIntent;
use crate::ui::editor::state::{EditorOutcome, EditorSession, EditorState, TextEdit};
use crate::ui::mvi::Reducer;

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Intent = EditorIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EditorIntent::Open {
                title,
                initial,
                default_profile,
                ctx,
            } => EditorState::Visible(Box::new(EditorSession::new(
                title,
                initial,
                default_profile,
                ctx,
            ))),
            intent => match state {
                EditorState::Visible(session) if session.editing.is_some() => {
                    reduce_text_edit(session, intent)
                }
                EditorState::Visible(session) => reduce_session(session, intent),
                other => other,
            },
        }
    }
}

fn reduce_session(mut session: Box<EditorSession>, intent: EditorIntent) -> EditorState {
    match intent {
        EditorIntent::Edit(edit) => apply_edit(&mut session, &edit),
        EditorIntent::MoveUp => {
            let len = session.rows().len();
            session.focused = if session.focused == 0 {
                len.saturating_sub(1)
            } else {
                session.focused - 1
            };
            session.confirm_discard = false;
        }
        EditorIntent::MoveDown => {
            let len = session.rows().len();
            session.focused = if session.focused + 1 >= len {
                0
            } else {
                session.focused + 1
            };
            session.confirm_discard = false;
        }
        EditorIntent::Next => step_focused(&mut session, true),
        EditorIntent::Previous => step_focused(&mut session, false),
        EditorIntent::Activate => {
            if let Some(row) = session.focused_row() {
                match row.control {
                    Control::Choice { .. } | Control::Toggle(_) => {
                        step_focused(&mut session, true)
                    }
                    Control::Text(value) => {
                        session.editing = Some(TextEdit {
                            key: row.key,
                            buffer: value,
                        });
                    }
                    Control::Action => {
                        session.editing = Some(TextEdit {
                            key: row.key,
                            buffer: String::new(),
                        });
                    }
                    Control::Label(_) => {}
                }
            }
        }
        EditorIntent::RemoveFocused => {
            if let Some(edit) = session.focused_row().and_then(|row| row.key.remove_edit()) {
                apply_edit(&mut session, &edit);
            }
        }
        EditorIntent::Save => {
            tracing::debug!("Saving container '{}'", session.draft.name);
            return EditorState::Closed(EditorOutcome::Saved(session.draft));
        }
        EditorIntent::RequestClose => {
            if session.is_dirty() && !session.confirm_discard {
                // First Escape with unsaved changes: ask for confirmation
                session.confirm_discard = true;
            } else {
                return EditorState::Closed(EditorOutcome::Dismissed);
            }
        }
        EditorIntent::ConfirmDiscard => return EditorState::Closed(EditorOutcome::Dismissed),
        EditorIntent::CancelDiscard => session.confirm_discard = false,
        EditorIntent::Open { .. }
        | EditorIntent::InputChar(_)
        | EditorIntent::Backspace
        | EditorIntent::SuggestNext
        | EditorIntent::CommitEdit
        | EditorIntent::CancelEdit => {}
    }
    EditorState::Visible(session)
}

/// Intents while a text prompt is open. Escape closes the prompt, not the
/// editor.
fn reduce_text_edit(mut session: Box<EditorSession>, intent: EditorIntent) -> EditorState {
    match intent {
        EditorIntent::InputChar(ch) => {
            if let Some(editing) = session.editing.as_mut() {
                editing.buffer.push(ch);
            }
        }
        EditorIntent::Backspace => {
            if let Some(editing) = session.editing.as_mut() {
                editing.buffer.pop();
            }
        }
        EditorIntent::SuggestNext => {
            let existing: Vec<String> = session.draft.env_vars.names().map(str::to_string).collect();
            if let Some(editing) = session.editing.as_mut() {
                if let Some(buffer) = suggest(&editing.key, &editing.buffer, &existing) {
                    editing.buffer = buffer;
                }
            }
        }
        EditorIntent::CommitEdit => {
            if let Some(TextEdit { key, buffer }) = session.editing.take() {
                match key.text_edit(&buffer) {
                    Some(edit) => apply_edit(&mut session, &edit),
                    None => tracing::debug!("Ignoring input '{}' for {:?}", buffer, key),
                }
            }
        }
        EditorIntent::CancelEdit | EditorIntent::RequestClose => session.editing = None,
        EditorIntent::Edit(edit) => apply_edit(&mut session, &edit),
        _ => {}
    }
    EditorState::Visible(session)
}

fn apply_edit(session: &mut EditorSession, edit: &FieldEdit) {
    let focused_key = session.focused_row().map(|row| row.key);
    let (draft, selections) = edit::apply(&session.ctx, &session.draft, edit);
    session.draft = draft;
    session.selections = selections;
    session.confirm_discard = false;

    let rows = session.rows();
    session.focused = focused_key
        .and_then(|key| rows.iter().position(|row| row.key == key))
        .unwrap_or(session.focused)
        .min(rows.len().saturating_sub(1));
}

fn step_focused(session: &mut EditorSession, forward: bool) {
    let Some(row) = session.focused_row() else {
        return;
    };
    let edit = match row.control {
        Control::Choice { options, selected } if !options.is_empty() => {
            let len = options.len();
            let step = |i: usize| if forward { (i + 1) % len } else { (i + len - 1) % len };
            let mut next = step(selected);
            // The custom screen size entry is set through its text row.
            if row.key == FieldKey::ScreenSize && next == 0 {
                next = step(next);
            }
            row.key.choice_edit(next)
        }
        Control::Toggle(on) => row.key.toggle_edit(!on),
        _ => None,
    };
    if let Some(edit) = edit {
        apply_edit(session, &edit);
    }
}

/// Next suggestion for an environment variable prompt.
///
/// On an existing variable this cycles its known values. On the add prompt
/// it cycles the names of known variables not yet set until `=` is typed,
/// then the values of the typed name.
fn suggest(key: &FieldKey, buffer: &str, existing: &[String]) -> Option<String> {
    match key {
        FieldKey::EnvVar(name) => known_env_var(name)?
            .cycle(buffer, true)
            .map(str::to_string),
        FieldKey::AddEnvVar => match buffer.split_once('=') {
            Some((name, value)) => {
                let next = known_env_var(name)?.cycle(value, true)?;
                Some(format!("{}={}", name, next))
            }
            None => {
                let candidates: Vec<&str> = KNOWN_ENV_VARS
                    .iter()
                    .map(|known| known.name)
                    .filter(|name| !existing.iter().any(|set| set == name))
                    .collect();
                let start = candidates
                    .iter()
                    .position(|name| *name == buffer)
                    .map_or(0, |i| i + 1);
                candidates
                    .get(start)
                    .or_else(|| candidates.first())
                    .map(|name| name.to_string())
            }
        },
        _ => None,
    }
}
