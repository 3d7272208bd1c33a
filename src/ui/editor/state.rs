use std::sync::Arc;

use crate::config::ContainerConfig;
use crate::reconcile::{ReconcileContext, Selections};
use crate::ui::editor::fields::{rows, FieldKey, Row};
use crate::ui::mvi::UiState;

/// How an editor session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    /// The user saved; carries the record to persist.
    Saved(ContainerConfig),
    /// The user closed without saving. The original record stands.
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Hidden,
    Visible(Box<EditorSession>),
    Closed(EditorOutcome),
}

impl UiState for EditorState {}

impl EditorState {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    pub fn session(&self) -> Option<&EditorSession> {
        match self {
            Self::Visible(session) => Some(session),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&EditorOutcome> {
        match self {
            Self::Closed(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// An inline text edit on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub key: FieldKey,
    pub buffer: String,
}

/// One open editor: the record as it was opened, the working draft and
/// the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    pub title: String,
    /// Editing the default profile rather than a container; hides options
    /// that only make sense per container.
    pub default_profile: bool,
    pub ctx: Arc<ReconcileContext>,
    /// Reconciled record as opened. Never mutated.
    pub original: ContainerConfig,
    pub draft: ContainerConfig,
    pub selections: Selections,
    pub focused: usize,
    /// When true, the next close request discards the draft.
    pub confirm_discard: bool,
    pub editing: Option<TextEdit>,
}

impl EditorSession {
    pub fn new(
        title: String,
        initial: ContainerConfig,
        default_profile: bool,
        ctx: Arc<ReconcileContext>,
    ) -> Self {
        let (original, selections) = ctx.reconcile(initial);
        Self {
            title,
            default_profile,
            ctx,
            draft: original.clone(),
            original,
            selections,
            focused: 0,
            confirm_discard: false,
            editing: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    pub fn rows(&self) -> Vec<Row> {
        rows(self)
    }

    pub fn focused_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.focused)
    }
}
