use std::sync::Arc;

use crate::config::ContainerConfig;
use crate::edit::FieldEdit;
use crate::reconcile::ReconcileContext;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum EditorIntent {
    Open {
        title: String,
        initial: ContainerConfig,
        default_profile: bool,
        ctx: Arc<ReconcileContext>,
    },
    /// Apply one edit to the draft.
    Edit(FieldEdit),
    MoveUp,
    MoveDown,
    /// Next option of the focused choice, or flip the focused toggle.
    Next,
    Previous,
    /// Enter on the focused row: flip a toggle, or open its text prompt.
    Activate,
    /// Remove the focused environment variable or drive.
    RemoveFocused,
    InputChar(char),
    Backspace,
    /// Fill the text prompt with the next known value.
    SuggestNext,
    CommitEdit,
    CancelEdit,
    Save,
    /// User pressed Escape. If dirty and not yet confirming, sets confirm_discard flag.
    /// If clean or already confirming, closes with `Dismissed`.
    RequestClose,
    ConfirmDiscard,
    CancelDiscard,
}

impl Intent for EditorIntent {}
