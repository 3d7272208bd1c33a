use std::path::Path;
use std::sync::Arc;

use crate::config::ContainerConfig;
use crate::drivers::{installed_or_empty, DriverRepository};
use crate::reconcile::ReconcileContext;
use crate::ui::drivers::{
    DriverManagerIntent, DriverManagerReducer, DriverManagerState, OperationResult,
};
use crate::ui::editor::{EditorIntent, EditorOutcome, EditorReducer, EditorState};
use crate::ui::mvi::Reducer;

/// Dispatch an intent to an MVI reducer, replacing the state field in place.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Which dialog owns the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Editor,
    DriverManager,
}

/// Terminal front end state: one dialog plus the resources it drives.
pub struct App {
    screen: Screen,
    /// Configuration editor state (MVI pattern).
    editor: EditorState,
    /// Driver manager state (MVI pattern).
    driver_manager: DriverManagerState,
    /// Driver storage (resource, managed outside MVI).
    repository: Option<Box<dyn DriverRepository>>,
    should_quit: bool,
}

impl App {
    pub fn editor(
        title: String,
        initial: ContainerConfig,
        default_profile: bool,
        ctx: Arc<ReconcileContext>,
    ) -> Self {
        let mut app = Self {
            screen: Screen::Editor,
            editor: EditorState::Hidden,
            driver_manager: DriverManagerState::Hidden,
            repository: None,
            should_quit: false,
        };
        app.dispatch_editor(EditorIntent::Open {
            title,
            initial,
            default_profile,
            ctx,
        });
        app
    }

    pub fn driver_manager(repository: Box<dyn DriverRepository>) -> Self {
        let drivers = installed_or_empty(repository.as_ref());
        let mut app = Self {
            screen: Screen::DriverManager,
            editor: EditorState::Hidden,
            driver_manager: DriverManagerState::Hidden,
            repository: Some(repository),
            should_quit: false,
        };
        app.dispatch_drivers(DriverManagerIntent::Load { drivers });
        app
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ========================================================================
    // Configuration editor (MVI pattern)
    // ========================================================================

    pub fn editor_state(&self) -> &EditorState {
        &self.editor
    }

    pub fn dispatch_editor(&mut self, intent: EditorIntent) {
        dispatch_mvi!(self, editor, EditorReducer, intent);
        if let EditorState::Closed(outcome) = &self.editor {
            tracing::debug!(
                "Editor closed: {}",
                match outcome {
                    EditorOutcome::Saved(_) => "saved",
                    EditorOutcome::Dismissed => "dismissed",
                }
            );
            self.should_quit = true;
        }
    }

    /// How the editor ended, once it has.
    pub fn take_editor_outcome(&mut self) -> Option<EditorOutcome> {
        match std::mem::take(&mut self.editor) {
            EditorState::Closed(outcome) => Some(outcome),
            other => {
                self.editor = other;
                None
            }
        }
    }

    // ========================================================================
    // Driver manager (MVI pattern)
    // ========================================================================

    pub fn driver_manager_state(&self) -> &DriverManagerState {
        &self.driver_manager
    }

    pub fn dispatch_drivers(&mut self, intent: DriverManagerIntent) {
        dispatch_mvi!(self, driver_manager, DriverManagerReducer, intent);
        if !self.driver_manager.is_visible() && self.screen == Screen::DriverManager {
            self.should_quit = true;
        }
    }

    /// Import the archive typed into the import prompt.
    pub fn submit_import(&mut self) {
        let Some(path) = self.driver_manager.import_path().map(str::trim) else {
            return;
        };
        if path.is_empty() {
            self.dispatch_drivers(DriverManagerIntent::CancelImport);
            return;
        }
        let path = path.to_string();
        self.import_driver(Path::new(&path));
    }

    pub fn import_driver(&mut self, archive: &Path) {
        let Some(repository) = self.repository.as_ref() else {
            return;
        };
        let result = match repository.import(archive) {
            Ok(id) => OperationResult::Installed(id),
            Err(err) => OperationResult::Failed(err.import_message()),
        };
        let drivers = installed_or_empty(repository.as_ref());
        self.dispatch_drivers(DriverManagerIntent::Finished { result, drivers });
    }

    /// Remove the driver awaiting confirmation.
    pub fn confirm_delete(&mut self) {
        let Some(id) = self.driver_manager.pending_delete().map(str::to_string) else {
            return;
        };
        let Some(repository) = self.repository.as_ref() else {
            return;
        };
        let result = match repository.remove(&id) {
            Ok(()) => OperationResult::Removed(id),
            Err(err) => OperationResult::Failed(err.remove_message(&id)),
        };
        let drivers = installed_or_empty(repository.as_ref());
        self.dispatch_drivers(DriverManagerIntent::Finished { result, drivers });
    }
}
