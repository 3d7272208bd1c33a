use crate::ui::mvi::UiState;

/// Result of the last import or removal, shown under the driver list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Installed(String),
    Removed(String),
    /// Failed operation with its status line.
    Failed(String),
}

impl OperationResult {
    pub fn message(&self) -> String {
        match self {
            Self::Installed(id) => format!("Installed driver: {}", id),
            Self::Removed(id) => format!("Removed driver: {}", id),
            Self::Failed(message) => message.clone(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DriverManagerState {
    #[default]
    Hidden,
    Visible {
        drivers: Vec<String>,
        focused: usize,
        last_result: Option<OperationResult>,
        /// Driver awaiting delete confirmation.
        confirm_delete: Option<String>,
        /// Archive path being typed for an import.
        import_path: Option<String>,
    },
}

impl UiState for DriverManagerState {}

impl DriverManagerState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn drivers(&self) -> &[String] {
        match self {
            Self::Visible { drivers, .. } => drivers,
            Self::Hidden => &[],
        }
    }

    pub fn focused_driver(&self) -> Option<&str> {
        match self {
            Self::Visible {
                drivers, focused, ..
            } => drivers.get(*focused).map(String::as_str),
            Self::Hidden => None,
        }
    }

    pub fn pending_delete(&self) -> Option<&str> {
        match self {
            Self::Visible { confirm_delete, .. } => confirm_delete.as_deref(),
            Self::Hidden => None,
        }
    }

    pub fn import_path(&self) -> Option<&str> {
        match self {
            Self::Visible { import_path, .. } => import_path.as_deref(),
            Self::Hidden => None,
        }
    }

    pub fn last_result(&self) -> Option<&OperationResult> {
        match self {
            Self::Visible { last_result, .. } => last_result.as_ref(),
            Self::Hidden => None,
        }
    }
}
