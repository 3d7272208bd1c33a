use crate::ui::drivers::state::OperationResult;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum DriverManagerIntent {
    Load { drivers: Vec<String> },
    Close,
    MoveUp,
    MoveDown,
    /// Ask to delete the focused driver.
    RequestDelete,
    CancelDelete,
    OpenImport,
    ImportChar(char),
    ImportBackspace,
    CancelImport,
    /// An import or removal finished; carries the refreshed listing.
    Finished {
        result: OperationResult,
        drivers: Vec<String>,
    },
}

impl Intent for DriverManagerIntent {}
