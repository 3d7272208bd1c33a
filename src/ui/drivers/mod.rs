mod intent;
mod reducer;
mod state;

pub use intent::DriverManagerIntent;
pub use reducer::DriverManagerReducer;
pub use state::{DriverManagerState, OperationResult};
