mod fields;
mod intent;
mod reducer;
mod state;

pub use fields::{rows, Control, FieldKey, Row, Section};
pub use intent::EditorIntent;
pub use reducer::EditorReducer;
pub use state::{EditorOutcome, EditorSession, EditorState, TextEdit};
