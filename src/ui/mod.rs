//! Terminal front end: the configuration editor and the driver manager.

pub mod app;
pub mod drivers;
pub mod editor;
pub mod events;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::{run_driver_manager, ConfigEditor};
