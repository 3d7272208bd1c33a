pub mod catalog;
pub mod cli;
pub mod config;
pub mod drivers;
pub mod edit;
pub mod gpu;
pub mod launch;
pub mod logging;
pub mod reconcile;
pub mod ui;
