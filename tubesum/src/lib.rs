mod app;
pub mod app_core;
pub mod background;
pub mod cli;
pub mod commands;
pub mod events;
pub mod logging;
pub mod state;
pub mod ui;

pub use app::{App, TaskHandler};

// Always expose testing module (integration tests need it)
pub mod testing;
