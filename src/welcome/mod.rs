//! Radxa Welcome first-run application
//!
//! Greets new users, links to community resources, and launches or installs
//! common desktop utilities.

pub mod carousel;
pub mod commands;
mod ui;

pub use commands::{
    AutostartCommands, handle_autostart_command, handle_launch_command, handle_open_command,
};
pub use ui::run_welcome_ui;
