pub mod commands;
pub mod store;

pub use commands::{SettingsCommands, handle_settings_command};
pub use store::{AUTOSTART, FIRST_RUN, SettingsStore};
