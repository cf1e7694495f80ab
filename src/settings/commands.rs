use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::{Value, json};

use super::SettingsStore;
use crate::ui::prelude::*;

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommands {
    /// Print every stored setting
    Show,
    /// Read a setting, storing the default if it is missing
    Get {
        key: String,
        /// JSON value to store when the key is missing
        #[arg(long, default_value = "null")]
        default: String,
    },
    /// Store a setting
    Set {
        key: String,
        /// JSON value; anything that is not valid JSON is stored as a string
        value: String,
    },
}

pub fn handle_settings_command(
    store: &mut SettingsStore,
    command: &SettingsCommands,
) -> Result<()> {
    match command {
        SettingsCommands::Show => {
            let entries = Value::Object(store.entries().clone());
            let pretty = serde_json::to_string_pretty(&entries).context("serializing settings")?;
            emit(
                Level::Debug,
                "settings.path",
                &format!("Settings file: {}", store.path().display()),
                None,
            );
            emit(Level::Info, "settings.show", &pretty, Some(entries));
        }
        SettingsCommands::Get { key, default } => {
            let value = store.get_value(key, parse_value(default))?;
            emit(
                Level::Info,
                "settings.get",
                &value.to_string(),
                Some(json!({ "key": key, "value": value })),
            );
        }
        SettingsCommands::Set { key, value } => {
            let value = parse_value(value);
            store.set(key, &value)?;
            emit(
                Level::Success,
                "settings.set",
                &format!("{} = {}", key, value),
                Some(json!({ "key": key, "value": value })),
            );
        }
    }
    Ok(())
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
