//! Non-interactive entry points for the welcome actions

use anyhow::Result;
use clap::Subcommand;
use serde_json::json;

use super::ui::DialogPrompt;
use crate::apps::{Category, Resolution};
use crate::context::AppContext;
use crate::links::Link;
use crate::ui::prelude::*;

#[derive(Subcommand, Debug, Clone)]
pub enum AutostartCommands {
    /// Show the welcome app at login
    Enable,
    /// Stop showing the welcome app at login
    Disable,
    /// Print the current autostart state
    Status,
}

pub fn handle_autostart_command(ctx: &mut AppContext, command: &AutostartCommands) -> Result<()> {
    match command {
        AutostartCommands::Enable => ctx.set_autolaunch(true)?,
        AutostartCommands::Disable => ctx.set_autolaunch(false)?,
        AutostartCommands::Status => {}
    }

    let enabled = ctx.autostart_enabled()?;
    let installed = ctx.autolaunch.is_installed();
    emit(
        Level::Info,
        "autostart.status",
        &format!(
            "Autostart is {} (descriptor {})",
            if enabled { "enabled" } else { "disabled" },
            if installed { "present" } else { "absent" }
        ),
        Some(json!({ "enabled": enabled, "descriptor": installed })),
    );
    Ok(())
}

pub fn handle_launch_command(ctx: &AppContext, category: Option<&str>, list: bool) -> Result<()> {
    if list {
        for category in Category::ALL {
            let names: Vec<&str> = category
                .candidates()
                .iter()
                .map(|c| c.display_name)
                .collect();
            emit(
                Level::Info,
                "launch.list",
                &format!("{:<16} {}", category.key(), names.join(", ")),
                Some(json!({ "category": category.key(), "candidates": names })),
            );
        }
        return Ok(());
    }

    let Some(category) = category else {
        anyhow::bail!("Missing category (use --list to see the choices)");
    };

    match ctx.resolve_and_launch(category, &DialogPrompt)? {
        Resolution::Launched(candidate) => emit(
            Level::Success,
            "launch.launched",
            &format!("Launched {}", candidate.display_name),
            Some(json!({ "package": candidate.package, "exec": candidate.exec })),
        ),
        Resolution::PromptedForInstall {
            installed: Some(candidate),
        } => emit(
            Level::Success,
            "launch.installed",
            &format!("Installed and launched {}", candidate.display_name),
            Some(json!({ "package": candidate.package, "exec": candidate.exec })),
        ),
        Resolution::PromptedForInstall { installed: None } => emit(
            Level::Info,
            "launch.declined",
            "Nothing was installed",
            None,
        ),
    }
    Ok(())
}

pub fn handle_open_command(ctx: &AppContext, link: Link) -> Result<()> {
    ctx.open_link(link)
}
