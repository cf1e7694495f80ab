mod apps;
mod autostart;
mod common;
mod context;
mod debounce;
mod links;
mod logging;
mod settings;
mod ui;
mod welcome;

use clap::{Parser, Subcommand};

use crate::context::AppContext;
use crate::links::Link;
use crate::settings::SettingsCommands;
use crate::ui::prelude::*;
use crate::welcome::AutostartCommands;

/// Radxa Welcome main parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Console output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive welcome menu (default)
    Ui,

    /// Manage showing the welcome app at login
    Autostart {
        #[command(subcommand)]
        command: AutostartCommands,
    },

    /// Launch an application by category, offering to install one if needed
    Launch {
        /// settings, terminal, software_center or task_manager
        category: Option<String>,
        /// List categories and their candidates
        #[arg(long)]
        list: bool,
    },

    /// Open a community link in the browser
    Open {
        #[arg(value_enum)]
        link: Link,
    },

    /// Inspect or change stored settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.format, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    // Log and settings directories are startup preconditions
    let mut ctx = match AppContext::init() {
        Ok(ctx) => ctx,
        Err(e) => {
            emit(
                Level::Error,
                "startup.error",
                &format!("Error: {:#}", e),
                None,
            );
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&mut ctx, cli.command) {
        ctx.logger.error("command.error", &format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

fn run(ctx: &mut AppContext, command: Option<Commands>) -> anyhow::Result<()> {
    match command {
        None | Some(Commands::Ui) => welcome::run_welcome_ui(ctx),
        Some(Commands::Autostart { command }) => welcome::handle_autostart_command(ctx, &command),
        Some(Commands::Launch { category, list }) => {
            welcome::handle_launch_command(ctx, category.as_deref(), list)
        }
        Some(Commands::Open { link }) => welcome::handle_open_command(ctx, link),
        Some(Commands::Settings { command }) => {
            settings::handle_settings_command(&mut ctx.settings, &command)
        }
    }
}
