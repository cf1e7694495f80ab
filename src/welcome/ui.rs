//! Terminal UI for the welcome application

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Select};

use super::carousel::{Carousel, Navigation, Page};
use crate::apps::{Candidate, Category, InstallPrompt, Resolution};
use crate::context::AppContext;
use crate::links::{self, Link};
use crate::ui::prelude::*;

/// Desktop id of the board configuration tool
const RSETUP_EXEC: &str = "rsetup";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppAction {
    BoardSetup,
    Resolve(Category),
}

impl AppAction {
    const ALL: [AppAction; 5] = [
        AppAction::BoardSetup,
        AppAction::Resolve(Category::SoftwareCenter),
        AppAction::Resolve(Category::Terminal),
        AppAction::Resolve(Category::TaskManager),
        AppAction::Resolve(Category::Settings),
    ];

    fn label(self) -> &'static str {
        match self {
            AppAction::BoardSetup => "Board setup (rsetup)",
            AppAction::Resolve(category) => category.label(),
        }
    }
}

/// Entries of the content view. Dispatch happens on these, never on text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Open(Link),
    Launch(AppAction),
    Next,
    Previous,
    Preferences,
    About,
    Close,
}

impl MenuItem {
    fn display_text(self, locale: Option<&str>) -> String {
        match self {
            MenuItem::Open(link) => format!("{}  {}", link.label(), link.url(locale).dimmed()),
            MenuItem::Launch(action) => action.label().to_string(),
            MenuItem::Next => "Next ›".to_string(),
            MenuItem::Previous => "‹ Previous".to_string(),
            MenuItem::Preferences => "Preferences".to_string(),
            MenuItem::About => "About".to_string(),
            MenuItem::Close => "Close".to_string(),
        }
    }
}

fn page_items(carousel: &Carousel) -> Vec<MenuItem> {
    let mut items: Vec<MenuItem> = match carousel.current() {
        Some(Page::Links) => Link::ALL.into_iter().map(MenuItem::Open).collect(),
        Some(Page::Apps) => AppAction::ALL.into_iter().map(MenuItem::Launch).collect(),
        None => Vec::new(),
    };
    if carousel.has_next() {
        items.push(MenuItem::Next);
    }
    if carousel.has_previous() {
        items.push(MenuItem::Previous);
    }
    items.push(MenuItem::Preferences);
    items.push(MenuItem::About);
    items.push(MenuItem::Close);
    items
}

/// Install prompt backed by dialoguer.
pub struct DialogPrompt;

impl InstallPrompt for DialogPrompt {
    fn choose(&self, category: Category, candidates: &[Candidate]) -> Result<Option<usize>> {
        let names: Vec<&str> = candidates.iter().map(|c| c.display_name).collect();
        let selection = Select::new()
            .with_prompt(format!(
                "It seems you don't have a {} application, which one would you like to install?",
                category.label().to_lowercase()
            ))
            .items(&names)
            .default(0)
            .interact_opt()
            .context("Failed to show install dialog")?;

        let Some(index) = selection else {
            return Ok(None);
        };
        let confirmed = Confirm::new()
            .with_prompt(format!("Install {}?", names[index]))
            .default(true)
            .interact()
            .context("Failed to show confirmation")?;

        Ok(confirmed.then_some(index))
    }
}

pub fn run_welcome_ui(ctx: &mut AppContext) -> Result<()> {
    ctx.logger.debug("welcome.start", "Starting welcome UI");

    if ctx.is_first_run()? && !run_welcome_page(ctx)? {
        return Ok(());
    }

    let mut carousel = Carousel::new(vec![Page::Links, Page::Apps]);
    let navigation = Navigation::default();
    let locale = links::current_locale();

    loop {
        let Some(page) = carousel.current() else {
            break;
        };
        println!();
        println!(
            "{}  {}",
            page.title().bold(),
            format!("({}/{})", carousel.position() + 1, carousel.len()).dimmed()
        );
        separator();

        let items = page_items(&carousel);
        let labels: Vec<String> = items
            .iter()
            .map(|item| item.display_text(locale.as_deref()))
            .collect();
        let selection = Select::new()
            .items(&labels)
            .default(0)
            .interact_opt()
            .context("Failed to show menu")?;

        let Some(item) = selection.map(|index| items[index]) else {
            break;
        };

        match item {
            MenuItem::Open(link) => {
                if let Err(e) = ctx.open_link(link) {
                    report(ctx, "welcome.link.error", &format!("{:#}", e));
                }
            }
            MenuItem::Launch(action) => run_app_action(ctx, action),
            MenuItem::Next => {
                navigation.next.call(&mut carousel);
            }
            MenuItem::Previous => {
                navigation.previous.call(&mut carousel);
            }
            MenuItem::Preferences => show_preferences(ctx)?,
            MenuItem::About => show_about(),
            MenuItem::Close => break,
        }
    }

    ctx.logger.debug("welcome.close", "Closing welcome UI");
    Ok(())
}

/// First-run greeting. Returns false if the user left without continuing.
fn run_welcome_page(ctx: &mut AppContext) -> Result<bool> {
    println!();
    println!("{}", "Welcome to Radxa".bold().green());
    println!("Thanks for choosing Radxa. Let's get you started.");
    separator();

    let mut autostart = ctx.autostart_enabled()?;
    loop {
        let state = if autostart {
            "on".green()
        } else {
            "off".yellow()
        };
        let toggle = format!("Show on startup: {}", state);
        let items = ["Get started".to_string(), toggle];
        let selection = Select::new()
            .items(&items)
            .default(0)
            .interact_opt()
            .context("Failed to show welcome page")?;

        match selection {
            Some(0) => {
                if let Err(e) = ctx.finish_first_run(autostart) {
                    report(ctx, "welcome.first_run.error", &format!("{:#}", e));
                }
                return Ok(true);
            }
            Some(_) => autostart = !autostart,
            None => return Ok(false),
        }
    }
}

fn run_app_action(ctx: &mut AppContext, action: AppAction) {
    let result = match action {
        AppAction::BoardSetup => ctx.resolver.launch_direct(RSETUP_EXEC).map(|()| None),
        AppAction::Resolve(category) => ctx.resolver.resolve(category, &DialogPrompt).map(Some),
    };

    match result {
        Ok(Some(Resolution::PromptedForInstall { installed: None })) => {
            ctx.logger.info("welcome.install.declined", "Nothing installed");
        }
        Ok(_) => {}
        Err(e) => report(
            ctx,
            "welcome.app.error",
            &format!("{:#}", anyhow::Error::from(e)),
        ),
    }
}

fn show_preferences(ctx: &mut AppContext) -> Result<()> {
    let current = ctx.autostart_enabled()?;
    let enable = Confirm::new()
        .with_prompt("Show Radxa Welcome when you log in?")
        .default(current)
        .interact_opt()
        .context("Failed to show preferences")?;

    if let Some(enable) = enable
        && let Err(e) = ctx.set_autolaunch(enable)
    {
        report(ctx, "welcome.autostart.error", &format!("{:#}", e));
    }
    Ok(())
}

fn show_about() {
    println!();
    println!("{} {}", "Radxa Welcome".bold(), env!("CARGO_PKG_VERSION"));
    println!("Developed by Radxa");
    println!("© 2024 Radxa Computer Co., Ltd");
    println!("License: GPL-3.0-or-later");
    println!("Website: https://radxa.com");
    println!("Special thanks to Shivanandvp");
}

/// Failed convenience actions are logged and shown as a single line.
fn report(ctx: &AppContext, code: &str, message: &str) {
    ctx.logger.error(code, message);
}
