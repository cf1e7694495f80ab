//! Launching desktop utilities by category.
//!
//! A [`Category`] lists interchangeable [`Candidate`]s in preference order.
//! [`AppResolver`] launches the first installed one, or asks the user which
//! one to install through an [`InstallPrompt`].

pub mod registry;
pub mod resolver;

use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use thiserror::Error;

use crate::common::package::{PackageManager, install};

pub use registry::{Candidate, Category};
pub use resolver::{AppResolver, Resolution};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Unknown app type: {0}")]
    UnknownCategory(String),

    #[error("Failed to launch {exec}")]
    Launch { exec: String, source: anyhow::Error },

    #[error("Install prompt failed")]
    Prompt(#[from] anyhow::Error),
}

/// Package database access used by the resolver.
pub trait PackageBackend {
    fn is_installed(&self, package: &str) -> Result<bool>;
    fn install(&self, package: &str) -> Result<()>;
}

/// Starts a desktop application without waiting for it.
pub trait AppLauncher {
    fn launch(&self, exec: &str) -> Result<()>;
}

/// Lets the user pick a candidate to install. `Ok(None)` means declined.
pub trait InstallPrompt {
    fn choose(&self, category: Category, candidates: &[Candidate]) -> Result<Option<usize>>;
}

/// Host package manager, detected at startup.
#[derive(Debug, Clone, Copy)]
pub struct SystemPackages {
    manager: Option<PackageManager>,
}

impl SystemPackages {
    pub fn detect() -> Self {
        Self {
            manager: PackageManager::detect(),
        }
    }

    pub fn manager(&self) -> Option<PackageManager> {
        self.manager
    }

    fn require_manager(&self) -> Result<PackageManager> {
        self.manager.context("No supported package manager found (looked for dpkg, pacman, rpm)")
    }
}

impl PackageBackend for SystemPackages {
    fn is_installed(&self, package: &str) -> Result<bool> {
        install::is_installed(self.require_manager()?, package)
    }

    fn install(&self, package: &str) -> Result<()> {
        install::install_package(self.require_manager()?, package)
    }
}

/// Launches desktop entries through `gtk-launch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GtkLauncher;

impl AppLauncher for GtkLauncher {
    fn launch(&self, exec: &str) -> Result<()> {
        Command::new("gtk-launch")
            .arg(exec)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start gtk-launch {}", exec))?;
        Ok(())
    }
}
