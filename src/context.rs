use anyhow::{Context, Result};
use std::sync::Arc;

use crate::apps::{
    AppLauncher, AppResolver, GtkLauncher, InstallPrompt, PackageBackend, Resolution, ResolveError,
    SystemPackages,
};
use crate::autostart::AutolaunchManager;
use crate::common::AppPaths;
use crate::links::{self, Link};
use crate::logging::Logger;
use crate::settings::{AUTOSTART, FIRST_RUN, SettingsStore};

/// Everything the handlers need, created once at startup in a fixed order:
/// logger, settings, autolaunch manager, resolver.
pub struct AppContext<P = SystemPackages, L = GtkLauncher> {
    pub logger: Arc<Logger>,
    pub settings: SettingsStore,
    pub autolaunch: AutolaunchManager,
    pub resolver: AppResolver<P, L>,
}

impl AppContext {
    /// Production context for the current user.
    ///
    /// Errors here are startup faults; the caller is expected to exit.
    pub fn init() -> Result<Self> {
        let paths = AppPaths::detect()?;
        let logger = Arc::new(Logger::open(&paths.log_dir)?);
        if let Some(path) = logger.path() {
            logger.debug("startup.log", &format!("Logging to: {}", path.display()));
        }
        let packages = SystemPackages::detect();
        match packages.manager() {
            Some(manager) => logger.debug("startup.packages", &format!("Using {}", manager)),
            None => logger.warn(
                "startup.packages",
                "No supported package manager found; app installs are unavailable",
            ),
        }
        Self::with_parts(paths, logger, packages, GtkLauncher)
    }
}

impl<P: PackageBackend, L: AppLauncher> AppContext<P, L> {
    pub fn with_parts(
        paths: AppPaths,
        logger: Arc<Logger>,
        packages: P,
        launcher: L,
    ) -> Result<Self> {
        logger.debug(
            "startup.settings",
            &format!("Settings file: {}", paths.settings_file.display()),
        );
        let settings = SettingsStore::open(&paths.settings_file, &paths.settings_template)
            .context("Failed to load settings")?;
        logger.info("startup.settings", "Settings loaded.");

        Ok(Self {
            autolaunch: AutolaunchManager::new(&paths),
            resolver: AppResolver::new(packages, launcher, Arc::clone(&logger)),
            logger,
            settings,
        })
    }

    pub fn autostart_enabled(&mut self) -> Result<bool> {
        Ok(self.settings.bool(AUTOSTART)?)
    }

    pub fn is_first_run(&mut self) -> Result<bool> {
        Ok(self.settings.bool(FIRST_RUN)?)
    }

    pub fn set_autolaunch(&mut self, enabled: bool) -> Result<()> {
        self.autolaunch.set_autolaunch(&mut self.settings, enabled)?;
        self.logger.info(
            "autostart.changed",
            &format!("Autolaunch setting changed to {}", enabled),
        );
        Ok(())
    }

    /// Leave the welcome page: apply the chosen autostart state and
    /// remember that the first run is over.
    ///
    /// `first_run` is cleared even if the autostart descriptor could not be
    /// copied or removed; that error is returned afterwards.
    pub fn finish_first_run(&mut self, autostart: bool) -> Result<()> {
        let autolaunch = self.set_autolaunch(autostart);
        self.settings.set_bool(FIRST_RUN, false)?;
        autolaunch
    }

    pub fn resolve_and_launch(
        &self,
        category: &str,
        prompt: &dyn InstallPrompt,
    ) -> Result<Resolution, ResolveError> {
        self.resolver.resolve_and_launch(category, prompt)
    }

    pub fn open_link(&self, link: Link) -> Result<()> {
        let locale = links::current_locale();
        let url = link.url(locale.as_deref());
        self.logger.debug("links.open", &format!("Opening {}", url));
        links::open_url(url)
    }
}
