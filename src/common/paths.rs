use anyhow::{Context, Result};
use std::path::PathBuf;

/// Centralized path management for radxa-welcome

/// Desktop entry id shared by the launcher file and the autostart descriptor
pub const DESKTOP_FILE_NAME: &str = "com.radxa.welcome.desktop";

/// System-wide settings template installed by the package
pub const SYSTEM_SETTINGS_TEMPLATE: &str = "/usr/share/radxa-welcome/settings.json";

/// Packaged launcher that gets copied into the autostart directory
pub const SYSTEM_DESKTOP_FILE: &str = "/usr/share/applications/com.radxa.welcome.desktop";

/// Every filesystem location the application touches.
///
/// Built once from the user's XDG directories; tests construct it directly
/// against a temporary root.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub settings_file: PathBuf,
    pub settings_template: PathBuf,
    pub autostart_dir: PathBuf,
    pub desktop_source: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn detect() -> Result<Self> {
        let config_dir = dirs::config_dir().context("Unable to determine user config directory")?;
        let cache_dir = dirs::cache_dir().context("Unable to determine user cache directory")?;

        Ok(Self {
            settings_file: config_dir
                .join("radxa-welcome")
                .join("settings")
                .join("settings.json"),
            settings_template: PathBuf::from(SYSTEM_SETTINGS_TEMPLATE),
            autostart_dir: config_dir.join("autostart"),
            desktop_source: PathBuf::from(SYSTEM_DESKTOP_FILE),
            log_dir: cache_dir.join("welcome").join("logs"),
        })
    }

    /// Rooted under a single directory, mirroring the XDG layout
    #[cfg(test)]
    pub fn under(root: &std::path::Path) -> Self {
        let config_dir = root.join("config");
        Self {
            settings_file: config_dir
                .join("radxa-welcome")
                .join("settings")
                .join("settings.json"),
            settings_template: root.join("share").join("settings.json"),
            autostart_dir: config_dir.join("autostart"),
            desktop_source: root.join("share").join(DESKTOP_FILE_NAME),
            log_dir: root.join("cache").join("welcome").join("logs"),
        }
    }

    pub fn autostart_file(&self) -> PathBuf {
        self.autostart_dir.join(DESKTOP_FILE_NAME)
    }
}
