use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::common::paths::AppPaths;
use crate::settings::{AUTOSTART, SettingsStore};

/// Installs or removes the welcome launcher in the user's autostart directory.
#[derive(Debug, Clone)]
pub struct AutolaunchManager {
    desktop_source: PathBuf,
    autostart_dir: PathBuf,
    descriptor: PathBuf,
}

impl AutolaunchManager {
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            desktop_source: paths.desktop_source.clone(),
            autostart_dir: paths.autostart_dir.clone(),
            descriptor: paths.autostart_file(),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.descriptor.is_file()
    }

    /// Record `enabled` under the `autostart` setting, then copy or remove the
    /// descriptor. Copying over an existing file and removing a missing one
    /// both succeed.
    pub fn set_autolaunch(&self, settings: &mut SettingsStore, enabled: bool) -> Result<()> {
        settings
            .set_bool(AUTOSTART, enabled)
            .context("Failed to save autostart setting")?;

        if enabled {
            self.install_descriptor()
        } else {
            self.remove_descriptor()
        }
    }

    fn install_descriptor(&self) -> Result<()> {
        fs::create_dir_all(&self.autostart_dir).with_context(|| {
            format!(
                "creating autostart directory at {}",
                self.autostart_dir.display()
            )
        })?;
        fs::copy(&self.desktop_source, &self.descriptor).with_context(|| {
            format!(
                "copying {} to {}",
                self.desktop_source.display(),
                self.descriptor.display()
            )
        })?;
        Ok(())
    }

    fn remove_descriptor(&self) -> Result<()> {
        match fs::remove_file(&self.descriptor) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.descriptor.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, AppPaths, SettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::under(dir.path());
        fs::create_dir_all(paths.desktop_source.parent().unwrap()).unwrap();
        fs::write(
            &paths.desktop_source,
            "[Desktop Entry]\nType=Application\nName=Radxa Welcome\nExec=radxa-welcome\n",
        )
        .unwrap();
        let store = SettingsStore::open(&paths.settings_file, &paths.settings_template).unwrap();
        (dir, paths, store)
    }

    #[test]
    fn test_enable_copies_descriptor() {
        let (_dir, paths, mut store) = setup();
        let manager = AutolaunchManager::new(&paths);

        manager.set_autolaunch(&mut store, true).unwrap();

        assert!(manager.is_installed());
        assert!(store.bool(AUTOSTART).unwrap());
        let copied = fs::read_to_string(paths.autostart_file()).unwrap();
        assert!(copied.contains("Exec=radxa-welcome"));
    }

    #[test]
    fn test_enable_then_disable_leaves_nothing_behind() {
        let (_dir, paths, mut store) = setup();
        let manager = AutolaunchManager::new(&paths);

        manager.set_autolaunch(&mut store, true).unwrap();
        manager.set_autolaunch(&mut store, false).unwrap();

        assert!(!store.bool(AUTOSTART).unwrap());
        assert!(!paths.autostart_file().exists());
    }

    #[test]
    fn test_repeated_toggles_are_idempotent() {
        let (_dir, paths, mut store) = setup();
        let manager = AutolaunchManager::new(&paths);

        manager.set_autolaunch(&mut store, false).unwrap();
        manager.set_autolaunch(&mut store, false).unwrap();
        manager.set_autolaunch(&mut store, true).unwrap();
        manager.set_autolaunch(&mut store, true).unwrap();

        assert!(manager.is_installed());
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let (_dir, paths, mut store) = setup();
        fs::remove_file(&paths.desktop_source).unwrap();
        let manager = AutolaunchManager::new(&paths);

        let err = manager.set_autolaunch(&mut store, true).unwrap_err();
        assert!(format!("{:#}", err).contains("copying"));
        // The preference is still recorded
        assert!(store.bool(AUTOSTART).unwrap());
    }
}
