use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{
    fs, io,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Template used when the package did not install one system-wide
const BUILTIN_TEMPLATE: &str = include_str!("../../data/settings.json");

/// Key written by older releases; migrated to `first_run` on open
const LEGACY_FIRST_RUN_KEY: &str = "fist_run";

pub const AUTOSTART: BoolSettingKey = BoolSettingKey::new("autostart", true);
pub const FIRST_RUN: BoolSettingKey = BoolSettingKey::new("first_run", true);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("creating settings directory at {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("You do not have permission to write to {0}")]
    NotWritable(PathBuf),

    #[error("reading settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("writing settings file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("parsing settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("serializing settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("settings file {0} does not contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("setting '{key}' has an unexpected type: {source}")]
    Type {
        key: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct BoolSettingKey {
    pub key: &'static str,
    pub default: bool,
}

impl BoolSettingKey {
    pub const fn new(key: &'static str, default: bool) -> Self {
        Self { key, default }
    }
}

/// JSON-backed settings record with write-through persistence.
///
/// Reads of a missing key store the supplied default, so every later read
/// observes the same value.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    data: Map<String, Value>,
}

impl SettingsStore {
    /// Open the record at `path`, creating it from `template` (or the builtin
    /// template when `template` does not exist) on first use.
    pub fn open(path: &Path, template: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            create_settings_file(path, template)?;
        }

        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let Value::Object(data) = value else {
            return Err(SettingsError::NotAnObject(path.to_path_buf()));
        };

        let mut store = Self {
            path: path.to_path_buf(),
            data,
        };
        store.migrate_legacy_keys()?;
        Ok(store)
    }

    fn migrate_legacy_keys(&mut self) -> Result<(), SettingsError> {
        if self.data.contains_key(FIRST_RUN.key) {
            return Ok(());
        }
        if let Some(value) = self.data.remove(LEGACY_FIRST_RUN_KEY) {
            self.data.insert(FIRST_RUN.key.to_string(), value);
            self.save()?;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let contents = serde_json::to_string_pretty(&Value::Object(self.data.clone()))
            .map_err(|source| SettingsError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, contents + "\n").map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Raw lookup; stores and persists `default` when `key` is missing.
    pub fn get_value(&mut self, key: &str, default: Value) -> Result<Value, SettingsError> {
        if let Some(value) = self.data.get(key) {
            return Ok(value.clone());
        }
        self.data.insert(key.to_string(), default.clone());
        self.save()?;
        Ok(default)
    }

    pub fn get<T>(&mut self, key: &str, default: T) -> Result<T, SettingsError>
    where
        T: Serialize + DeserializeOwned,
    {
        let default = serde_json::to_value(default).map_err(|source| SettingsError::Type {
            key: key.to_string(),
            source,
        })?;
        let value = self.get_value(key, default)?;
        serde_json::from_value(value).map_err(|source| SettingsError::Type {
            key: key.to_string(),
            source,
        })
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), SettingsError> {
        let value = serde_json::to_value(value).map_err(|source| SettingsError::Type {
            key: key.to_string(),
            source,
        })?;
        self.data.insert(key.to_string(), value);
        self.save()
    }

    pub fn bool(&mut self, key: BoolSettingKey) -> Result<bool, SettingsError> {
        self.get(key.key, key.default)
    }

    pub fn set_bool(&mut self, key: BoolSettingKey, value: bool) -> Result<(), SettingsError> {
        self.set(key.key, value)
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn create_settings_file(path: &Path, template: &Path) -> Result<(), SettingsError> {
    let Some(dir) = path.parent() else {
        return Err(SettingsError::NotWritable(path.to_path_buf()));
    };
    fs::create_dir_all(dir).map_err(|source| SettingsError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).map_err(|source| {
        SettingsError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }
    })?;

    let writable = fs::metadata(dir)
        .map(|meta| meta.is_dir() && !meta.permissions().readonly())
        .unwrap_or(false);
    if !writable {
        return Err(SettingsError::NotWritable(dir.to_path_buf()));
    }

    if template.is_file() {
        fs::copy(template, path).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    } else {
        fs::write(path, BUILTIN_TEMPLATE).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::set_permissions(path, fs::Permissions::from_mode(0o666)).map_err(|source| {
        SettingsError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
