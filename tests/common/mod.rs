use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    /// JSON events printed with `--format json`, from both streams
    pub fn events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .chain(self.stderr.lines())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn event(&self, code: &str) -> Option<Value> {
        self.events().into_iter().find(|ev| ev["code"] == code)
    }
}

/// Isolated HOME with XDG config and cache directories inside a temp dir
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.path().join("cache")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir()
            .join("radxa-welcome")
            .join("settings")
            .join("settings.json")
    }

    pub fn read_settings(&self) -> Result<Value> {
        let contents = std::fs::read_to_string(self.settings_file())?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_radxa-welcome"))
            .args(["--format", "json", "--no-color"])
            .args(args)
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.config_dir())
            .env("XDG_CACHE_HOME", self.cache_dir())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
