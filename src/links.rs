//! Outbound community links.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Link {
    Website,
    Forums,
    Docs,
    /// Community chat invite
    Community,
}

impl Link {
    pub const ALL: [Link; 4] = [Link::Website, Link::Forums, Link::Docs, Link::Community];

    /// Target for the given locale name (e.g. `zh_CN`).
    pub fn url(self, locale: Option<&str>) -> &'static str {
        match self {
            Link::Website => "https://radxa.com/",
            Link::Forums => "https://forum.radxa.com/",
            Link::Docs if locale == Some("zh_CN") => "https://docs.radxa.com/",
            Link::Docs => "https://docs.radxa.com/en/",
            Link::Community => "https://rock.sh/go",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Link::Website => "Website",
            Link::Forums => "Forums",
            Link::Docs => "Documentation",
            Link::Community => "Community chat",
        }
    }
}

/// Language part of the current locale, without encoding or modifier.
///
/// Checks LC_ALL, LC_MESSAGES, then LANG, like the C library does.
pub fn current_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| normalize_locale(&value))
}

fn normalize_locale(raw: &str) -> Option<String> {
    let name = raw.split(['.', '@']).next().unwrap_or_default();
    match name {
        "" | "C" | "POSIX" => None,
        other => Some(other.to_string()),
    }
}

/// Open `url` in the default browser without waiting for it.
pub fn open_url(url: &str) -> Result<()> {
    spawn_detached("xdg-open", url)
        .or_else(|_| spawn_detached("firefox", url))
        .or_else(|_| spawn_detached("chromium", url))
        .with_context(|| format!("Failed to open {}", url))
}

fn spawn_detached(program: &str, url: &str) -> Result<()> {
    Command::new(program)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch {}", program))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_docs_follow_locale() {
        assert_eq!(Link::Docs.url(Some("zh_CN")), "https://docs.radxa.com/");
        assert_eq!(Link::Docs.url(Some("en_US")), "https://docs.radxa.com/en/");
        assert_eq!(Link::Docs.url(None), "https://docs.radxa.com/en/");
        assert_eq!(Link::Website.url(Some("zh_CN")), "https://radxa.com/");
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("zh_CN.UTF-8").as_deref(), Some("zh_CN"));
        assert_eq!(normalize_locale("de_DE@euro").as_deref(), Some("de_DE"));
        assert_eq!(normalize_locale("C.UTF-8"), None);
        assert_eq!(normalize_locale("POSIX"), None);
    }

    #[test]
    #[serial]
    fn test_current_locale_precedence() {
        // SAFETY: serialized with every other env-mutating test
        unsafe {
            std::env::set_var("LC_ALL", "");
            std::env::set_var("LC_MESSAGES", "zh_CN.UTF-8");
            std::env::set_var("LANG", "en_US.UTF-8");
        }
        assert_eq!(current_locale().as_deref(), Some("zh_CN"));

        unsafe {
            std::env::remove_var("LC_MESSAGES");
        }
        assert_eq!(current_locale().as_deref(), Some("en_US"));

        unsafe {
            std::env::remove_var("LC_ALL");
            std::env::remove_var("LANG");
        }
        assert_eq!(current_locale(), None);
    }
}
