//! Console output shared by every command.
//!
//! Events print as colored text, or as one JSON object per line with
//! `--format json` so scripts can follow what happened.

use colored::*;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Debug => "debug",
        }
    }

    fn paint(self, s: &str) -> ColoredString {
        match self {
            Level::Info => s.normal(),
            Level::Success => s.green().bold(),
            Level::Warn => s.yellow().bold(),
            Level::Error => s.red().bold(),
            Level::Debug => s.cyan(),
        }
    }

    fn is_problem(self) -> bool {
        matches!(self, Level::Warn | Level::Error)
    }
}

#[derive(Debug, Clone, Copy)]
struct Console {
    format: OutputFormat,
    color: bool,
}

impl Console {
    const DEFAULT: Console = Console {
        format: OutputFormat::Text,
        color: true,
    };

    fn render(
        self,
        level: Level,
        code: &str,
        message: &str,
        data: Option<serde_json::Value>,
    ) -> String {
        match self.format {
            OutputFormat::Text if self.color => level.paint(message).to_string(),
            OutputFormat::Text => strip_ansi(message),
            OutputFormat::Json => render_json(level, code, message, data),
        }
    }
}

static CONSOLE: RwLock<Console> = RwLock::new(Console::DEFAULT);
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat, color: bool) {
    if let Ok(mut console) = CONSOLE.write() {
        *console = Console { format, color };
    }
    if !color {
        colored::control::set_override(false);
    }
}

pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

fn console() -> Console {
    CONSOLE
        .read()
        .map(|console| *console)
        .unwrap_or(Console::DEFAULT)
}

#[derive(Serialize)]
struct Event<'a> {
    level: &'a str,
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

fn strip_ansi(input: &str) -> String {
    // Drop CSI sequences such as \x1b[0m and \x1b[1;32m
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1b && i + 1 < bytes.len() && bytes[i + 1] == b'[' {
            i += 2;
            while i < bytes.len() {
                let b = bytes[i];
                i += 1;
                if (b'@'..=b'~').contains(&b) {
                    break;
                }
            }
            continue;
        }
        let ch = input[i..].chars().next().unwrap_or('\u{fffd}');
        out.push(ch);
        i += ch.len_utf8().max(1);
    }
    out
}

fn render_json(level: Level, code: &str, message: &str, data: Option<serde_json::Value>) -> String {
    let clean_msg = strip_ansi(message);
    let ev = Event {
        level: level.as_str(),
        code,
        message: &clean_msg,
        data,
    };
    serde_json::to_string(&ev).unwrap_or_else(|_| clean_msg.clone())
}

/// Print an event to the console.
///
/// Warnings and errors go to stderr. Debug events are dropped unless debug
/// mode is on.
pub fn emit(level: Level, code: &str, message: &str, data: Option<serde_json::Value>) {
    if level == Level::Debug && !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }
    let line = console().render(level, code, message, data);
    if level.is_problem() {
        let _ = writeln!(io::stderr(), "{}", line);
    } else {
        let _ = writeln!(io::stdout(), "{}", line);
    }
}

/// Horizontal rule between text sections; omitted in JSON mode.
pub fn separator() {
    if console().format == OutputFormat::Text {
        let _ = writeln!(io::stdout(), "{}", "─".repeat(60));
    }
}

pub mod prelude {
    pub use super::{Level, OutputFormat, emit, separator};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_color_codes() {
        let colored = "\x1b[1;32mdone\x1b[0m";
        assert_eq!(strip_ansi(colored), "done");
        assert_eq!(strip_ansi("plain ünïcode"), "plain ünïcode");
    }

    #[test]
    fn json_events_are_single_lines() {
        let line = render_json(Level::Warn, "test.code", "\x1b[33mcareful\x1b[0m", None);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["code"], "test.code");
        assert_eq!(parsed["message"], "careful");
        assert!(parsed.get("data").is_none());
    }

    #[test]
    fn plain_text_drops_color() {
        let console = Console {
            format: OutputFormat::Text,
            color: false,
        };
        let line = console.render(Level::Error, "test.code", "\x1b[31mboom\x1b[0m", None);
        assert_eq!(line, "boom");
    }
}
