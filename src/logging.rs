//! Per-run log file plus console output.
//!
//! Every record lands in a timestamped file through a `tracing` subscriber
//! owned by the [`Logger`]. The console side goes through
//! [`crate::ui::emit`] so it honours `--format` and `--debug`.

use anyhow::{Context, Result, bail};
use chrono::Local;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Dispatch, Event, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::Registry;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use crate::ui::prelude::*;

/// `2024-05-01 12:00:00 [    INFO] Settings loaded.`
struct RecordFormat;

impl<S, N> FormatEvent<S, N> for RecordFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = event.metadata().level().to_string();
        write!(
            writer,
            "{} [{:>8}] ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[derive(Debug)]
pub struct Logger {
    path: Option<PathBuf>,
    file: Option<Dispatch>,
}

impl Logger {
    /// Create `log_dir` and open a fresh timestamped log file inside it.
    pub fn open(log_dir: &Path) -> Result<Self> {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("creating log directory at {}", log_dir.display()))?;
        if !log_dir.is_dir() {
            bail!("The directory {} does not exist", log_dir.display());
        }
        let meta = fs::metadata(log_dir)
            .with_context(|| format!("reading metadata of {}", log_dir.display()))?;
        if meta.permissions().readonly() {
            bail!(
                "You do not have permission to write to {}",
                log_dir.display()
            );
        }

        let name = Local::now()
            .format("radxa-welcome-%Y-%m-%d-%H-%M-%S.log")
            .to_string();
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(name.as_str())
            .build(log_dir)
            .with_context(|| format!("opening log file {} in {}", name, log_dir.display()))?;

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .event_format(RecordFormat);

        Ok(Self {
            path: Some(log_dir.join(name)),
            file: Some(Dispatch::new(Registry::default().with(layer))),
        })
    }

    /// Console-only logger
    #[cfg(test)]
    pub fn console() -> Self {
        Self {
            path: None,
            file: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn log(&self, level: Level, code: &str, message: &str) {
        if let Some(dispatch) = &self.file {
            tracing::dispatcher::with_default(dispatch, || match level {
                Level::Debug => tracing::debug!("{}", message),
                Level::Info | Level::Success => tracing::info!("{}", message),
                Level::Warn => tracing::warn!("{}", message),
                Level::Error => tracing::error!("{}", message),
            });
        }
        emit(level, code, message, None);
    }

    pub fn debug(&self, code: &str, message: &str) {
        self.log(Level::Debug, code, message);
    }

    pub fn info(&self, code: &str, message: &str) {
        self.log(Level::Info, code, message);
    }

    pub fn warn(&self, code: &str, message: &str) {
        self.log(Level::Warn, code, message);
    }

    pub fn error(&self, code: &str, message: &str) {
        self.log(Level::Error, code, message);
    }
}
