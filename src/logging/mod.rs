// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging infrastructure using the `tracing` ecosystem.
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!    |       |
//!    v       v
//! Console   File (optional)
//! EnvFilter EnvFilter
//! ANSI      non_blocking
//!        |
//!        v
//!    LogGuard (flush on drop)
//! ```
//!
//! The crate itself only emits `debug!`/`trace!` events; embedding tools
//! call [`init_logging`] once (or install their own subscriber) to see them.

use anyhow::Context;
use bon::Builder;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::Result;

/// Configuration for the logging system.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    /// Filter directive for console output, e.g. `"info"` or
    /// `"envscript=trace"`.
    #[builder(setters(name = with_console_filter), default = "info".to_string())]
    console_filter: String,
    /// Filter directive for file output.
    #[builder(setters(name = with_file_filter), default = "trace".to_string())]
    file_filter: String,
    #[builder(setters(name = with_log_file))]
    log_file: Option<PathBuf>,
    #[builder(setters(name = with_show_target), default = false)]
    show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub fn console_filter(&self) -> &str {
        &self.console_filter
    }

    #[must_use]
    pub fn file_filter(&self) -> &str {
        &self.file_filter
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.show_target
    }
}

/// RAII guard that keeps the logging system alive.
/// When dropped, flushes all pending log writes.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system with the given configuration.
///
/// Returns a guard that must be kept alive for the duration of the program;
/// dropping it flushes pending file writes.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console_layer = fmt::layer()
        .with_target(config.show_target())
        .with_level(true)
        .with_ansi(true)
        .with_filter(EnvFilter::new(config.console_filter()));

    let (file_layer, file_guard) = if let Some(log_path) = config.log_file() {
        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }

        let file = std::fs::File::create(log_path)
            .with_context(|| format!("failed to create log file {}", log_path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_filter(EnvFilter::new(config.file_filter()));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}
