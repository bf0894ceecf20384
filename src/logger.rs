//! Application logging
//!
//! Records emitted through the `log` macros go to an in-memory buffer shown by
//! the logs viewer (`G`) and, when enabled in the config, to a log file.

use crate::config::{Config, LoggingConfig};
use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Entries kept in memory before the oldest are dropped
const MAX_MEMORY_ENTRIES: usize = 2000;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    enabled: bool,
    level: log::LevelFilter,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Memory-only logger
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            enabled: false,
            level: log::LevelFilter::Info,
            log_file: None,
        }
    }

    /// Build a logger from the `[logging]` config section.
    ///
    /// When file logging is enabled the parent directory of the log file is
    /// created up front so `install` cannot fail on a missing folder.
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let mut logger = Self::new();
        logger.level = config.level_filter();

        if config.enabled {
            let path = match &config.file {
                Some(path) => path.clone(),
                None => Self::get_log_file_path()?,
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            logger.enabled = true;
            logger.log_file = Some(path);
        }

        Ok(logger)
    }

    /// Install this logger as the global `log` backend
    pub fn install(&self) -> Result<()> {
        let memory = self.logs.clone();
        let memory_sink = fern::Dispatch::new().chain(fern::Output::call(move |record| {
            let line = format!(
                "[{}] {:<5} {}",
                Utc::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            );
            push_bounded(&memory, line);
        }));

        let mut dispatch = fern::Dispatch::new()
            .level(self.level)
            .level_for("hyper", log::LevelFilter::Warn)
            .level_for("hyper_util", log::LevelFilter::Warn)
            .level_for("reqwest", log::LevelFilter::Warn)
            .level_for("rustls", log::LevelFilter::Warn)
            .chain(memory_sink);

        if let Some(path) = &self.log_file {
            let file = fern::log_file(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "{} {:<5} [{}] {}",
                            Utc::now().to_rfc3339(),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }

        dispatch.apply().context("Failed to install logger")?;
        Ok(())
    }

    /// Add a log entry directly to the in-memory buffer
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        push_bounded(&self.logs, format!("[{}] {}", timestamp, message));
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Default log file location
    pub fn get_log_file_path() -> Result<PathBuf> {
        Ok(Config::get_data_dir()?.join("novabites.log"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(logs: &Arc<Mutex<VecDeque<String>>>, line: String) {
    if let Ok(mut logs) = logs.lock() {
        if logs.len() >= MAX_MEMORY_ENTRIES {
            logs.pop_front();
        }
        logs.push_back(line);
    }
}
