use crate::config::Config;
use crate::constants::DEFAULT_APP_URL;
use chrono::{FixedOffset, NaiveDate};
use std::path::PathBuf;
use std::time::Duration;

/// Display and behaviour settings the screens read
#[derive(Debug, Clone)]
pub struct UiContext {
    pub timezone: FixedOffset,
    pub items_per_page: usize,
    pub toast_duration: Duration,
    pub downloads_dir: PathBuf,
    /// Link base sent with password reset emails
    pub app_url: String,
    pub session_check_interval: Duration,
    pub mouse_enabled: bool,
}

impl UiContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timezone: config.display.timezone(),
            items_per_page: config.ui.items_per_page,
            toast_duration: Duration::from_secs(config.ui.toast_seconds),
            downloads_dir: config.downloads.resolve_directory(),
            app_url: DEFAULT_APP_URL.to_string(),
            session_check_interval: Duration::from_secs(config.session.check_interval_secs.max(1)),
            mouse_enabled: config.ui.mouse_enabled,
        }
    }

    pub fn today(&self) -> NaiveDate {
        crate::utils::datetime::today_in(self.timezone)
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
