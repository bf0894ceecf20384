//! Transient toast notifications and the validation error they surface.

use crate::api::ApiError;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description,
            shown_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title, Some(description.into()))
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title, Some(description.into()))
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title, Some(description.into()))
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.duration
    }
}

/// Stack of active toasts, newest last
#[derive(Debug, Clone)]
pub struct Toasts {
    items: Vec<Toast>,
    default_duration: Duration,
}

impl Toasts {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            items: Vec::new(),
            default_duration,
        }
    }

    /// Show a toast. Toasts keep their own duration when it exceeds the default.
    pub fn push(&mut self, mut toast: Toast) {
        match toast.kind {
            ToastKind::Error => log::warn!("{}: {}", toast.title, toast.description.as_deref().unwrap_or("")),
            _ => log::info!("{}: {}", toast.title, toast.description.as_deref().unwrap_or("")),
        }
        toast.duration = toast.duration.max(self.default_duration);
        toast.shown_at = Instant::now();
        self.items.push(toast);
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|toast| !toast.is_expired(now));
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

/// User-facing validation failure, shaped like an error toast
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{title}: {description}")]
pub struct ValidationError {
    pub title: String,
    pub description: String,
    /// Set when the failure came from a 401; the caller must log out
    pub session_expired: bool,
}

impl ValidationError {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            session_expired: false,
        }
    }

    /// Wrap an API failure under a toast title
    pub fn api(title: impl Into<String>, err: &ApiError) -> Self {
        Self {
            title: title.into(),
            description: err.to_string(),
            session_expired: err.is_unauthorized(),
        }
    }

    pub fn to_toast(&self) -> Toast {
        Toast::error(self.title.clone(), self.description.clone())
    }
}
