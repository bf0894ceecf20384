//! Core UI building blocks.
//!
//! - [`actions`] - Action definitions and the screen list
//! - [`component`] - Base component trait
//! - [`context`] - Display settings shared by the screens
//! - [`event_handler`] - Terminal event polling
//! - [`task_manager`] - Background API calls reporting back as actions
//!
//! Components turn key events into [`Action`]s. The app component executes
//! request actions on the [`TaskManager`], whose results come back through an
//! unbounded channel and are offered to every screen via [`Component::update`].

pub mod actions;
pub mod component;
pub mod context;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, Screen};
pub use component::Component;
pub use context::UiContext;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager, TaskResult};
