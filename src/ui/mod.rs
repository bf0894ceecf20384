//! UI module for NovaBites
//!
//! This module handles the terminal interface: the sign-in form, the dashboard
//! menu, one screen per business area, toasts and the logs viewer.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;
pub mod screens;

pub use app_component::AppComponent;
pub use layout::LayoutManager;
pub use renderer::run_app;
