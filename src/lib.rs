//! NovaBites - A terminal point-of-sale client for the NovaBites bakery API
//!
//! This library provides the store-side workflows of the bakery chain: sales
//! with cash or transfer payment, custom orders, bills, inventory requests
//! (restock, return, relocation) and the end-of-day cash closing. Every
//! operation goes through the remote REST API; the terminal UI is built with
//! Ratatui.
//!
//! # Modules
//!
//! * [`api`] - REST client and the [`api::PosBackend`] trait
//! * [`config`] - Application configuration management
//! * [`session`] - Bearer token decoding, persistence and expiry
//! * [`sales`], [`orders`], [`inventory`], [`closing`], [`profile`] - Business workflows
//! * [`table`], [`filter`] - Table configuration and column filters
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Date and money helpers

/// REST client for the NovaBites backend
pub mod api;

/// Sign-in and password reset forms
pub mod auth;

/// Daily report, expenses and cash closing
pub mod closing;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and user-facing messages
pub mod constants;

/// Text and date filters for table columns
pub mod filter;

/// Stock restock, return and relocation requests
pub mod inventory;

/// Logging setup and the in-memory log buffer
pub mod logger;

/// Wire models shared with the backend
pub mod models;

/// Toasts and user-facing validation errors
pub mod notify;

/// Custom orders and bills
pub mod orders;

/// Signed-in user profile
pub mod profile;

/// Point-of-sale cart, catalog and payment
pub mod sales;

/// Session token handling
pub mod session;

/// Paginated table configuration
pub mod table;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling and money
pub mod utils;
