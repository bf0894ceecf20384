//! Utility modules for the NovaBites client.
//!
//! - [`datetime`] - App-timezone date helpers and Spanish date formatting
//! - [`money`] - Colombian peso formatting and lenient amount parsing

pub mod datetime;
pub mod money;
