//! Output utilities for CLI commands
//!
//! Spinners for key scans, color helpers for trust states, and error
//! formatting for trust failures.

pub mod colors;
pub mod errors;
pub mod spinner;

pub use colors::{outcome_style, trust_style};
pub use errors::show_trust_error;
pub use spinner::CommandSpinner;
