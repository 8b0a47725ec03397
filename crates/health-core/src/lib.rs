//! Core types for health-log.
//!
//! Measurements and their fixed type set, plot styles with valid ranges,
//! summary statistics, report formatting, command-line settings and the
//! shared error type.

pub mod error;
pub mod formatting;
pub mod models;
pub mod plot_style;
pub mod settings;
pub mod statistics;

pub use error::{HealthLogError, Result};
