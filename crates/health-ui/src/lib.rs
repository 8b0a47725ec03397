//! Terminal UI layer for health-log.
//!
//! Provides themes, the measurement chart view, and the application event
//! loop built on top of [`ratatui`] for plotting measurements in the terminal.

pub mod app;
pub mod chart_view;
pub mod themes;

pub use health_core as core;
