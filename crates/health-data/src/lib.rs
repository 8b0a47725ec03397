//! Data ingestion layer for health-log.
//!
//! Responsible for discovering and reading `.data` log files, parsing their
//! lines into measurements, storing and querying those measurements, and
//! shaping them into plot series.

pub mod parser;
pub mod plot;
pub mod reader;
pub mod store;

pub use health_core as core;
