use std::path::{Path, PathBuf};
use thiserror::Error;

/// All errors produced while loading and analysing health logs.
#[derive(Error, Debug)]
pub enum HealthLogError {
    /// An input file named on the command line does not exist.
    #[error("{given} was not found ({resolved})")]
    FileNotFound { given: PathBuf, resolved: PathBuf },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A measurement-type key outside the fixed set was supplied.
    #[error("Unrecognized measurement type: {0}")]
    UnknownMeasurementType(String),

    /// A month token matched none of the twelve month abbreviations.
    #[error("Unrecognized month: {0}")]
    InvalidMonth(String),

    /// A data line was matched before any day/month was seen.
    #[error("No day and month known for data line")]
    MissingDate,

    /// The resolved year/month/day is not a real calendar date.
    #[error("Invalid date: year {year}, month {month}, day {day}")]
    InvalidDate { year: String, month: String, day: String },

    /// A numeric slot could not be represented as a measurement value.
    #[error("Invalid measurement value: {0}")]
    InvalidValue(String),

    /// An error raised while parsing one line of an input file.
    #[error("{path}:{line}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: Box<HealthLogError>,
    },

    /// A data directory contained no `.data` files.
    #[error("No .data files found in {0}")]
    NoDataFiles(PathBuf),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl HealthLogError {
    /// A read failure on `path`, reported with the path made absolute.
    pub fn file_read(path: &Path, source: std::io::Error) -> Self {
        HealthLogError::FileRead {
            path: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
            source,
        }
    }

    /// Attach the file path and 1-based line number to a parse failure.
    pub fn at_line(self, path: impl Into<PathBuf>, line: usize) -> Self {
        HealthLogError::Parse {
            path: path.into(),
            line,
            source: Box::new(self),
        }
    }
}

/// Convenience alias used throughout the health-log crates.
pub type Result<T> = std::result::Result<T, HealthLogError>;
