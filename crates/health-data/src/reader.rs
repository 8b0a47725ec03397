//! Input file discovery and loading.
//!
//! Finds `.data` log files, streams each one through the line parser with a
//! fresh [`DateContext`], and collects the results into a
//! [`MeasurementStore`].

use std::io::BufRead;
use std::path::{Path, PathBuf};

use health_core::error::{HealthLogError, Result};
use health_core::formatting::format_input_line;
use health_core::models::Measurement;
use tracing::{debug, info, warn};

use crate::parser::{parse_line, DateContext};
use crate::store::MeasurementStore;

/// Extension of health log files.
pub const DATA_EXTENSION: &str = "data";

/// Options shared by every file of one run.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Year assumed until a file names one.
    pub default_year: String,
    /// Log each raw input line at info level.
    pub list_input: bool,
}

impl ReadOptions {
    pub fn new(default_year: impl Into<String>) -> Self {
        Self {
            default_year: default_year.into(),
            list_input: false,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find the `.data` files directly inside `data_dir`, sorted by path.
pub fn find_data_files(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.exists() {
        warn!("Data directory does not exist: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == DATA_EXTENSION)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Decide which files to read.
///
/// Explicit `files` are used in the order given, relative ones joined onto
/// `data_dir`; each must exist. With no explicit files, every `.data` file in
/// `data_dir` is used.
pub fn resolve_input_files(files: &[PathBuf], data_dir: &Path) -> Result<Vec<PathBuf>> {
    if files.is_empty() {
        let found = find_data_files(data_dir);
        if found.is_empty() {
            return Err(HealthLogError::NoDataFiles(data_dir.to_path_buf()));
        }
        return Ok(found);
    }

    files
        .iter()
        .map(|file| {
            let path = if file.is_absolute() {
                file.clone()
            } else {
                data_dir.join(file)
            };
            if path.exists() {
                Ok(path)
            } else {
                let resolved = std::path::absolute(&path).unwrap_or_else(|_| path.clone());
                Err(HealthLogError::FileNotFound {
                    given: path,
                    resolved,
                })
            }
        })
        .collect()
}

/// Parse lines from `reader`, a file named `name`, with a fresh date context.
pub fn parse_reader<R: BufRead>(
    reader: R,
    name: &Path,
    options: &ReadOptions,
) -> Result<Vec<Measurement>> {
    let base_name = name
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.display().to_string());

    let mut ctx = DateContext::new(options.default_year.clone());
    let mut measurements = Vec::new();
    let mut lines_read = 0usize;

    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|source| HealthLogError::file_read(name, source))?;
        let line_no = index + 1;
        lines_read = line_no;
        if options.list_input {
            info!("{}", format_input_line(&base_name, line_no, &line));
        }
        let found = parse_line(&line, &mut ctx).map_err(|e| e.at_line(name, line_no))?;
        for m in &found {
            debug!("Measurement: type {} value {} date {}", m.mtype, m.value, m.date);
        }
        measurements.extend(found);
    }

    debug!(
        "File {}: {} lines, {} measurements",
        name.display(),
        lines_read,
        measurements.len()
    );
    Ok(measurements)
}

/// Parse in-memory text as if it were one file.
pub fn parse_str(text: &str, options: &ReadOptions) -> Result<Vec<Measurement>> {
    parse_reader(text.as_bytes(), Path::new("<text>"), options)
}

/// Open and parse one file. The file is closed before returning, on success
/// or error.
pub fn parse_file(path: &Path, options: &ReadOptions) -> Result<Vec<Measurement>> {
    let file =
        std::fs::File::open(path).map_err(|source| HealthLogError::file_read(path, source))?;
    parse_reader(std::io::BufReader::new(file), path, options)
}

/// Parse every file in order into `store`. Returns the number of
/// measurements added.
pub fn load_files(
    paths: &[PathBuf],
    options: &ReadOptions,
    store: &mut MeasurementStore,
) -> Result<usize> {
    let mut added = 0;
    for path in paths {
        let measurements = parse_file(path, options)?;
        added += measurements.len();
        store.extend(measurements);
    }
    debug!("Loaded {} measurements from {} files", added, paths.len());
    Ok(added)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
