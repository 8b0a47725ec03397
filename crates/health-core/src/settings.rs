use chrono::Datelike;
use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Blood sugar, blood pressure and pulse log statistics and plots
#[derive(Parser, Debug, Clone)]
#[command(
    name = "health-log",
    about = "Blood sugar, blood pressure and pulse log statistics and plots",
    version
)]
pub struct Settings {
    /// Input files; relative paths are resolved against --data-dir
    pub files: Vec<PathBuf>,

    /// Directory scanned for *.data files when no files are given
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Year assumed until a file names one (defaults to the current year)
    #[arg(long)]
    pub year: Option<u16>,

    /// Plot against dates (true) or day numbers (false)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub date_axis: bool,

    /// JSON file with plot style overrides
    #[arg(long)]
    pub styles: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Print statistics only, do not draw the chart
    #[arg(long)]
    pub no_plot: bool,

    /// Log every input line as it is read
    #[arg(long)]
    pub list_input: bool,

    /// Print every parsed measurement
    #[arg(long)]
    pub list_data: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` flag.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Seed year for the parser context, as the string the parser carries.
    pub fn default_year(&self) -> String {
        self.year
            .map(i32::from)
            .unwrap_or_else(|| chrono::Local::now().year())
            .to_string()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
