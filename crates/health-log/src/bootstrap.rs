use std::path::PathBuf;

use health_core::formatting::{format_day_count, format_statistics};
use health_core::plot_style::PlotStyles;
use health_core::settings::Settings;
use health_data::reader::{load_files, resolve_input_files, ReadOptions};
use health_data::store::MeasurementStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

/// Map the CLI level names onto `tracing` level names.
fn filter_directive(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

// ── Store bootstrap ────────────────────────────────────────────────────────────

/// Built-in plot styles with the `--styles` overrides applied.
pub fn load_styles(styles: Option<&PathBuf>) -> anyhow::Result<PlotStyles> {
    let mut registry = PlotStyles::builtin();
    if let Some(path) = styles {
        registry.load_overrides(path)?;
        tracing::info!("Applied plot style overrides from {}", path.display());
    }
    Ok(registry)
}

/// Resolve the input files and parse them, in order, into a fresh store.
pub fn build_store(settings: &Settings) -> anyhow::Result<MeasurementStore> {
    let styles = load_styles(settings.styles.as_ref())?;
    let mut store = MeasurementStore::with_styles(styles);

    let files = resolve_input_files(&settings.files, &settings.data_dir)?;
    let options = ReadOptions {
        default_year: settings.default_year(),
        list_input: settings.list_input,
    };
    let added = load_files(&files, &options, &mut store)?;
    tracing::info!("Read {} measurements from {} files", added, files.len());

    Ok(store)
}

// ── Report ─────────────────────────────────────────────────────────────────────

/// Day count followed by one statistics line per type present.
pub fn report_lines(store: &MeasurementStore) -> Vec<String> {
    std::iter::once(format_day_count(store.distinct_day_count()))
        .chain(store.all_statistics().iter().map(format_statistics))
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use health_core::models::MeasurementType;
    use health_core::HealthLogError;
    use std::path::Path;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write file");
        path
    }

    fn settings_for(dir: &Path, extra: &[&str]) -> Settings {
        let data_dir = dir.to_string_lossy().to_string();
        let mut args = vec!["health-log", "--data-dir", data_dir.as_str(), "--year", "2020"];
        args.extend_from_slice(extra);
        Settings::load_from_args(args)
    }

    // ── filter_directive ──────────────────────────────────────────────────────

    #[test]
    fn test_filter_directive_maps_level_names() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("info"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("trace"), "trace");
    }

    // ── build_store ───────────────────────────────────────────────────────────

    #[test]
    fn test_build_store_scans_data_dir() {
        let tmp = TempDir::new().expect("tempdir");
        write_file(tmp.path(), "a.data", "1 Jul 100 120\n");
        write_file(tmp.path(), "b.data", "16 Sep 145/95/80\n");
        write_file(tmp.path(), "notes.txt", "2 Jul 999 999\n");

        let store = build_store(&settings_for(tmp.path(), &[])).expect("build store");
        assert_eq!(store.len(), 5);
        assert_eq!(store.distinct_day_count(), 2);
        assert_eq!(store.values(Some(&[MeasurementType::Pulse]), false), vec![80]);
    }

    #[test]
    fn test_build_store_explicit_file_relative_to_data_dir() {
        let tmp = TempDir::new().expect("tempdir");
        write_file(tmp.path(), "a.data", "1 Jul 100 120\n");
        write_file(tmp.path(), "b.data", "2 Jul 90 110\n");

        let store = build_store(&settings_for(tmp.path(), &["b.data"])).expect("build store");
        assert_eq!(store.len(), 2);
        assert_eq!(store.values(None, true), vec![90, 110]);
    }

    #[test]
    fn test_build_store_missing_file_is_config_error() {
        let tmp = TempDir::new().expect("tempdir");
        let err = build_store(&settings_for(tmp.path(), &["missing.data"]))
            .expect_err("missing file must fail");
        match err.downcast_ref::<HealthLogError>() {
            Some(HealthLogError::FileNotFound { given, resolved }) => {
                assert_eq!(given, &tmp.path().join("missing.data"));
                assert!(resolved.is_absolute());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_build_store_applies_style_overrides() {
        let tmp = TempDir::new().expect("tempdir");
        write_file(tmp.path(), "a.data", "1 Jul 100 120\n");
        let styles = write_file(tmp.path(), "styles.json", r#"{"sg_m": {"high": 95}}"#);
        let styles_arg = styles.to_string_lossy().to_string();

        let store = build_store(&settings_for(tmp.path(), &["--styles", styles_arg.as_str()]))
            .expect("build store");
        assert_eq!(store.styles().high(MeasurementType::MorningSugar), Some(95));
        assert_eq!(store.styles().low(MeasurementType::MorningSugar), Some(80));
    }

    // ── report_lines ──────────────────────────────────────────────────────────

    #[test]
    fn test_report_lines() {
        let tmp = TempDir::new().expect("tempdir");
        write_file(tmp.path(), "a.data", "1 Jul 100 120\n2 Jul 80 ?\n");

        let store = build_store(&settings_for(tmp.path(), &[])).expect("build store");
        let lines = report_lines(&store);
        assert_eq!(lines[0], "Number of days: 2");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("sg_m   low:  80   high: 100"));
        assert!(lines[2].starts_with("sg_e   low: 120   high: 120"));
    }
}
