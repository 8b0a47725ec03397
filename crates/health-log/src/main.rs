mod bootstrap;

use anyhow::Result;
use health_core::settings::Settings;
use health_data::plot::build_plot;
use health_data::store::XAxis;
use health_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Health Log v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Data dir: {}, Year: {}, Theme: {}",
        settings.data_dir.display(),
        settings.default_year(),
        settings.theme
    );

    let store = bootstrap::build_store(&settings)?;

    if settings.list_data {
        for measurement in store.query(None, true) {
            println!("{}", measurement);
        }
    }

    for line in bootstrap::report_lines(&store) {
        println!("{}", line);
    }

    if settings.no_plot {
        return Ok(());
    }

    let axis = if settings.date_axis {
        XAxis::Date
    } else {
        XAxis::DayNumber
    };
    let plot = build_plot(&store, axis);
    if plot.is_empty() {
        tracing::warn!("No measurements to plot");
    }

    App::new(&settings.theme).run_chart(&plot)?;

    Ok(())
}
