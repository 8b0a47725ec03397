//! Plot-ready series built from a [`MeasurementStore`].
//!
//! Nothing here draws; the UI layer turns a [`PlotData`] into a chart.

use health_core::models::MeasurementType;
use health_core::plot_style::MarkerStyle;

use crate::store::{AxisValue, MeasurementStore, XAxis};

/// Vertical axis title.
pub const VERTICAL_LABEL: &str = "Measurements";

impl XAxis {
    /// Horizontal axis title.
    pub fn label(self) -> &'static str {
        match self {
            XAxis::Date => "Measurement Date",
            XAxis::DayNumber => "Day Number",
        }
    }
}

/// Points drawn with one marker style.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    pub style: MarkerStyle,
    pub points: Vec<(f64, f64)>,
}

/// Horizontal line at a range bound, spanning the series' x extent.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub bound: u32,
    pub points: [(f64, f64); 2],
}

/// Everything needed to draw one measurement type.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub mtype: MeasurementType,
    pub in_range: PointSet,
    /// Present only when the type has at least one bound.
    pub out_of_range: Option<PointSet>,
    pub reference_lines: Vec<ReferenceLine>,
}

impl PlotSeries {
    fn all_points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.in_range
            .points
            .iter()
            .chain(self.out_of_range.iter().flat_map(|s| s.points.iter()))
            .chain(self.reference_lines.iter().flat_map(|l| l.points.iter()))
    }
}

/// A full chart: axis titles plus one series per type present.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub axis: XAxis,
    pub horizontal_label: String,
    pub vertical_label: String,
    pub series: Vec<PlotSeries>,
}

impl PlotData {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.all_points().next().is_none())
    }

    /// `[min, max]` over every x coordinate, `None` when there are no points.
    pub fn x_bounds(&self) -> Option<[f64; 2]> {
        bounds(self.series.iter().flat_map(|s| s.all_points()).map(|p| p.0))
    }

    /// `[min, max]` over every y coordinate, reference lines included.
    pub fn y_bounds(&self) -> Option<[f64; 2]> {
        bounds(self.series.iter().flat_map(|s| s.all_points()).map(|p| p.1))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<[f64; 2]> {
    values.fold(None, |acc, v| match acc {
        None => Some([v, v]),
        Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
    })
}

/// Shape every type in `store` for plotting on `axis`.
pub fn build_plot(store: &MeasurementStore, axis: XAxis) -> PlotData {
    let series = store
        .types_present()
        .into_iter()
        .map(|mtype| build_series(store, mtype, axis))
        .collect();

    PlotData {
        axis,
        horizontal_label: axis.label().to_string(),
        vertical_label: VERTICAL_LABEL.to_string(),
        series,
    }
}

fn build_series(store: &MeasurementStore, mtype: MeasurementType, axis: XAxis) -> PlotSeries {
    let style = store.style(mtype);
    let partition = store.range_partition(mtype, axis);
    let to_points = |pairs: &[(AxisValue, u32)]| -> Vec<(f64, f64)> {
        pairs
            .iter()
            .map(|(x, v)| (x.as_f64(), f64::from(*v)))
            .collect()
    };

    let in_points = to_points(&partition.in_range);
    let out_points = to_points(&partition.out_of_range);

    let x_extent = bounds(in_points.iter().chain(&out_points).map(|p| p.0));
    let reference_lines = match x_extent {
        Some([x0, x1]) => [style.low, style.high]
            .into_iter()
            .flatten()
            .map(|bound| ReferenceLine {
                bound,
                points: [(x0, f64::from(bound)), (x1, f64::from(bound))],
            })
            .collect(),
        None => Vec::new(),
    };

    PlotSeries {
        mtype,
        in_range: PointSet {
            style: style.in_range.clone(),
            points: in_points,
        },
        out_of_range: style.is_bounded().then(|| PointSet {
            style: style.out_of_range.clone(),
            points: out_points,
        }),
        reference_lines,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
