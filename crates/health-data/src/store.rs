//! In-memory collection of parsed measurements.
//!
//! [`MeasurementStore`] is append-only. Queries sort by date on demand and
//! never deduplicate: two readings of the same type on the same day are both
//! kept.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use health_core::models::{Measurement, MeasurementType};
use health_core::plot_style::{PlotStyle, PlotStyles};
use health_core::statistics::Statistics;

// ── Axis values ───────────────────────────────────────────────────────────────

/// Which quantity the horizontal plot axis shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    /// Calendar date of each reading.
    Date,
    /// 1-based day number counted from the series' first date.
    DayNumber,
}

/// Horizontal coordinate of one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AxisValue {
    Date(NaiveDate),
    Day(i64),
}

impl AxisValue {
    /// Numeric position: days since the common era for dates.
    pub fn as_f64(self) -> f64 {
        match self {
            AxisValue::Date(d) => f64::from(chrono::Datelike::num_days_from_ce(&d)),
            AxisValue::Day(n) => n as f64,
        }
    }
}

/// One type's points split by its style bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangePartition {
    pub in_range: Vec<(AxisValue, u32)>,
    pub out_of_range: Vec<(AxisValue, u32)>,
}

// ── MeasurementStore ──────────────────────────────────────────────────────────

/// All measurements read so far plus the styles used to judge them.
#[derive(Debug, Clone, Default)]
pub struct MeasurementStore {
    measurements: Vec<Measurement>,
    styles: PlotStyles,
}

impl MeasurementStore {
    /// Empty store using the built-in plot styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store using `styles`.
    pub fn with_styles(styles: PlotStyles) -> Self {
        Self {
            measurements: Vec::new(),
            styles,
        }
    }

    pub fn add(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn styles(&self) -> &PlotStyles {
        &self.styles
    }

    /// Style for `mtype`, falling back to `DEFAULT`.
    pub fn style(&self, mtype: MeasurementType) -> &PlotStyle {
        self.styles.get(mtype)
    }

    /// Distinct types seen, in type order.
    pub fn types_present(&self) -> BTreeSet<MeasurementType> {
        self.measurements.iter().map(|m| m.mtype).collect()
    }

    /// Measurements whose type is in `types` (all types when `None`).
    ///
    /// With `sorted_by_date` the result is ordered by date; readings on the
    /// same date keep insertion order.
    pub fn query(&self, types: Option<&[MeasurementType]>, sorted_by_date: bool) -> Vec<&Measurement> {
        let mut found: Vec<&Measurement> = self
            .measurements
            .iter()
            .filter(|m| types.map_or(true, |ts| ts.contains(&m.mtype)))
            .collect();
        if sorted_by_date {
            found.sort_by_key(|m| m.date);
        }
        found
    }

    /// Values of [`MeasurementStore::query`], in the same order.
    pub fn values(&self, types: Option<&[MeasurementType]>, sorted_by_date: bool) -> Vec<u32> {
        self.query(types, sorted_by_date)
            .into_iter()
            .map(|m| m.value)
            .collect()
    }

    /// Number of distinct dates across every measurement.
    pub fn distinct_day_count(&self) -> usize {
        self.measurements
            .iter()
            .map(|m| m.date)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Count, min, max, mean and median for `mtype`; `None` without data.
    pub fn statistics(&self, mtype: MeasurementType) -> Option<Statistics> {
        Statistics::from_values(mtype, &self.values(Some(&[mtype]), true))
    }

    /// Statistics for every type present, in type order.
    pub fn all_statistics(&self) -> Vec<Statistics> {
        self.types_present()
            .into_iter()
            .filter_map(|t| self.statistics(t))
            .collect()
    }

    /// Distinct dates on which any of `types` was recorded, ascending.
    pub fn dates_for_types(&self, types: &[MeasurementType]) -> Vec<NaiveDate> {
        self.measurements
            .iter()
            .filter(|m| types.contains(&m.mtype))
            .map(|m| m.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Day numbers for [`MeasurementStore::dates_for_types`]; the earliest
    /// date is day 1.
    pub fn day_numbers_for_types(&self, types: &[MeasurementType]) -> Vec<i64> {
        let dates = self.dates_for_types(types);
        let Some(&first) = dates.first() else {
            return Vec::new();
        };
        dates
            .iter()
            .map(|d| (*d - first).num_days() + 1)
            .collect()
    }

    /// Split `mtype`'s readings into in-range and out-of-range points.
    ///
    /// Points are in date order. On [`XAxis::DayNumber`] day 1 is the first
    /// date recorded for `mtype`.
    pub fn range_partition(&self, mtype: MeasurementType, axis: XAxis) -> RangePartition {
        let style = self.style(mtype);
        let readings = self.query(Some(&[mtype]), true);
        let first = readings.first().map(|m| m.date);

        let mut partition = RangePartition::default();
        for m in readings {
            let x = match (axis, first) {
                (XAxis::DayNumber, Some(first)) => AxisValue::Day((m.date - first).num_days() + 1),
                _ => AxisValue::Date(m.date),
            };
            if style.is_out_of_range(m.value) {
                partition.out_of_range.push((x, m.value));
            } else {
                partition.in_range.push((x, m.value));
            }
        }
        partition
    }
}

impl Extend<Measurement> for MeasurementStore {
    fn extend<I: IntoIterator<Item = Measurement>>(&mut self, iter: I) {
        self.measurements.extend(iter);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
