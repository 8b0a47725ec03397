use crate::models::MeasurementType;

// ── Percentile helper ─────────────────────────────────────────────────────────

/// Compute the `p`-th percentile of a **sorted** slice using standard linear
/// interpolation.
///
/// Returns `0.0` for an empty slice. At `p = 50` this is the median: the
/// middle value for odd lengths, the mean of the two middle values for even
/// lengths.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let len = sorted_data.len();
    if len == 1 {
        return sorted_data[0];
    }
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = rank - lo as f64;
    sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo])
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Summary of all values recorded for one measurement type.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub mtype: MeasurementType,
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub median: f64,
}

impl Statistics {
    /// Summarise `values`; `None` when there are no values.
    pub fn from_values(mtype: MeasurementType, values: &[u32]) -> Option<Self> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let count = values.len();
        let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();

        let mut sorted: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            mtype,
            count,
            min,
            max,
            mean: sum as f64 / count as f64,
            median: percentile(&sorted, 50.0),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
