use chrono::NaiveDate;

use crate::statistics::Statistics;

/// Format one statistics report line.
///
/// The type key is padded to six columns, low/high to three, and the mean and
/// median are shown with one decimal place.
///
/// # Examples
///
/// ```
/// use health_core::formatting::format_statistics;
/// use health_core::models::MeasurementType;
/// use health_core::statistics::Statistics;
///
/// let stats = Statistics::from_values(MeasurementType::MorningSugar, &[80, 120, 100, 90]).unwrap();
/// assert_eq!(
///     format_statistics(&stats),
///     "sg_m   low:  80   high: 120   avg:  97.5   median:  95.0"
/// );
/// ```
pub fn format_statistics(stats: &Statistics) -> String {
    format!(
        "{:6} low: {:3}   high: {:3}   avg: {:5.1}   median: {:5.1}",
        stats.mtype, stats.min, stats.max, stats.mean, stats.median
    )
}

/// Format the distinct-day count line.
///
/// # Examples
///
/// ```
/// use health_core::formatting::format_day_count;
///
/// assert_eq!(format_day_count(12), "Number of days: 12");
/// ```
pub fn format_day_count(days: usize) -> String {
    format!("Number of days: {}", days)
}

/// Echo of one raw input line: file name, line number padded to four
/// columns, then the line without trailing whitespace.
///
/// # Examples
///
/// ```
/// use health_core::formatting::format_input_line;
///
/// assert_eq!(
///     format_input_line("bp_1.data", 7, "145/95/80  "),
///     "bp_1.data:   7:  145/95/80"
/// );
/// ```
pub fn format_input_line(file: &str, line_no: usize, line: &str) -> String {
    format!("{}:{:4}:  {}", file, line_no, line.trim_end())
}

/// Short axis label for a date, e.g. `"Jul 26"`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use health_core::formatting::format_axis_date;
///
/// let d = NaiveDate::from_ymd_opt(2020, 7, 6).unwrap();
/// assert_eq!(format_axis_date(d), "Jul 06");
/// ```
pub fn format_axis_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Format an axis tick value with no decimals when it is integral.
///
/// # Examples
///
/// ```
/// use health_core::formatting::format_tick;
///
/// assert_eq!(format_tick(120.0), "120");
/// assert_eq!(format_tick(97.5), "97.5");
/// ```
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeasurementType;

    #[test]
    fn test_format_statistics_wide_values() {
        let stats = Statistics::from_values(MeasurementType::BpHigh, &[145, 160]).unwrap();
        assert_eq!(
            format_statistics(&stats),
            "bp_hi  low: 145   high: 160   avg: 152.5   median: 152.5"
        );
    }

    #[test]
    fn test_format_statistics_long_key_is_not_truncated() {
        let stats = Statistics::from_values(MeasurementType::BpLow, &[9]).unwrap();
        assert!(format_statistics(&stats).starts_with("bp_low low:   9"));
    }

    #[test]
    fn test_format_day_count_zero() {
        assert_eq!(format_day_count(0), "Number of days: 0");
    }

    #[test]
    fn test_format_input_line_wide_line_number() {
        assert_eq!(
            format_input_line("sugar.data", 12345, "26 Jul 109 231"),
            "sugar.data:12345:  26 Jul 109 231"
        );
        assert_eq!(format_input_line("sugar.data", 1, ""), "sugar.data:   1:  ");
    }

    #[test]
    fn test_format_tick_negative() {
        assert_eq!(format_tick(-3.0), "-3");
    }
}
