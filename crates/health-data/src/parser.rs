//! Tolerant line parser for hand-written health logs.
//!
//! A log mixes date lines, data lines and free text:
//!
//! ```text
//! 2020                     # year on its own line
//! 26 July 109 231          # day month, then morning/evening sugar
//! 27 Jul night 150         # "night" stands in for a missing morning value
//! September 16, 2020       # month day, year
//! 145/95 pulse: 80         # blood pressure high/low, pulse
//! ?/96/85                  # "?" marks a missing value
//! ```
//!
//! Lines are matched against [`RULES`] in order. Date rules update the
//! [`DateContext`] carried from line to line; the first data rule that matches
//! produces measurements dated from that context. Anything else is ignored.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::NaiveDate;
use health_core::error::{HealthLogError, Result};
use health_core::models::{DataReading, Measurement};
use regex::Regex;

static YEAR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("regex is valid"));
static DAY_MONTH_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*([A-Za-z]\w*)").expect("regex is valid"));
static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]\w*)\s+(\d+)\s*,\s*(\d+)$").expect("regex is valid")
});
static SUGAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\?|night|\d+)\s+(\?|\d+)").expect("regex is valid"));
static PULSE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*;?\s*pulse:?\s*").expect("regex is valid"));
static BLOOD_PRESSURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\?|\d+)/(\?|\d+)/(\?|\d+)").expect("regex is valid")
});

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

// ── Date context ──────────────────────────────────────────────────────────────

/// Date state carried forward from line to line within one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateContext {
    pub year: String,
    pub month: Option<String>,
    pub day: Option<String>,
}

impl DateContext {
    /// Fresh context for a new file: a known year, no day or month yet.
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: None,
            day: None,
        }
    }

    /// Resolve the current day/month/year into a calendar date.
    pub fn resolve(&self) -> Result<NaiveDate> {
        let (Some(day), Some(month)) = (self.day.as_deref(), self.month.as_deref()) else {
            return Err(HealthLogError::MissingDate);
        };
        let month_no = month_number(month);
        if month_no == 0 {
            return Err(HealthLogError::InvalidMonth(month.to_string()));
        }
        let invalid = || HealthLogError::InvalidDate {
            year: self.year.clone(),
            month: month.to_string(),
            day: day.to_string(),
        };
        let day_no: u32 = day.parse().map_err(|_| invalid())?;
        let year = normalize_year(&self.year).ok_or_else(invalid)?;
        NaiveDate::from_ymd_opt(year, month_no, day_no).ok_or_else(invalid)
    }
}

/// Month number 1-12 for a month token, or 0 when nothing matches.
///
/// The first three characters of the token are compared case-insensitively
/// with the month abbreviations, so `"Sept"`, `"september"` and `"SEP"` all
/// give 9.
pub fn month_number(token: &str) -> u32 {
    let prefix: String = token.chars().take(3).flat_map(char::to_lowercase).collect();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| *abbr == prefix)
        .map_or(0, |i| i as u32 + 1)
}

/// Years up to 20 are read as 2000-2020; anything larger is taken as written.
pub fn normalize_year(year: &str) -> Option<i32> {
    let year: i32 = year.trim().parse().ok()?;
    Some(if year <= 20 { year + 2000 } else { year })
}

// ── Rules ─────────────────────────────────────────────────────────────────────

/// Line patterns, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `2020` alone on a line.
    Year,
    /// `26 Jul ...` at the start of a line.
    DayMonthPrefix,
    /// `September 16, 2020` as the whole line.
    MonthDayYear,
    /// `109 231`, `? 231`, `night 231`.
    Sugar,
    /// `145/95/80`, `145/95 pulse: 80`, `?/95/80`.
    BloodPressure,
}

/// Evaluation order. Date rules come before data rules; sugar before blood
/// pressure.
pub const RULES: [Rule; 5] = [
    Rule::Year,
    Rule::DayMonthPrefix,
    Rule::MonthDayYear,
    Rule::Sugar,
    Rule::BloodPressure,
];

/// What a rule found on a line.
#[derive(Debug, PartialEq, Eq)]
enum RuleMatch<'a> {
    NoMatch,
    Year(&'a str),
    Date {
        day: &'a str,
        month: &'a str,
        year: Option<&'a str>,
        rest: &'a str,
    },
    Data(DataReading),
}

impl Rule {
    pub fn is_date_rule(self) -> bool {
        matches!(self, Rule::Year | Rule::DayMonthPrefix | Rule::MonthDayYear)
    }

    fn apply(self, line: &str) -> Result<RuleMatch<'_>> {
        let found = match self {
            Rule::Year => YEAR_LINE.is_match(line).then_some(RuleMatch::Year(line)),
            Rule::DayMonthPrefix => DAY_MONTH_PREFIX.captures(line).map(|caps| {
                let whole = caps.get(0).map_or(0, |m| m.end());
                RuleMatch::Date {
                    day: caps.get(1).map_or("", |m| m.as_str()),
                    month: caps.get(2).map_or("", |m| m.as_str()),
                    year: None,
                    rest: &line[whole..],
                }
            }),
            Rule::MonthDayYear => MONTH_DAY_YEAR.captures(line).map(|caps| RuleMatch::Date {
                month: caps.get(1).map_or("", |m| m.as_str()),
                day: caps.get(2).map_or("", |m| m.as_str()),
                year: caps.get(3).map(|m| m.as_str()),
                rest: "",
            }),
            Rule::Sugar => match SUGAR.captures(line) {
                Some(caps) => Some(RuleMatch::Data(DataReading::Sugar {
                    morning: slot_value(&caps[1])?,
                    evening: slot_value(&caps[2])?,
                })),
                None => None,
            },
            Rule::BloodPressure => {
                let normalized = normalize_pulse(line);
                match BLOOD_PRESSURE.captures(&normalized) {
                    Some(caps) => Some(RuleMatch::Data(DataReading::BloodPressure {
                        high: slot_value(&caps[1])?,
                        low: slot_value(&caps[2])?,
                        pulse: slot_value(&caps[3])?,
                    })),
                    None => None,
                }
            }
        };
        Ok(found.unwrap_or(RuleMatch::NoMatch))
    }
}

/// Replace `pulse:` style separators with `/`, e.g. `145/95; Pulse 80` becomes
/// `145/95/80`.
pub fn normalize_pulse(line: &str) -> Cow<'_, str> {
    PULSE_SEPARATOR.replace_all(line, "/")
}

/// Drop a trailing `# comment`.
pub fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(before, _)| before)
}

fn slot_value(token: &str) -> Result<Option<u32>> {
    match token {
        "?" | "night" => Ok(None),
        digits => digits
            .parse()
            .map(Some)
            .map_err(|_| HealthLogError::InvalidValue(digits.to_string())),
    }
}

// ── Line parsing ──────────────────────────────────────────────────────────────

/// Parse one raw line, updating `ctx` and returning any measurements found.
///
/// Lines that match no rule yield no measurements and no error. A data line
/// whose date cannot be resolved is an error.
pub fn parse_line(line: &str, ctx: &mut DateContext) -> Result<Vec<Measurement>> {
    let mut rest = strip_comment(line).trim();
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let mut date_seen = false;
    for rule in RULES {
        if date_seen && rule.is_date_rule() {
            continue;
        }
        match rule.apply(rest)? {
            RuleMatch::NoMatch => {}
            RuleMatch::Year(year) => {
                ctx.year = year.to_string();
                return Ok(Vec::new());
            }
            RuleMatch::Date {
                day,
                month,
                year,
                rest: remainder,
            } => {
                ctx.day = Some(day.to_string());
                ctx.month = Some(month.to_string());
                if let Some(year) = year {
                    ctx.year = year.to_string();
                }
                rest = remainder.trim();
                date_seen = true;
            }
            RuleMatch::Data(reading) => {
                let date = ctx.resolve()?;
                return Ok(reading.into_measurements(date));
            }
        }
    }
    Ok(Vec::new())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use health_core::models::MeasurementType;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx_with_date(day: &str, month: &str, year: &str) -> DateContext {
        DateContext {
            year: year.to_string(),
            month: Some(month.to_string()),
            day: Some(day.to_string()),
        }
    }

    fn parse_all(lines: &[&str], year: &str) -> Result<Vec<Measurement>> {
        let mut ctx = DateContext::new(year);
        let mut out = Vec::new();
        for line in lines {
            out.extend(parse_line(line, &mut ctx)?);
        }
        Ok(out)
    }

    fn m(d: NaiveDate, t: MeasurementType, v: u32) -> Measurement {
        Measurement::new(d, t, v)
    }

    // ── rule order ────────────────────────────────────────────────────────────

    #[test]
    fn test_rule_order_is_dates_then_sugar_then_blood_pressure() {
        assert_eq!(
            RULES,
            [
                Rule::Year,
                Rule::DayMonthPrefix,
                Rule::MonthDayYear,
                Rule::Sugar,
                Rule::BloodPressure
            ]
        );
        let date_rules = RULES.iter().take_while(|r| r.is_date_rule()).count();
        assert_eq!(date_rules, 3);
    }

    #[test]
    fn test_sugar_rule_wins_over_blood_pressure() {
        // "120 80/70/60" matches the sugar pattern first.
        let mut ctx = ctx_with_date("1", "Jan", "2020");
        let ms = parse_line("120 80/70/60", &mut ctx).unwrap();
        assert_eq!(ms.len(), 2);
        assert_eq!(ms[0].mtype, MeasurementType::MorningSugar);
        assert_eq!(ms[0].value, 120);
        assert_eq!(ms[1].mtype, MeasurementType::EveningSugar);
        assert_eq!(ms[1].value, 80);
    }

    // ── sugar lines ───────────────────────────────────────────────────────────

    #[test]
    fn test_day_month_sugar_line() {
        let ms = parse_all(&["26 Jul 109 231"], "2020").unwrap();
        assert_eq!(
            ms,
            vec![
                m(date(2020, 7, 26), MeasurementType::MorningSugar, 109),
                m(date(2020, 7, 26), MeasurementType::EveningSugar, 231),
            ]
        );
    }

    #[test]
    fn test_full_month_name_and_no_space() {
        let ms = parse_all(&["26 July 109 231", "17Aug 110 149"], "2020").unwrap();
        assert_eq!(ms[0].date, date(2020, 7, 26));
        assert_eq!(ms[2].date, date(2020, 8, 17));
        assert_eq!(ms[3].value, 149);
    }

    #[test]
    fn test_question_mark_skips_slot() {
        let ms = parse_all(&["26 Jul ? 231", "27 Jul 109 ?", "28 Jul ? ?"], "2020").unwrap();
        assert_eq!(
            ms,
            vec![
                m(date(2020, 7, 26), MeasurementType::EveningSugar, 231),
                m(date(2020, 7, 27), MeasurementType::MorningSugar, 109),
            ]
        );
    }

    #[test]
    fn test_night_counts_as_missing_morning() {
        let ms = parse_all(&["26 Jul night 150"], "2020").unwrap();
        assert_eq!(
            ms,
            vec![m(date(2020, 7, 26), MeasurementType::EveningSugar, 150)]
        );
    }

    #[test]
    fn test_sugar_line_uses_carried_date() {
        let ms = parse_all(&["26 Jul 109 231", "115 140"], "2020").unwrap();
        assert_eq!(ms.len(), 4);
        assert!(ms.iter().all(|m| m.date == date(2020, 7, 26)));
    }

    // ── blood pressure lines ──────────────────────────────────────────────────

    #[test]
    fn test_slash_separated_blood_pressure() {
        let mut ctx = ctx_with_date("16", "Sep", "2020");
        let ms = parse_line("146/96/85", &mut ctx).unwrap();
        let d = date(2020, 9, 16);
        assert_eq!(
            ms,
            vec![
                m(d, MeasurementType::BpHigh, 146),
                m(d, MeasurementType::BpLow, 96),
                m(d, MeasurementType::Pulse, 85),
            ]
        );
    }

    #[test]
    fn test_pulse_word_normalizes_to_slash() {
        assert_eq!(normalize_pulse("145/95 pulse: 80"), "145/95/80");
        assert_eq!(normalize_pulse("145/95; Pulse 80"), "145/95/80");
        assert_eq!(normalize_pulse("145/95 PULSE:80"), "145/95/80");

        let mut ctx = ctx_with_date("16", "Sep", "2020");
        let ms = parse_line("145/95 pulse: 80", &mut ctx).unwrap();
        let values: Vec<(MeasurementType, u32)> = ms.iter().map(|m| (m.mtype, m.value)).collect();
        assert_eq!(
            values,
            vec![
                (MeasurementType::BpHigh, 145),
                (MeasurementType::BpLow, 95),
                (MeasurementType::Pulse, 80),
            ]
        );
    }

    #[test]
    fn test_blood_pressure_question_marks() {
        let mut ctx = ctx_with_date("16", "Sep", "2020");
        let ms = parse_line("?/95/?", &mut ctx).unwrap();
        assert_eq!(ms, vec![m(date(2020, 9, 16), MeasurementType::BpLow, 95)]);
    }

    #[test]
    fn test_blood_pressure_after_day_month_prefix() {
        let ms = parse_all(&["16 Sep 145/95/80"], "2020").unwrap();
        assert_eq!(ms.len(), 3);
        assert_eq!(ms[0].date, date(2020, 9, 16));
    }

    // ── date lines ────────────────────────────────────────────────────────────

    #[test]
    fn test_month_day_year_carries_to_later_lines() {
        let ms = parse_all(&["September 16, 2020", "145 95"], "2019").unwrap();
        assert_eq!(
            ms,
            vec![
                m(date(2020, 9, 16), MeasurementType::MorningSugar, 145),
                m(date(2020, 9, 16), MeasurementType::EveningSugar, 95),
            ]
        );
    }

    #[test]
    fn test_month_day_year_updates_context_only() {
        let mut ctx = DateContext::new("2019");
        let ms = parse_line("September 16 , 2020", &mut ctx).unwrap();
        assert!(ms.is_empty());
        assert_eq!(ctx, ctx_with_date("16", "September", "2020"));
    }

    #[test]
    fn test_bare_year_line_sets_year() {
        let mut ctx = DateContext::new("2020");
        assert!(parse_line("2019", &mut ctx).unwrap().is_empty());
        assert_eq!(ctx.year, "2019");
        assert!(ctx.day.is_none());

        let ms = parse_line("3 Mar 100 110", &mut ctx).unwrap();
        assert_eq!(ms[0].date, date(2019, 3, 3));
        let ms = parse_line("4 Mar 101 111", &mut ctx).unwrap();
        assert_eq!(ms[0].date, date(2019, 3, 4));
    }

    #[test]
    fn test_two_digit_year_normalization_is_narrow() {
        assert_eq!(normalize_year("20"), Some(2020));
        assert_eq!(normalize_year("0"), Some(2000));
        assert_eq!(normalize_year("85"), Some(85));
        assert_eq!(normalize_year("21"), Some(21));
        assert_eq!(normalize_year("2019"), Some(2019));
        assert_eq!(normalize_year("abc"), None);

        let ms = parse_all(&["July 4, 20", "100 110"], "2019").unwrap();
        assert_eq!(ms[0].date, date(2020, 7, 4));
        let ms = parse_all(&["July 4, 85", "100 110"], "2019").unwrap();
        assert_eq!(ms[0].date, date(85, 7, 4));
    }

    // ── comments and noise ────────────────────────────────────────────────────

    #[test]
    fn test_comment_is_stripped() {
        let with = parse_all(&["26 Jul 109 231 # felt ok"], "2020").unwrap();
        let without = parse_all(&["26 Jul 109 231"], "2020").unwrap();
        assert_eq!(with, without);
        assert_eq!(strip_comment("a # b # c"), "a ");
    }

    #[test]
    fn test_blank_and_comment_only_lines_are_skipped() {
        let mut ctx = DateContext::new("2020");
        assert!(parse_line("", &mut ctx).unwrap().is_empty());
        assert!(parse_line("   \t", &mut ctx).unwrap().is_empty());
        assert!(parse_line("# 26 Jul 109 231", &mut ctx).unwrap().is_empty());
        assert_eq!(ctx, DateContext::new("2020"));
    }

    #[test]
    fn test_free_text_is_ignored() {
        let ms = parse_all(&["Jen's BP", "--", "September 16, 2020", "145/95 pulse: 80"], "2020")
            .unwrap();
        assert_eq!(ms.len(), 3);
    }

    // ── date errors ───────────────────────────────────────────────────────────

    #[test]
    fn test_data_without_date_is_error() {
        let err = parse_all(&["109 231"], "2020").unwrap_err();
        assert!(matches!(err, HealthLogError::MissingDate));
    }

    #[test]
    fn test_unknown_month_is_error() {
        let err = parse_all(&["26 Foo 109 231"], "2020").unwrap_err();
        assert!(matches!(err, HealthLogError::InvalidMonth(ref m) if m == "Foo"));
    }

    #[test]
    fn test_impossible_date_is_error() {
        let err = parse_all(&["31 Sep 109 231"], "2020").unwrap_err();
        assert!(matches!(err, HealthLogError::InvalidDate { .. }));
    }

    #[test]
    fn test_unknown_month_without_data_is_not_error() {
        let mut ctx = DateContext::new("2020");
        assert!(parse_line("26 Foo", &mut ctx).unwrap().is_empty());
        assert_eq!(ctx.month.as_deref(), Some("Foo"));
    }

    #[test]
    fn test_oversized_value_is_error() {
        let err = parse_all(&["26 Jul 99999999999 1"], "2020").unwrap_err();
        assert!(matches!(err, HealthLogError::InvalidValue(_)));
    }

    // ── month matching ────────────────────────────────────────────────────────

    #[test]
    fn test_month_number_prefix_match() {
        assert_eq!(month_number("Jan"), 1);
        assert_eq!(month_number("september"), 9);
        assert_eq!(month_number("Sept"), 9);
        assert_eq!(month_number("DEC"), 12);
        assert_eq!(month_number("Ju"), 0);
        assert_eq!(month_number("Foo"), 0);
        assert_eq!(month_number(""), 0);
    }

    #[test]
    fn test_resolve_reports_missing_parts() {
        let ctx = DateContext::new("2020");
        assert!(matches!(ctx.resolve(), Err(HealthLogError::MissingDate)));
        let ok = ctx_with_date("29", "Feb", "20");
        assert_eq!(ok.resolve().unwrap(), date(2020, 2, 29));
    }
}
