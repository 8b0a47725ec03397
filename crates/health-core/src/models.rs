use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::error::HealthLogError;

/// The fixed set of measurement kinds a health log can record.
///
/// Ordering follows declaration order and is used wherever output must be
/// deterministic (statistics listing, plot series).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeasurementType {
    /// Blood sugar taken in the morning.
    MorningSugar,
    /// Blood sugar taken in the evening.
    EveningSugar,
    /// Systolic blood pressure.
    BpHigh,
    /// Diastolic blood pressure.
    BpLow,
    /// Heart rate in beats per minute.
    Pulse,
}

impl MeasurementType {
    /// Every measurement type, in declaration order.
    pub const ALL: [MeasurementType; 5] = [
        MeasurementType::MorningSugar,
        MeasurementType::EveningSugar,
        MeasurementType::BpHigh,
        MeasurementType::BpLow,
        MeasurementType::Pulse,
    ];

    /// Short key used in reports and style files.
    pub fn key(self) -> &'static str {
        match self {
            MeasurementType::MorningSugar => "sg_m",
            MeasurementType::EveningSugar => "sg_e",
            MeasurementType::BpHigh => "bp_hi",
            MeasurementType::BpLow => "bp_low",
            MeasurementType::Pulse => "pl",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width/alignment flags working for report columns.
        f.pad(self.key())
    }
}

impl FromStr for MeasurementType {
    type Err = HealthLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeasurementType::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| HealthLogError::UnknownMeasurementType(s.to_string()))
    }
}

/// One dated reading of a single measurement type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub date: NaiveDate,
    pub mtype: MeasurementType,
    pub value: u32,
}

impl Measurement {
    pub fn new(date: NaiveDate, mtype: MeasurementType, value: u32) -> Self {
        Self { date, mtype, value }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:6} {}", self.date.format("%d%b%Y"), self.mtype, self.value)
    }
}

/// Category of data a log line can carry, without its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCategory {
    /// Two blood-sugar slots: morning and evening.
    Sugar,
    /// Three slots: systolic, diastolic, pulse.
    BloodPressure,
}

impl DataCategory {
    /// Target measurement type of each value slot, in slot order.
    pub fn slot_types(self) -> &'static [MeasurementType] {
        match self {
            DataCategory::Sugar => &[MeasurementType::MorningSugar, MeasurementType::EveningSugar],
            DataCategory::BloodPressure => &[
                MeasurementType::BpHigh,
                MeasurementType::BpLow,
                MeasurementType::Pulse,
            ],
        }
    }
}

/// The values matched on one data line. `None` marks a `?` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataReading {
    Sugar {
        morning: Option<u32>,
        evening: Option<u32>,
    },
    BloodPressure {
        high: Option<u32>,
        low: Option<u32>,
        pulse: Option<u32>,
    },
}

impl DataReading {
    pub fn category(&self) -> DataCategory {
        match self {
            DataReading::Sugar { .. } => DataCategory::Sugar,
            DataReading::BloodPressure { .. } => DataCategory::BloodPressure,
        }
    }

    /// Turn the reading into measurements dated `date`, skipping empty slots.
    pub fn into_measurements(self, date: NaiveDate) -> Vec<Measurement> {
        let slots: Vec<Option<u32>> = match self {
            DataReading::Sugar { morning, evening } => vec![morning, evening],
            DataReading::BloodPressure { high, low, pulse } => vec![high, low, pulse],
        };
        self.category()
            .slot_types()
            .iter()
            .zip(slots)
            .filter_map(|(&mtype, value)| value.map(|v| Measurement::new(date, mtype, v)))
            .collect()
    }
}
