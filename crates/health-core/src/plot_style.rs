//! Display attributes and valid ranges per measurement type.
//!
//! A [`PlotStyles`] registry holds one [`PlotStyle`] per measurement type
//! plus a `DEFAULT` entry that answers for any type without its own style.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HealthLogError, Result};
use crate::models::MeasurementType;

// ── Marker / colour ───────────────────────────────────────────────────────────

/// Point marker shape, spelled the way plot styles name them in files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    #[serde(rename = ".")]
    Point,
    #[serde(rename = "*")]
    Star,
    #[serde(rename = "^")]
    TriangleUp,
    #[serde(rename = "v")]
    TriangleDown,
    #[serde(rename = "x")]
    Cross,
    #[serde(rename = "+")]
    Plus,
}

impl Marker {
    pub fn symbol(self) -> char {
        match self {
            Marker::Point => '.',
            Marker::Star => '*',
            Marker::TriangleUp => '^',
            Marker::TriangleDown => 'v',
            Marker::Cross => 'x',
            Marker::Plus => '+',
        }
    }
}

/// Named colour for a marker or reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleColor {
    Green,
    Blue,
    Red,
    Pink,
    Purple,
    Gray,
}

/// Marker, legend label and colour for one half of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    pub marker: Marker,
    pub label: String,
    pub color: StyleColor,
}

impl MarkerStyle {
    pub fn new(marker: Marker, label: impl Into<String>, color: StyleColor) -> Self {
        Self {
            marker,
            label: label.into(),
            color,
        }
    }
}

// ── Style key ─────────────────────────────────────────────────────────────────

/// Registry key: either the fallback entry or a concrete measurement type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKey {
    Default,
    Type(MeasurementType),
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKey::Default => f.pad("DEFAULT"),
            StyleKey::Type(t) => t.fmt(f),
        }
    }
}

impl FromStr for StyleKey {
    type Err = HealthLogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "DEFAULT" {
            Ok(StyleKey::Default)
        } else {
            s.parse().map(StyleKey::Type)
        }
    }
}

// ── PlotStyle ─────────────────────────────────────────────────────────────────

/// How one measurement type is drawn and which values count as in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotStyle {
    pub key: StyleKey,
    /// Style for values inside `[low, high]`.
    pub in_range: MarkerStyle,
    /// Style for values outside `[low, high]`.
    pub out_of_range: MarkerStyle,
    /// Inclusive lower bound; `None` never flags.
    pub low: Option<u32>,
    /// Inclusive upper bound; `None` never flags.
    pub high: Option<u32>,
}

impl PlotStyle {
    /// `true` when at least one bound is configured.
    pub fn is_bounded(&self) -> bool {
        self.low.is_some() || self.high.is_some()
    }

    /// A value equal to a bound is still in range.
    pub fn is_out_of_range(&self, value: u32) -> bool {
        self.low.is_some_and(|low| value < low) || self.high.is_some_and(|high| value > high)
    }

    /// Apply every field present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: &PlotStyleOverride) {
        if let Some(m) = patch.in_marker {
            self.in_range.marker = m;
        }
        if let Some(ref l) = patch.in_label {
            self.in_range.label = l.clone();
        }
        if let Some(c) = patch.in_color {
            self.in_range.color = c;
        }
        if let Some(m) = patch.out_marker {
            self.out_of_range.marker = m;
        }
        if let Some(ref l) = patch.out_label {
            self.out_of_range.label = l.clone();
        }
        if let Some(c) = patch.out_color {
            self.out_of_range.color = c;
        }
        if patch.low.is_some() {
            self.low = patch.low;
        }
        if patch.high.is_some() {
            self.high = patch.high;
        }
    }
}

/// Partial style read from a style file; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotStyleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_marker: Option<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_marker: Option<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<u32>,
}

impl PlotStyleOverride {
    /// A complete override carrying every field of `style`.
    fn from_style(style: &PlotStyle) -> Self {
        Self {
            in_marker: Some(style.in_range.marker),
            in_label: Some(style.in_range.label.clone()),
            in_color: Some(style.in_range.color),
            out_marker: Some(style.out_of_range.marker),
            out_label: Some(style.out_of_range.label.clone()),
            out_color: Some(style.out_of_range.color),
            low: style.low,
            high: style.high,
        }
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Style registry with a guaranteed `DEFAULT` fallback.
#[derive(Debug, Clone)]
pub struct PlotStyles {
    default: PlotStyle,
    by_type: HashMap<MeasurementType, PlotStyle>,
}

impl PlotStyles {
    /// Registry holding only `default`; its key is forced to `DEFAULT`.
    pub fn with_default(mut default: PlotStyle) -> Self {
        default.key = StyleKey::Default;
        Self {
            default,
            by_type: HashMap::new(),
        }
    }

    /// The built-in styles for blood sugar, blood pressure and pulse.
    pub fn builtin() -> Self {
        use Marker::*;
        use StyleColor::*;

        let mut styles = Self::with_default(PlotStyle {
            key: StyleKey::Default,
            in_range: MarkerStyle::new(Point, "in", Blue),
            out_of_range: MarkerStyle::new(Cross, "out", Pink),
            low: Some(80),
            high: Some(120),
        });

        let entries = [
            (MeasurementType::MorningSugar, (Star, "morning in", Green), (TriangleUp, "morning out", Pink), Some(80), Some(120)),
            (MeasurementType::EveningSugar, (Point, "evening in", Blue), (Cross, "evening out", Red), Some(80), Some(150)),
            (MeasurementType::BpLow, (TriangleDown, "BP low", Blue), (Cross, "bp_low out", Pink), None, None),
            (MeasurementType::BpHigh, (TriangleUp, "BP high", Blue), (Cross, "bp_hi out", Pink), None, None),
            (MeasurementType::Pulse, (Plus, "pulse", Green), (Cross, "pl out", Pink), None, None),
        ];
        for (mtype, (im, il, ic), (om, ol, oc), low, high) in entries {
            styles.register(PlotStyle {
                key: StyleKey::Type(mtype),
                in_range: MarkerStyle::new(im, il, ic),
                out_of_range: MarkerStyle::new(om, ol, oc),
                low,
                high,
            });
        }
        styles
    }

    /// Add a style, or merge it field by field into an existing entry.
    pub fn register(&mut self, style: PlotStyle) {
        let patch = PlotStyleOverride::from_style(&style);
        let target = match style.key {
            StyleKey::Default => Some(&mut self.default),
            StyleKey::Type(t) => self.by_type.get_mut(&t),
        };
        match target {
            Some(existing) => {
                existing.merge(&patch);
                // A full replacement also clears bounds the new style drops.
                existing.low = style.low;
                existing.high = style.high;
            }
            None => {
                if let StyleKey::Type(t) = style.key {
                    self.by_type.insert(t, style);
                }
            }
        }
    }

    /// Merge a partial override into the entry for `key`.
    ///
    /// A type with no entry yet starts from a copy of `DEFAULT`.
    pub fn apply_override(&mut self, key: StyleKey, patch: &PlotStyleOverride) {
        let entry = match key {
            StyleKey::Default => &mut self.default,
            StyleKey::Type(t) => self.by_type.entry(t).or_insert_with(|| PlotStyle {
                key,
                ..self.default.clone()
            }),
        };
        entry.merge(patch);
    }

    /// Style for `mtype`, falling back to `DEFAULT`.
    pub fn get(&self, mtype: MeasurementType) -> &PlotStyle {
        self.by_type.get(&mtype).unwrap_or(&self.default)
    }

    pub fn default_style(&self) -> &PlotStyle {
        &self.default
    }

    pub fn low(&self, mtype: MeasurementType) -> Option<u32> {
        self.get(mtype).low
    }

    pub fn high(&self, mtype: MeasurementType) -> Option<u32> {
        self.get(mtype).high
    }

    /// Read a JSON style file (`{"sg_m": {"high": 130}, ...}`) and merge it.
    pub fn load_overrides(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| HealthLogError::file_read(path, source))?;
        self.apply_overrides_json(&content)?;
        debug!("Applied plot style overrides from {}", path.display());
        Ok(())
    }

    /// Merge every entry of a JSON style document.
    pub fn apply_overrides_json(&mut self, json: &str) -> Result<()> {
        let raw: BTreeMap<String, PlotStyleOverride> = serde_json::from_str(json)?;
        for (name, patch) in &raw {
            let key: StyleKey = name.parse()?;
            self.apply_override(key, patch);
        }
        Ok(())
    }
}

impl Default for PlotStyles {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
