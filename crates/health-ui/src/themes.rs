use health_core::plot_style::StyleColor;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Styles for the chart frame, axes and reference lines.
///
/// Point colours come from each series' plot style and are mapped through
/// [`Theme::point_color`].
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub border: Style,
    pub axis: Style,
    pub axis_title: Style,
    pub axis_labels: Style,
    pub reference_line: Style,
    pub dim: Style,
    pub warning: Style,
    /// Whether style colours use the bright ANSI variants.
    pub bright_points: bool,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),
            axis_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            axis_labels: Style::default().fg(Color::Gray),
            reference_line: Style::default().fg(Color::DarkGray),
            dim: Style::default().fg(Color::DarkGray),
            warning: Style::default().fg(Color::Yellow),
            bright_points: true,
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Gray),
            axis: Style::default().fg(Color::DarkGray),
            axis_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            axis_labels: Style::default().fg(Color::DarkGray),
            reference_line: Style::default().fg(Color::Gray),
            dim: Style::default().fg(Color::Gray),
            warning: Style::default().fg(Color::Rgb(180, 120, 0)),
            bright_points: false,
        }
    }

    /// Basic 8-colour ANSI palette, no bold.
    pub fn classic() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::White),
            axis: Style::default().fg(Color::White),
            axis_title: Style::default().fg(Color::White),
            axis_labels: Style::default().fg(Color::White),
            reference_line: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),
            bright_points: false,
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Terminal colour for a plot-style colour.
    pub fn point_color(&self, color: StyleColor) -> Color {
        match (color, self.bright_points) {
            (StyleColor::Green, true) => Color::LightGreen,
            (StyleColor::Green, false) => Color::Green,
            (StyleColor::Blue, true) => Color::LightBlue,
            (StyleColor::Blue, false) => Color::Blue,
            (StyleColor::Red, true) => Color::LightRed,
            (StyleColor::Red, false) => Color::Red,
            (StyleColor::Pink, true) => Color::LightMagenta,
            (StyleColor::Pink, false) => Color::Magenta,
            (StyleColor::Purple, _) => Color::Magenta,
            (StyleColor::Gray, _) => Color::Gray,
        }
    }

    pub fn point_style(&self, color: StyleColor) -> Style {
        Style::default().fg(self.point_color(color))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
