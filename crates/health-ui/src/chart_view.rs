//! Scatter chart of measurements for the health-log TUI.
//!
//! Renders a bordered [`ratatui::widgets::Chart`] with one scatter dataset
//! per marker style and a line dataset for every range bound.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use health_core::formatting::{format_axis_date, format_tick};
use health_core::plot_style::Marker;
use health_data::plot::{PlotData, PointSet};
use health_data::store::XAxis;

use crate::themes::Theme;

const TITLE: &str = " Health Log ";

/// Render `data` as a scatter chart filling `area`.
///
/// Falls back to [`render_no_data`] when there is nothing to draw.
pub fn render_chart(frame: &mut Frame, area: Rect, data: &PlotData, theme: &Theme) {
    let (Some(x_bounds), Some(y_bounds)) = (data.x_bounds(), data.y_bounds()) else {
        render_no_data(frame, area, theme);
        return;
    };
    let x_bounds = pad_bounds(x_bounds);
    let y_bounds = pad_bounds(y_bounds);

    // Reference lines go first so the points are drawn over them.
    let mut datasets: Vec<Dataset> = data
        .series
        .iter()
        .flat_map(|s| s.reference_lines.iter())
        .map(|line| {
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.reference_line)
                .data(&line.points)
        })
        .collect();

    for series in &data.series {
        let sets = std::iter::once(&series.in_range).chain(series.out_of_range.as_ref());
        for set in sets.filter(|s| !s.points.is_empty()) {
            datasets.push(point_dataset(set, theme));
        }
    }

    let x_axis = Axis::default()
        .title(Span::styled(data.horizontal_label.clone(), theme.axis_title))
        .style(theme.axis)
        .bounds(x_bounds)
        .labels(
            x_labels(data.axis, x_bounds)
                .into_iter()
                .map(|l| Span::styled(l, theme.axis_labels)),
        );
    let y_axis = Axis::default()
        .title(Span::styled(data.vertical_label.clone(), theme.axis_title))
        .style(theme.axis)
        .bounds(y_bounds)
        .labels(
            y_labels(y_bounds)
                .into_iter()
                .map(|l| Span::styled(l, theme.axis_labels)),
        );

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(TITLE, theme.title))
                .title_bottom(Span::styled(" q: quit ", theme.dim)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(3, 4)));

    frame.render_widget(chart, area);
}

/// Render a "no data" placeholder when no measurements were parsed.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No measurements to plot", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the input files and the --data-dir setting.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(TITLE),
        ),
        area,
    );
}

// ── Helpers ────────────────────────────────────────────────────────────────────

fn point_dataset<'a>(set: &'a PointSet, theme: &Theme) -> Dataset<'a> {
    let style = theme.point_style(set.style.color);
    Dataset::default()
        .name(Span::styled(legend_name(set), style))
        .marker(chart_marker(set.style.marker))
        .graph_type(GraphType::Scatter)
        .style(style)
        .data(&set.points)
}

/// Legend entry: the marker glyph followed by the style label.
fn legend_name(set: &PointSet) -> String {
    format!("{} {}", set.style.marker.symbol(), set.style.label)
}

/// Closest terminal cell marker for a plot marker.
fn chart_marker(marker: Marker) -> symbols::Marker {
    match marker {
        Marker::Point => symbols::Marker::Dot,
        Marker::Star | Marker::Plus => symbols::Marker::Block,
        Marker::TriangleUp | Marker::TriangleDown => symbols::Marker::Bar,
        Marker::Cross => symbols::Marker::Braille,
    }
}

/// Widen a degenerate `[v, v]` range so the axis has a non-zero span.
fn pad_bounds([lo, hi]: [f64; 2]) -> [f64; 2] {
    if hi - lo < f64::EPSILON {
        [lo - 1.0, hi + 1.0]
    } else {
        [lo, hi]
    }
}

fn tick_values([lo, hi]: [f64; 2]) -> [f64; 3] {
    [lo, (lo + hi) / 2.0, hi]
}

fn x_labels(axis: XAxis, bounds: [f64; 2]) -> Vec<String> {
    tick_values(bounds)
        .into_iter()
        .map(|v| match axis {
            XAxis::Date => date_from_axis(v)
                .map(format_axis_date)
                .unwrap_or_else(|| format_tick(v)),
            XAxis::DayNumber => format_tick(v.round()),
        })
        .collect()
}

fn y_labels(bounds: [f64; 2]) -> Vec<String> {
    tick_values(bounds)
        .into_iter()
        .map(|v| format_tick(v.round()))
        .collect()
}

/// Inverse of the date axis mapping (days since the common era).
fn date_from_axis(value: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
