//! Chart screens for the two summaries.

use ratatui::layout::{Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;

use crate::commands::MealSlice;
use crate::models::RepsByDate;

pub(crate) const REPS_CHART_TITLE: &str = "Total Reps Over Time";
pub(crate) const MEAL_CHART_TITLE: &str = "Meal Type Distribution";

/// Colors rotated across meal types.
const SLICE_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

/// Points in summary order: x is the position, y the summed reps.
pub(crate) fn reps_points(summary: &[RepsByDate]) -> Vec<(f64, f64)> {
    summary
        .iter()
        .enumerate()
        .map(|(idx, row)| (idx as f64, row.total_reps as f64))
        .collect()
}

/// Pick evenly spaced date labels that fit in `width` columns. The first and
/// last dates are always kept; a single date gets a blank partner so the axis
/// still renders.
///
/// The axis spreads labels evenly, so the gap between labelled points must
/// divide the point span exactly or the inner labels drift off their points.
pub(crate) fn x_axis_labels(summary: &[RepsByDate], width: u16) -> Vec<String> {
    match summary.len() {
        0 => return Vec::new(),
        1 => return vec![summary[0].date.clone(), String::new()],
        _ => {}
    }

    let widest = summary
        .iter()
        .map(|row| row.date.chars().count())
        .max()
        .unwrap_or(1)
        + 2;
    let fits = (width as usize / widest).max(2);
    let last = summary.len() - 1;
    let gaps = (1..fits.min(summary.len()))
        .rev()
        .find(|gaps| last % gaps == 0)
        .unwrap_or(1);
    let step = last / gaps;

    (0..=gaps)
        .map(|i| summary[i * step].date.clone())
        .collect()
}

/// Y bounds that always include zero and leave a little headroom.
pub(crate) fn y_bounds(summary: &[RepsByDate]) -> [f64; 2] {
    let max = summary.iter().map(|r| r.total_reps).max().unwrap_or(0).max(0) as f64;
    let min = summary.iter().map(|r| r.total_reps).min().unwrap_or(0).min(0) as f64;
    let top = if max <= min { min + 1.0 } else { max + (max - min) * 0.1 };
    [min, top]
}

/// Line plot with point markers of total reps per date.
pub(crate) fn draw_reps_chart(frame: &mut Frame, area: Rect, summary: &[RepsByDate]) {
    let points = reps_points(summary);
    let x_max = summary.len().saturating_sub(1).max(1) as f64;
    let [y_min, y_max] = y_bounds(summary);

    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&points),
    ];

    let x_labels: Vec<Span> = x_axis_labels(summary, area.width.saturating_sub(10))
        .into_iter()
        .map(Span::raw)
        .collect();
    let y_labels = vec![
        Span::raw(format!("{y_min:.0}")),
        Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{y_max:.0}")),
    ];
    let axis_title = Style::default().add_modifier(Modifier::DIM);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {REPS_CHART_TITLE} "))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", axis_title))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Reps", axis_title))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Proportion chart: one horizontal bar per meal type, labelled with the
/// type and its share of all meals.
pub(crate) fn draw_meal_distribution(frame: &mut Frame, area: Rect, slices: &[MealSlice]) {
    let bars: Vec<Bar> = slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            let color = SLICE_COLORS[idx % SLICE_COLORS.len()];
            Bar::default()
                .value(slice.count.max(0) as u64)
                .label(Line::from(slice.label()))
                .text_value(slice.count.to_string())
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" {MEAL_CHART_TITLE} "))
                .borders(Borders::ALL),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(dates: &[(&str, i64)]) -> Vec<RepsByDate> {
        dates
            .iter()
            .map(|(date, total)| RepsByDate {
                date: date.to_string(),
                total_reps: *total,
            })
            .collect()
    }

    #[test]
    fn points_follow_summary_order() {
        let rows = summary(&[("2024-01-02", 5), ("2024-01-01", 9)]);
        assert_eq!(reps_points(&rows), vec![(0.0, 5.0), (1.0, 9.0)]);
    }

    #[test]
    fn labels_thin_out_but_keep_ends() {
        let rows: Vec<RepsByDate> = (1..=31)
            .map(|day| RepsByDate {
                date: format!("2024-01-{day:02}"),
                total_reps: day,
            })
            .collect();

        let labels = x_axis_labels(&rows, 60);
        assert_eq!(labels.len(), 4);
        assert_eq!(labels.first().unwrap(), "2024-01-01");
        assert_eq!(labels.last().unwrap(), "2024-01-31");
    }

    #[test]
    fn labels_land_on_plotted_points() {
        let rows: Vec<RepsByDate> = (1..=31)
            .map(|day| RepsByDate {
                date: format!("2024-01-{day:02}"),
                total_reps: day,
            })
            .collect();

        // Room for five labels, but only four spread evenly over 31 points.
        assert_eq!(
            x_axis_labels(&rows, 60),
            vec!["2024-01-01", "2024-01-11", "2024-01-21", "2024-01-31"]
        );

        // 30 points span 29 steps, which nothing but the full span divides.
        assert_eq!(
            x_axis_labels(&rows[..30], 60),
            vec!["2024-01-01", "2024-01-30"]
        );
    }

    #[test]
    fn every_label_shown_when_room_allows() {
        let rows = summary(&[("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(x_axis_labels(&rows, 200), vec!["a", "b", "c"]);
    }

    #[test]
    fn single_date_gets_padding_label() {
        let rows = summary(&[("2024-01-01", 10)]);
        assert_eq!(x_axis_labels(&rows, 80), vec!["2024-01-01", ""]);
    }

    #[test]
    fn y_bounds_include_zero_with_headroom() {
        assert_eq!(y_bounds(&summary(&[("a", 100)])), [0.0, 110.0]);
        assert_eq!(y_bounds(&summary(&[("a", 0)])), [0.0, 1.0]);
        assert_eq!(y_bounds(&summary(&[("a", -10), ("b", 10)])), [-10.0, 12.0]);
    }
}
