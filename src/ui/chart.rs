//! Painter-drawn line chart for the daily check-in series.

use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, pos2};

use super::components::colors;
use crate::models::AnalyticsData;
use crate::models::analytics::peak_count;

/// Horizontal gridlines above the baseline.
const GRID_STEPS: u64 = 4;
/// Minimum horizontal room per x-axis label.
const LABEL_WIDTH: f32 = 72.0;

/// Draw `series` as a line plot, in the order given.
pub fn line_chart(ui: &mut Ui, series: &[AnalyticsData], height: f32) {
    let size = egui::vec2(ui.available_width(), height);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

    if !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter_at(rect);
    let visuals = ui.visuals();
    let weak = visuals.weak_text_color();

    if series.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No check-ins yet",
            FontId::proportional(14.0),
            weak,
        );
        return;
    }

    let plot = Rect::from_min_max(
        pos2(rect.left() + 40.0, rect.top() + 10.0),
        pos2(rect.right() - 16.0, rect.bottom() - 24.0),
    );
    let max = axis_max(peak_count(series));

    // Gridlines and y labels
    for step in 0..=GRID_STEPS {
        let value = max * step / GRID_STEPS;
        let y = plot.bottom() - plot.height() * step as f32 / GRID_STEPS as f32;
        painter.line_segment(
            [pos2(plot.left(), y), pos2(plot.right(), y)],
            Stroke::new(1.0, visuals.faint_bg_color),
        );
        painter.text(
            pos2(plot.left() - 8.0, y),
            Align2::RIGHT_CENTER,
            value.to_string(),
            FontId::proportional(10.0),
            weak,
        );
    }

    let points = chart_points(series, plot, max);

    // X labels, thinned so they never overlap
    let max_labels = ((plot.width() / LABEL_WIDTH) as usize).max(1);
    let every = series.len().div_ceil(max_labels).max(1);
    for (i, (point, entry)) in points.iter().zip(series).enumerate() {
        if i % every == 0 {
            painter.text(
                pos2(point.x, plot.bottom() + 6.0),
                Align2::CENTER_TOP,
                &entry.date,
                FontId::proportional(10.0),
                weak,
            );
        }
    }

    if points.len() > 1 {
        painter.add(Shape::line(points.clone(), Stroke::new(3.0, colors::PRIMARY)));
    }
    for point in &points {
        painter.circle_filled(*point, 4.0, colors::PRIMARY);
    }

    // Hover readout for the nearest point
    if let Some(hover) = response.hover_pos()
        && let Some((point, entry)) = points
            .iter()
            .zip(series)
            .min_by(|a, b| (a.0.x - hover.x).abs().total_cmp(&(b.0.x - hover.x).abs()))
    {
        painter.circle_stroke(*point, 7.0, Stroke::new(2.0, colors::PRIMARY));
        painter.text(
            pos2(point.x, point.y - 12.0),
            Align2::CENTER_BOTTOM,
            format!("{}: {}", entry.date, entry.count),
            FontId::proportional(12.0),
            visuals.strong_text_color(),
        );
    }
}

/// Top of the y axis: the peak rounded up so every gridline is a whole number.
pub fn axis_max(peak: u64) -> u64 {
    peak.max(1).div_ceil(GRID_STEPS) * GRID_STEPS
}

/// Screen positions of the series inside `plot`, left to right in input order.
pub fn chart_points(series: &[AnalyticsData], plot: Rect, max: u64) -> Vec<Pos2> {
    let max = max.max(1) as f32;
    let last = series.len().saturating_sub(1);

    series
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let x = if last == 0 {
                plot.center().x
            } else {
                plot.left() + plot.width() * i as f32 / last as f32
            };
            let y = plot.bottom() - plot.height() * entry.count as f32 / max;
            pos2(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, count: u64) -> AnalyticsData {
        AnalyticsData {
            date: date.to_string(),
            count,
        }
    }

    fn plot() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 50.0))
    }

    #[test]
    fn test_axis_max_rounds_to_grid() {
        assert_eq!(axis_max(0), 4);
        assert_eq!(axis_max(1), 4);
        assert_eq!(axis_max(4), 4);
        assert_eq!(axis_max(5), 8);
        assert_eq!(axis_max(37), 40);
    }

    #[test]
    fn test_points_follow_input_order() {
        let series = vec![point("2026-01-07", 4), point("2026-01-05", 0), point("2026-01-06", 2)];
        let points = chart_points(&series, plot(), 4);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], pos2(0.0, 0.0));
        assert_eq!(points[1], pos2(50.0, 50.0));
        assert_eq!(points[2], pos2(100.0, 25.0));
    }

    #[test]
    fn test_single_point_centered() {
        let points = chart_points(&[point("2026-01-05", 2)], plot(), 4);
        assert_eq!(points, vec![pos2(50.0, 25.0)]);
    }
}
