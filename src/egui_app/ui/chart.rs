//! Painter-based line chart for the per-epoch accuracy history.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Shape, Stroke};

use super::style;
use crate::egui_app::state::AccuracyChart;

const CHART_HEIGHT: f32 = 260.0;
const MARGIN_LEFT: f32 = 52.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 24.0;
const MARGIN_BOTTOM: f32 = 36.0;
const Y_GRID_STEPS: usize = 4;

/// Draw the two-series accuracy chart into the available width.
pub(super) fn draw_accuracy_chart(ui: &mut egui::Ui, chart: &AccuracyChart) {
    let width = ui.available_width().max(320.0);
    let (rect, _response) =
        ui.allocate_exact_size(egui::vec2(width, CHART_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, style::CHART_FILL);

    let plot = Rect::from_min_max(
        rect.min + egui::vec2(MARGIN_LEFT, MARGIN_TOP),
        rect.max - egui::vec2(MARGIN_RIGHT, MARGIN_BOTTOM),
    );
    if plot.width() <= 0.0 || plot.height() <= 0.0 || chart.epochs.is_empty() {
        return;
    }

    // The y axis starts at zero; accuracies normally stay within [0, 1] but
    // the scale stretches if the data exceeds it.
    let y_max = chart
        .training
        .iter()
        .chain(chart.validation.iter())
        .fold(1.0f64, |max, value| max.max(*value));

    draw_grid(&painter, plot, y_max);
    draw_epoch_ticks(&painter, plot, chart);
    draw_series(&painter, plot, chart, y_max);
    draw_axis_titles(&painter, rect, plot);
    draw_legend(&painter, plot);
}

fn y_to_screen(plot: Rect, y_max: f64, value: f64) -> f32 {
    let fraction = (value / y_max) as f32;
    plot.bottom() - fraction * plot.height()
}

fn x_to_screen(plot: Rect, count: usize, index: usize) -> f32 {
    if count <= 1 {
        return plot.center().x;
    }
    plot.left() + (index as f32 / (count - 1) as f32) * plot.width()
}

fn draw_grid(painter: &egui::Painter, plot: Rect, y_max: f64) {
    let font = FontId::proportional(10.0);
    for step in 0..=Y_GRID_STEPS {
        let value = y_max * step as f64 / Y_GRID_STEPS as f64;
        let y = y_to_screen(plot, y_max, value);
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, style::CHART_GRID),
        );
        painter.text(
            Pos2::new(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format!("{value:.2}"),
            font.clone(),
            style::MUTED_TEXT,
        );
    }
}

fn draw_epoch_ticks(painter: &egui::Painter, plot: Rect, chart: &AccuracyChart) {
    let count = chart.epochs.len();
    // Thin out labels on long runs so they stay readable.
    let stride = count.div_ceil(12).max(1);
    let font = FontId::proportional(10.0);
    for (index, epoch) in chart.epochs.iter().enumerate() {
        if index % stride != 0 && index + 1 != count {
            continue;
        }
        let x = x_to_screen(plot, count, index);
        painter.line_segment(
            [
                Pos2::new(x, plot.bottom()),
                Pos2::new(x, plot.bottom() + 4.0),
            ],
            Stroke::new(1.0, style::CHART_GRID),
        );
        painter.text(
            Pos2::new(x, plot.bottom() + 6.0),
            Align2::CENTER_TOP,
            epoch.to_string(),
            font.clone(),
            style::MUTED_TEXT,
        );
    }
}

fn draw_series(painter: &egui::Painter, plot: Rect, chart: &AccuracyChart, y_max: f64) {
    let series = [
        (&chart.training, style::TRAINING_SERIES),
        (&chart.validation, style::VALIDATION_SERIES),
    ];
    for (values, color) in series {
        let points: Vec<Pos2> = values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Pos2::new(
                    x_to_screen(plot, values.len(), index),
                    y_to_screen(plot, y_max, *value),
                )
            })
            .collect();
        match points.as_slice() {
            [] => {}
            [single] => {
                painter.circle_filled(*single, 3.0, color);
            }
            _ => {
                painter.add(Shape::line(points.clone(), Stroke::new(2.0, color)));
                for point in points {
                    painter.circle_filled(point, 2.0, color);
                }
            }
        }
    }
}

fn draw_axis_titles(painter: &egui::Painter, rect: Rect, plot: Rect) {
    let font = FontId::proportional(11.0);
    painter.text(
        Pos2::new(plot.center().x, rect.bottom() - 4.0),
        Align2::CENTER_BOTTOM,
        "Epoch",
        font.clone(),
        style::MUTED_TEXT,
    );
    painter.text(
        Pos2::new(rect.left() + 4.0, rect.top() + 4.0),
        Align2::LEFT_TOP,
        "Accuracy",
        font,
        style::MUTED_TEXT,
    );
}

fn draw_legend(painter: &egui::Painter, plot: Rect) {
    let font = FontId::proportional(10.0);
    let entries = [
        ("Training Accuracy", style::TRAINING_SERIES),
        ("Validation Accuracy", style::VALIDATION_SERIES),
    ];
    let mut anchor = Pos2::new(plot.right() - 4.0, plot.top() + 4.0);
    for (label, color) in entries.iter() {
        let text_rect = painter.text(
            anchor,
            Align2::RIGHT_TOP,
            *label,
            font.clone(),
            Color32::WHITE,
        );
        painter.rect_filled(
            Rect::from_center_size(
                Pos2::new(text_rect.left() - 10.0, text_rect.center().y),
                egui::vec2(10.0, 3.0),
            ),
            0.0,
            *color,
        );
        anchor.y = text_rect.bottom() + 4.0;
    }
}
