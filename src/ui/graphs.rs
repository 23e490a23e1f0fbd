use egui;

use crate::flocking::Rule;
use crate::stats::{RingBuffer, SimStats};

const RULE_COLORS: [egui::Color32; 4] = [
    egui::Color32::from_rgb(150, 150, 150),
    egui::Color32::from_rgb(255, 100, 100),
    egui::Color32::from_rgb(100, 180, 255),
    egui::Color32::from_rgb(100, 200, 100),
];

/// Draw flock order and blink graphs.
pub fn draw_graphs(ctx: &egui::Context, stats: &SimStats) {
    egui::Window::new("Statistics")
        .default_pos(egui::pos2(340.0, 420.0))
        .default_size(egui::vec2(400.0, 300.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.collapsing("Polarization", |ui| {
                draw_line_graph(ui, &stats.polarization, 0.0..=1.0, egui::Color32::from_rgb(200, 200, 100));
            });

            ui.collapsing("Blinks", |ui| {
                let max = stats.blinks.iter().fold(1.0f32, f32::max);
                draw_line_graph(ui, &stats.blinks, 0.0..=max, egui::Color32::from_rgb(200, 150, 255));
            });

            ui.collapsing("Rule mix", |ui| {
                let size = egui::vec2(ui.available_width(), 80.0);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
                let rect = response.rect;
                painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));

                for rule in Rule::ALL {
                    draw_line_in_rect(&painter, &stats.rule_share[rule.index()], rect, 0.0..=1.0, RULE_COLORS[rule.index()]);
                }

                ui.horizontal(|ui| {
                    for rule in Rule::ALL {
                        ui.colored_label(RULE_COLORS[rule.index()], rule.label());
                    }
                });
            });
        });
}

fn draw_line_graph(
    ui: &mut egui::Ui,
    buffer: &RingBuffer,
    range: std::ops::RangeInclusive<f32>,
    color: egui::Color32,
) {
    let size = egui::vec2(ui.available_width(), 80.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;

    // Background
    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));

    draw_line_in_rect(&painter, buffer, rect, range, color);

    // Current value label
    if let Some(val) = buffer.last() {
        painter.text(
            egui::pos2(rect.right() - 4.0, rect.top() + 2.0),
            egui::Align2::RIGHT_TOP,
            format!("{val:.2}"),
            egui::FontId::proportional(10.0),
            egui::Color32::from_gray(200),
        );
    }
}

fn draw_line_in_rect(
    painter: &egui::Painter,
    buffer: &RingBuffer,
    rect: egui::Rect,
    range: std::ops::RangeInclusive<f32>,
    color: egui::Color32,
) {
    let len = buffer.len();
    if len < 2 {
        return;
    }

    let (min_val, max_val) = (*range.start(), *range.end());
    let span = (max_val - min_val).max(f32::EPSILON);

    let points: Vec<egui::Pos2> = buffer
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = rect.left() + (i as f32 / (len - 1) as f32) * rect.width();
            let y = rect.bottom() - ((v - min_val) / span).clamp(0.0, 1.0) * rect.height();
            egui::pos2(x, y)
        })
        .collect();

    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(1.5, color));
    }
}
