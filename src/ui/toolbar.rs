use egui;

use super::UiState;
use crate::flocking::Rule;
use crate::simulation::SimState;

/// Slim status strip + compact controls.
pub fn draw_toolbar(ctx: &egui::Context, sim: &mut SimState, ui_state: &mut UiState) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(3.0);
        ui.horizontal_wrapped(|ui| {
            title_badge(ui, "BOID TANK");

            ui.separator();
            compact_group(ui, "Sim", |ui| {
                let pause_label = if sim.paused { "Play" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    sim.paused = !sim.paused;
                }
                if ui.button("Step").clicked() {
                    ui_state.step_requested = true;
                }
                if ui.button("Rebuild").clicked() {
                    ui_state.rebuild_requested = true;
                }
            });

            compact_group(ui, "Panels", |ui| {
                ui.toggle_value(&mut ui_state.show_settings, "Settings");
                ui.toggle_value(&mut ui_state.show_graphs, "Graphs");
            });
        });

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            let report = &sim.last_report;
            metric_chip(ui, "Boids", sim.population().len());
            metric_chip(ui, "Tick", sim.tick_count);
            metric_chip(ui, "Polarization", format!("{:.2}", report.polarization));
            for rule in [Rule::Separation, Rule::Cohesion, Rule::Alignment] {
                metric_chip(ui, rule.label(), report.count(rule));
            }
            if sim.oscillator().is_some() {
                metric_chip(ui, "Blinks", report.blinks);
            }
            if sim.environment().planar {
                status_chip(ui, "2D", egui::Color32::from_rgb(98, 154, 191));
            }
            if sim.population().is_empty() {
                status_chip(ui, "Empty tank", egui::Color32::from_rgb(191, 140, 98));
            }
            if report.outside > 0 {
                metric_chip(ui, "Outside", report.outside);
            }
        });
        ui.add_space(3.0);
    });
}

fn title_badge(ui: &mut egui::Ui, label: &str) {
    let text = egui::RichText::new(label)
        .strong()
        .color(egui::Color32::from_rgb(190, 220, 255));
    ui.label(text);
}

fn compact_group(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(heading)
                    .small()
                    .color(egui::Color32::from_rgb(150, 170, 185)),
            );
            add_contents(ui);
        });
    });
}

fn metric_chip(ui: &mut egui::Ui, key: &str, value: impl std::fmt::Display) {
    let text = egui::RichText::new(format!("{key}: {value}"))
        .small()
        .color(egui::Color32::from_rgb(205, 215, 225));
    ui.group(|ui| {
        ui.label(text);
    });
}

fn status_chip(ui: &mut egui::Ui, label: &str, color: egui::Color32) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(label).small().strong().color(color));
    });
}
