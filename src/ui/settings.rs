use egui;
use tracing::{info, warn};

use super::UiState;
use crate::config::{self, OscillatorConfig};

/// Settings panel. Edits go to the draft config; "Apply & rebuild" recreates the flock.
pub fn draw_settings(ctx: &egui::Context, ui_state: &mut UiState) {
    egui::Window::new("Settings")
        .default_pos(egui::pos2(20.0, 80.0))
        .default_size(egui::vec2(300.0, 480.0))
        .resizable(true)
        .show(ctx, |ui| {
            let draft = &mut ui_state.draft;

            ui.heading("Environment");
            drag_u32(ui, "Boid count", &mut draft.environment.agent_count_target, 0..=5000);
            ui.horizontal(|ui| {
                ui.label("Tank half size");
                ui.add(egui::DragValue::new(&mut draft.environment.bounds.x).speed(0.1).range(0.1..=200.0));
                ui.add(egui::DragValue::new(&mut draft.environment.bounds.y).speed(0.1).range(0.1..=200.0));
                ui.add(egui::DragValue::new(&mut draft.environment.bounds.z).speed(0.1).range(0.0..=200.0));
            });
            ui.checkbox(&mut draft.environment.planar, "2D tank");
            drag_f64(ui, "Ticks / second", &mut draft.fps_target, 1.0..=1000.0, 1.0);
            ui.horizontal(|ui| {
                ui.label(format!("Time step: {:.4}s", draft.environment.time_step));
                if ui.button("Match tick rate").clicked() {
                    draft.environment.time_step = 1.0 / draft.fps_target;
                }
            });
            ui.horizontal(|ui| {
                ui.label("Seed");
                ui.add(egui::DragValue::new(&mut draft.seed));
            });

            ui.separator();
            ui.heading("Boids");
            let behavior = &mut draft.behavior;
            drag_f64(ui, "Viewing range", &mut behavior.viewing_range, 0.0..=20.0, 0.01);
            drag_f64(ui, "Too close", &mut behavior.too_close, 0.0..=20.0, 0.01);
            drag_f64(ui, "Too far", &mut behavior.too_far, 0.0..=20.0, 0.01);
            drag_f64(ui, "Turn rate", &mut behavior.turn_rate, 0.0..=10.0, 0.01);
            drag_f64(ui, "Randomness", &mut behavior.noise_scale, 0.0..=2.0, 0.005);
            drag_f64(ui, "Speed", &mut behavior.speed, 0.0..=50.0, 0.1);

            ui.separator();
            ui.heading("Blinking");
            let mut blinking = draft.oscillator.is_some();
            if ui.checkbox(&mut blinking, "Blinking boids").changed() {
                draft.oscillator = blinking.then(OscillatorConfig::default);
            }
            if let Some(osc) = draft.oscillator.as_mut() {
                ui.add(egui::Slider::new(&mut osc.max_brightness, 0.0..=1.0).text("Max brightness"));
                ui.add(egui::Slider::new(&mut osc.min_brightness, 0.0..=1.0).text("Min brightness"));
                drag_f64(ui, "Accumulation rate", &mut osc.accumulation_rate, 0.0..=10.0, 0.01);
                drag_f64(ui, "Empathy", &mut osc.empathy_factor, 0.0..=1.0, 0.01);
                drag_f64(ui, "Color rate", &mut osc.color_accumulation_rate, 0.0..=360.0, 0.5);
                drag_f64(ui, "Color empathy", &mut osc.color_empathy_factor, 0.0..=360.0, 0.5);
                ui.add(egui::Slider::new(&mut osc.color_saturation, 0.0..=100.0).text("Saturation %"));
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Apply & rebuild").clicked() {
                    ui_state.rebuild_requested = true;
                }
                if ui.button("Save config").clicked() {
                    match ui_state.draft.save_to_file(config::CONFIG_SAVE_PATH) {
                        Ok(()) => info!(path = config::CONFIG_SAVE_PATH, "Saved configuration"),
                        Err(e) => {
                            warn!(error = %e, "Could not save configuration");
                            ui_state.last_error = Some(e.to_string());
                        }
                    }
                }
            });
            if let Some(err) = &ui_state.last_error {
                ui.colored_label(egui::Color32::from_rgb(255, 110, 110), err);
            }
        });
}

fn drag_f64(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut f64,
    range: std::ops::RangeInclusive<f64>,
    speed: f64,
) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).speed(speed).range(range));
    });
}

fn drag_u32(ui: &mut egui::Ui, label: &str, value: &mut u32, range: std::ops::RangeInclusive<u32>) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).range(range));
    });
}
