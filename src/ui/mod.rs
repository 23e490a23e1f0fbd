pub mod graphs;
pub mod settings;
pub mod toolbar;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::simulation::SimState;
use crate::stats::SimStats;

/// Which panels are open, plus the config being edited.
pub struct UiState {
    pub show_graphs: bool,
    pub show_settings: bool,
    pub step_requested: bool,
    /// Edited copy of the run config; applied only on rebuild.
    pub draft: AppConfig,
    pub rebuild_requested: bool,
    pub last_error: Option<String>,
}

impl UiState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            show_graphs: false,
            show_settings: false,
            step_requested: false,
            draft: config.clone(),
            rebuild_requested: false,
            last_error: None,
        }
    }
}

/// Draw all egui UI panels and handle a pending rebuild.
pub fn draw_ui(sim: &mut SimState, ui_state: &mut UiState, stats: &mut SimStats) {
    egui_macroquad::ui(|ctx| {
        toolbar::draw_toolbar(ctx, sim, ui_state);

        if ui_state.show_settings {
            settings::draw_settings(ctx, ui_state);
        }

        if ui_state.show_graphs {
            graphs::draw_graphs(ctx, stats);
        }
    });

    egui_macroquad::draw();

    if ui_state.rebuild_requested {
        ui_state.rebuild_requested = false;
        apply_draft(sim, ui_state, stats);
    }
}

/// Replace the running population with one built from the draft config.
pub fn apply_draft(sim: &mut SimState, ui_state: &mut UiState, stats: &mut SimStats) {
    match sim.rebuild(ui_state.draft.clone()) {
        Ok(()) => {
            info!(agents = sim.population().len(), "Rebuilt tank from settings");
            stats.reset();
            ui_state.last_error = None;
        }
        Err(e) => {
            warn!(error = %e, "Rejected settings");
            ui_state.last_error = Some(e.to_string());
        }
    }
}
