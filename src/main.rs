use macroquad::prelude::*;
use tracing::{error, info};

mod camera;
mod config;
mod entity;
mod flocking;
mod math;
mod neighbors;
mod physics;
mod renderer;
mod signals;
mod simulation;
mod stats;
mod ui;
mod world;

use camera::CameraController;
use config::AppConfig;
use simulation::SimState;
use stats::SimStats;
use ui::UiState;

fn window_conf() -> Conf {
    Conf {
        window_title: "Boid Tank".to_string(),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// First command line argument, if any, is a JSON config file.
fn load_config() -> Result<AppConfig, config::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = AppConfig::load_from_file(&path)?;
            info!(%path, "Loaded configuration");
            Ok(config)
        }
        None => Ok(AppConfig::default()),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let mut sim = match load_config().and_then(SimState::new) {
        Ok(sim) => sim,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return;
        }
    };

    let mut camera = CameraController::framing(sim.environment().bounds.as_vec3());
    let mut ui_state = UiState::new(sim.config());
    let mut sim_stats = SimStats::new(config::STATS_CAPACITY);
    let mut accumulator = 0.0f64;

    loop {
        let frame_time = get_frame_time() as f64;
        // Tick cadence is wall-clock; the simulated step is always time_step.
        let tick_interval = 1.0 / sim.config().fps_target;

        if !sim.paused {
            accumulator += frame_time.min(0.1);
            while accumulator >= tick_interval {
                let report = sim.tick();
                sim_stats.record(&report);
                accumulator -= tick_interval;
            }
        } else {
            accumulator = 0.0;
            if ui_state.step_requested {
                let report = sim.tick();
                sim_stats.record(&report);
            }
        }
        ui_state.step_requested = false;

        if is_key_pressed(KeyCode::Space) {
            sim.paused = !sim.paused;
        }
        if is_key_pressed(KeyCode::R) {
            ui_state.rebuild_requested = true;
        }

        let mut egui_wants_pointer = false;
        egui_macroquad::cfg(|ctx| {
            egui_wants_pointer = ctx.wants_pointer_input();
        });
        camera.update(get_frame_time(), !egui_wants_pointer);

        renderer::draw(&sim, &camera);

        ui::draw_ui(&mut sim, &mut ui_state, &mut sim_stats);

        next_frame().await;
    }
}
