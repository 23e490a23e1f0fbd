use macroquad::prelude::*;

use crate::camera::CameraController;
use crate::simulation::{BoidSnapshot, SimState};

const BG_COLOR: Color = Color::new(0.02, 0.03, 0.08, 1.0);
const TANK_COLOR: Color = Color::new(0.35, 0.45, 0.6, 0.5);
const BOID_COLOR: Color = Color::new(1.0, 0.5, 0.3, 1.0);
const BOID_RADIUS: f32 = 0.08;
const HEADING_LENGTH: f32 = 0.3;

/// Draw the tank and every boid from the simulation's render snapshots.
pub fn draw(sim: &SimState, camera: &CameraController) {
    clear_background(BG_COLOR);
    set_camera(&camera.to_macroquad_camera());

    let bounds = sim.environment().bounds.as_vec3();
    draw_tank(bounds, sim.environment().planar);

    for boid in sim.snapshots() {
        draw_boid(&boid);
    }

    set_default_camera();
}

fn draw_tank(bounds: Vec3, planar: bool) {
    if planar {
        let (x, y) = (bounds.x, bounds.y);
        let corners = [
            vec3(-x, -y, 0.0),
            vec3(x, -y, 0.0),
            vec3(x, y, 0.0),
            vec3(-x, y, 0.0),
        ];
        for i in 0..corners.len() {
            draw_line_3d(corners[i], corners[(i + 1) % corners.len()], TANK_COLOR);
        }
    } else {
        draw_cube_wires(Vec3::ZERO, bounds * 2.0, TANK_COLOR);
    }
}

fn boid_color(boid: &BoidSnapshot) -> Color {
    match boid.emission {
        Some(emission) => Color::new(
            emission.color.r * emission.intensity,
            emission.color.g * emission.intensity,
            emission.color.b * emission.intensity,
            1.0,
        ),
        None => BOID_COLOR,
    }
}

fn draw_boid(boid: &BoidSnapshot) {
    let pos = boid.position.as_vec3();
    let heading = boid.orientation.axis.as_vec3();
    let color = boid_color(boid);
    draw_sphere(pos, BOID_RADIUS, None, color);
    draw_line_3d(pos, pos + heading * HEADING_LENGTH, color);
}
