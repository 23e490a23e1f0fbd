use macroquad::math::DVec3;

use crate::world::Environment;

/// Position after one tick, and the heading axis after any wall bounces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub position: DVec3,
    pub axis: DVec3,
}

/// Move along `axis` by `speed * dt`. Walls do not clamp the position; instead,
/// any axis component carrying the boid past a wall is turned back inward, so a
/// boid may end a tick slightly outside and returns on the next one.
pub fn compute_position(position: DVec3, axis: DVec3, speed: f64, env: &Environment) -> Motion {
    let next = position + axis * (speed * env.time_step);
    let mut axis = axis;
    for i in 0..3 {
        if next[i] > env.bounds[i] {
            axis[i] = -axis[i].abs();
        } else if next[i] < -env.bounds[i] {
            axis[i] = axis[i].abs();
        }
    }
    Motion {
        position: next,
        axis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::dvec3;

    fn env() -> Environment {
        Environment {
            bounds: dvec3(1.0, 1.0, 1.0),
            time_step: 0.1,
            agent_count_target: 1,
            planar: false,
        }
    }

    #[test]
    fn moves_along_axis() {
        let m = compute_position(DVec3::ZERO, DVec3::X, 2.0, &env());
        assert!((m.position.x - 0.2).abs() < 1e-12);
        assert_eq!(m.axis, DVec3::X);
    }

    #[test]
    fn crossing_a_wall_flips_only_that_component() {
        let axis = dvec3(0.6, 0.8, 0.0);
        let m = compute_position(dvec3(0.99, 0.0, 0.0), axis, 1.0, &env());
        assert!(m.position.x > 1.0);
        assert_eq!(m.axis, dvec3(-0.6, 0.8, 0.0));
    }

    #[test]
    fn negative_wall_points_heading_back_inside() {
        let axis = dvec3(0.0, 0.0, -1.0);
        let m = compute_position(dvec3(0.0, 0.0, -0.95), axis, 1.0, &env());
        assert!(m.position.z < -1.0);
        assert_eq!(m.axis, DVec3::Z);
    }

    #[test]
    fn already_returning_boid_keeps_inward_heading() {
        // outside the wall but heading back in: nothing to flip
        let axis = dvec3(-1.0, 0.0, 0.0);
        let m = compute_position(dvec3(1.5, 0.0, 0.0), axis, 1.0, &env());
        assert!(m.position.x > 1.0);
        assert_eq!(m.axis, axis);
    }
}
