use std::f64::consts::TAU;

use macroquad::math::DVec3;
use rand::Rng;

use crate::config::BehaviorConfig;
use crate::entity::AgentPose;
use crate::math::{self, AxisAngle};

/// Which steering rule decided a boid's heading this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Nobody in sight; keep course.
    Drift,
    Separation,
    Cohesion,
    Alignment,
}

impl Rule {
    pub const ALL: [Rule; 4] = [Rule::Drift, Rule::Separation, Rule::Cohesion, Rule::Alignment];

    pub fn label(self) -> &'static str {
        match self {
            Rule::Drift => "drift",
            Rule::Separation => "separation",
            Rule::Cohesion => "cohesion",
            Rule::Alignment => "alignment",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Rule::Drift => 0,
            Rule::Separation => 1,
            Rule::Cohesion => 2,
            Rule::Alignment => 3,
        }
    }
}

/// Result of the steering decision, before noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    pub orientation: AxisAngle,
    pub rule: Rule,
}

/// Mean pose of the visible peers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeerAggregate {
    pub position: DVec3,
    /// Normalized sum of peer axes; `None` when the axes cancel out.
    pub axis: Option<DVec3>,
    pub angle: f64,
}

/// Average the peers listed in `neighbors`. Divides by the number of peers
/// actually accumulated. Returns `None` for an empty set.
pub fn aggregate(snapshot: &[AgentPose], neighbors: &[usize]) -> Option<PeerAggregate> {
    let mut count = 0usize;
    let mut position = DVec3::ZERO;
    let mut axis = DVec3::ZERO;
    let mut angle = 0.0;

    for pose in neighbors.iter().filter_map(|&idx| snapshot.get(idx)) {
        position += pose.position;
        axis += pose.orientation.axis;
        angle += pose.orientation.angle;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    let inv = 1.0 / count as f64;
    Some(PeerAggregate {
        position: position * inv,
        axis: axis.try_normalize(),
        angle: angle * inv,
    })
}

/// Pick exactly one rule from the distance to the group's centre:
/// too close steers away, too far steers in, otherwise adopt the group heading.
pub fn compute_orientation(
    pose: &AgentPose,
    snapshot: &[AgentPose],
    neighbors: &[usize],
    cfg: &BehaviorConfig,
    dt: f64,
) -> Steering {
    let current = pose.orientation;
    let Some(group) = aggregate(snapshot, neighbors) else {
        return Steering {
            orientation: current,
            rule: Rule::Drift,
        };
    };

    let to_peers = group.position - pose.position;
    let dist = to_peers.length();
    let toward = math::normalize_or(to_peers, current.axis);
    let turn = cfg.turn_rate * dt;

    if dist < cfg.too_close {
        let away = if to_peers == DVec3::ZERO {
            current.axis
        } else {
            -toward
        };
        Steering {
            orientation: AxisAngle::new(math::lerp(current.axis, away, turn), current.angle),
            rule: Rule::Separation,
        }
    } else if dist > cfg.too_far {
        Steering {
            orientation: AxisAngle::new(math::lerp(current.axis, toward, turn), current.angle),
            rule: Rule::Cohesion,
        }
    } else {
        Steering {
            orientation: AxisAngle::new(group.axis.unwrap_or(current.axis), group.angle),
            rule: Rule::Alignment,
        }
    }
}

/// Perturb a heading: the axis gets a random vector of length `noise_scale`
/// and is renormalized (a zero result keeps `previous_axis`); the angle moves by
/// up to `noise_scale * 2π` and is wrapped into [0, 2π).
pub fn apply_noise(
    orientation: AxisAngle,
    previous_axis: DVec3,
    noise_scale: f64,
    planar: bool,
    rng: &mut impl Rng,
) -> AxisAngle {
    let noisy = orientation.axis + math::random_vector(rng, noise_scale, planar);
    let fallback = math::normalize_or(orientation.axis, previous_axis);
    let axis = math::normalize_or(noisy, fallback);
    let angle = math::wrap_angle(orientation.angle + math::random_symmetric(rng, noise_scale * TAU));
    AxisAngle { axis, angle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::dvec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pose(position: DVec3, axis: DVec3, angle: f64) -> AgentPose {
        AgentPose {
            position,
            orientation: AxisAngle::new(axis, angle),
        }
    }

    fn cfg() -> BehaviorConfig {
        BehaviorConfig {
            viewing_range: 1.0,
            too_close: 0.05,
            too_far: 0.5,
            turn_rate: 1.0,
            noise_scale: 0.0,
            speed: 1.0,
        }
    }

    #[test]
    fn lone_boid_keeps_course() {
        let me = pose(DVec3::ZERO, DVec3::Y, 1.0);
        let steering = compute_orientation(&me, &[me], &[], &cfg(), 0.1);
        assert_eq!(steering.rule, Rule::Drift);
        assert_eq!(steering.orientation, me.orientation);
    }

    #[test]
    fn three_boid_scenario_selects_branches_by_literal_thresholds() {
        let snapshot = vec![
            pose(dvec3(0.0, 0.0, 0.0), DVec3::X, 0.5),
            pose(dvec3(0.1, 0.0, 0.0), DVec3::Y, 1.5),
            pose(dvec3(10.0, 0.0, 0.0), DVec3::Z, 2.0),
        ];
        let cfg = cfg();
        let neighbors = crate::neighbors::NeighborSets::compute(&snapshot, cfg.viewing_range);

        let first = compute_orientation(&snapshot[0], &snapshot, neighbors.of(0), &cfg, 0.1);
        assert_eq!(first.rule, Rule::Alignment);
        assert_eq!(first.orientation, AxisAngle::new(DVec3::Y, 1.5));

        let second = compute_orientation(&snapshot[1], &snapshot, neighbors.of(1), &cfg, 0.1);
        assert_eq!(second.rule, Rule::Alignment);
        assert_eq!(second.orientation, AxisAngle::new(DVec3::X, 0.5));

        let third = compute_orientation(&snapshot[2], &snapshot, neighbors.of(2), &cfg, 0.1);
        assert_eq!(third.rule, Rule::Drift);
        assert_eq!(third.orientation, snapshot[2].orientation);
    }

    #[test]
    fn separation_turns_away_from_the_group() {
        let cfg = BehaviorConfig {
            too_close: 0.5,
            too_far: 0.8,
            ..cfg()
        };
        // heading straight at the peer; a full turn per tick
        let me = pose(DVec3::ZERO, DVec3::X, 0.0);
        let peer = pose(dvec3(0.2, 0.1, 0.0), DVec3::X, 0.0);
        let snapshot = [me, peer];
        let steering = compute_orientation(&me, &snapshot, &[1], &cfg, 1.0);

        assert_eq!(steering.rule, Rule::Separation);
        let to_peers = peer.position - me.position;
        assert!(steering.orientation.axis.dot(-to_peers) >= 0.0);
    }

    #[test]
    fn partial_turn_is_bounded_by_turn_rate() {
        let cfg = BehaviorConfig {
            too_close: 0.05,
            too_far: 0.5,
            turn_rate: 2.0,
            ..cfg()
        };
        let me = pose(DVec3::ZERO, DVec3::X, 0.0);
        let peer = pose(dvec3(0.0, 0.9, 0.0), DVec3::X, 0.0);
        let steering = compute_orientation(&me, &[me, peer], &[1], &cfg, 0.1);

        assert_eq!(steering.rule, Rule::Cohesion);
        let axis = steering.orientation.axis;
        assert!((axis.x - 0.8).abs() < 1e-12);
        assert!((axis.y - 0.2).abs() < 1e-12);
    }

    #[test]
    fn cancelling_axes_fall_back_to_own_axis() {
        let me = pose(DVec3::ZERO, DVec3::Z, 0.3);
        let a = pose(dvec3(0.2, 0.0, 0.0), DVec3::X, 1.0);
        let b = pose(dvec3(-0.2, 0.2, 0.0), -DVec3::X, 2.0);
        let snapshot = [me, a, b];
        let steering = compute_orientation(&me, &snapshot, &[1, 2], &cfg(), 0.1);

        assert_eq!(steering.rule, Rule::Alignment);
        assert_eq!(steering.orientation.axis, DVec3::Z);
        assert!((steering.orientation.angle - 1.5).abs() < 1e-12);
    }

    #[test]
    fn aggregate_divides_by_accumulated_peers() {
        let snapshot = [
            pose(dvec3(1.0, 0.0, 0.0), DVec3::X, 1.0),
            pose(dvec3(3.0, 0.0, 0.0), DVec3::X, 3.0),
        ];
        // an index past the snapshot is not counted
        let group = aggregate(&snapshot, &[0, 1, 7]).unwrap();
        assert_eq!(group.position, dvec3(2.0, 0.0, 0.0));
        assert_eq!(group.angle, 2.0);
        assert_eq!(group.axis, Some(DVec3::X));
        assert!(aggregate(&snapshot, &[]).is_none());
    }

    #[test]
    fn noise_keeps_unit_axis_and_wrapped_angle() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let start = AxisAngle::new(dvec3(0.0, 0.6, 0.8), 6.2);
        for _ in 0..200 {
            let noisy = apply_noise(start, start.axis, 0.3, false, &mut rng);
            assert!((noisy.axis.length() - 1.0).abs() < 1e-9);
            assert!((0.0..TAU).contains(&noisy.angle));
        }
    }

    #[test]
    fn zero_axis_without_noise_keeps_previous_axis() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let degenerate = AxisAngle::new(DVec3::ZERO, 1.0);
        let out = apply_noise(degenerate, DVec3::Y, 0.0, false, &mut rng);
        assert_eq!(out.axis, DVec3::Y);
        assert_eq!(out.angle, 1.0);
    }

    #[test]
    fn planar_noise_stays_in_plane() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let start = AxisAngle::new(DVec3::X, 0.0);
        for _ in 0..50 {
            assert_eq!(apply_noise(start, DVec3::X, 0.5, true, &mut rng).axis.z, 0.0);
        }
    }
}
