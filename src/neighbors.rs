use crate::entity::AgentPose;

/// Indices of every agent other than `index` strictly closer than `viewing_range`.
/// Exhaustive scan over the snapshot, in population order.
pub fn visible_peers(snapshot: &[AgentPose], index: usize, viewing_range: f64) -> Vec<usize> {
    let origin = snapshot[index].position;
    snapshot
        .iter()
        .enumerate()
        .filter(|&(other, pose)| {
            other != index && origin.distance(pose.position) < viewing_range
        })
        .map(|(other, _)| other)
        .collect()
}

/// Neighbor sets for a whole tick, taken before any agent moves.
pub struct NeighborSets {
    sets: Vec<Vec<usize>>,
}

impl NeighborSets {
    pub fn compute(snapshot: &[AgentPose], viewing_range: f64) -> Self {
        let sets = (0..snapshot.len())
            .map(|idx| visible_peers(snapshot, idx, viewing_range))
            .collect();
        Self { sets }
    }

    pub fn of(&self, index: usize) -> &[usize] {
        self.sets.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::AxisAngle;
    use macroquad::math::{dvec3, DVec3};

    fn pose(x: f64) -> AgentPose {
        AgentPose {
            position: dvec3(x, 0.0, 0.0),
            orientation: AxisAngle::new(DVec3::X, 0.0),
        }
    }

    #[test]
    fn excludes_self_and_distant_agents() {
        let snapshot = vec![pose(0.0), pose(0.1), pose(10.0)];
        assert_eq!(visible_peers(&snapshot, 0, 1.0), vec![1]);
        assert_eq!(visible_peers(&snapshot, 1, 1.0), vec![0]);
        assert!(visible_peers(&snapshot, 2, 1.0).is_empty());
    }

    #[test]
    fn range_is_strict() {
        let snapshot = vec![pose(0.0), pose(1.0)];
        assert!(visible_peers(&snapshot, 0, 1.0).is_empty());
        assert_eq!(visible_peers(&snapshot, 0, 1.0 + 1e-9), vec![1]);
    }

    #[test]
    fn coincident_agents_see_each_other() {
        let snapshot = vec![pose(2.0), pose(2.0)];
        let sets = NeighborSets::compute(&snapshot, 0.5);
        assert_eq!(sets.of(0), &[1]);
        assert_eq!(sets.of(1), &[0]);
        assert!(sets.of(5).is_empty());
    }
}
