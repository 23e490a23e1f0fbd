use macroquad::math::DVec3;
use rand::Rng;

use crate::math::{self, AxisAngle};
use crate::signals::OscillatorState;
use crate::world::Environment;

#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub id: u32,
    pub position: DVec3,
    pub orientation: AxisAngle,
    /// Present only for blinking boids.
    pub oscillator: Option<OscillatorState>,
}

impl Agent {
    pub fn pose(&self) -> AgentPose {
        AgentPose {
            position: self.position,
            orientation: self.orientation,
        }
    }
}

/// Read-only view of an agent frozen at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentPose {
    pub position: DVec3,
    pub orientation: AxisAngle,
}

/// Ordered agent storage. Ids start at 1 and only ever grow within a population.
#[derive(Clone, Debug)]
pub struct Population {
    agents: Vec<Agent>,
    next_id: u32,
}

impl Default for Population {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl Population {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            agents: Vec::with_capacity(capacity),
            next_id: 1,
        }
    }

    pub fn spawn(
        &mut self,
        position: DVec3,
        orientation: AxisAngle,
        oscillator: Option<OscillatorState>,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.agents.push(Agent {
            id,
            position,
            orientation,
            oscillator,
        });
        id
    }

    /// Spawn an agent at a random position and heading inside the tank.
    pub fn spawn_random(
        &mut self,
        env: &Environment,
        blinking: bool,
        rng: &mut impl Rng,
    ) -> u32 {
        let position = env.random_position(rng);
        let orientation = math::random_orientation(rng, env.planar);
        let oscillator = blinking.then(|| OscillatorState::random(rng));
        self.spawn(position, orientation, oscillator)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Poses of every agent, in population order.
    pub fn poses(&self) -> Vec<AgentPose> {
        self.agents.iter().map(Agent::pose).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::dvec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn heading() -> AxisAngle {
        AxisAngle::new(DVec3::X, 0.0)
    }

    #[test]
    fn ids_increase_monotonically() {
        let mut pop = Population::default();
        let a = pop.spawn(DVec3::ZERO, heading(), None);
        let b = pop.spawn(dvec3(1.0, 0.0, 0.0), heading(), None);
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.agents()[1].position.x, 1.0);
    }

    #[test]
    fn random_spawn_has_unit_axis_and_optional_oscillator() {
        let env = Environment::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut pop = Population::default();
        pop.spawn_random(&env, false, &mut rng);
        pop.spawn_random(&env, true, &mut rng);

        let agents = pop.agents();
        assert!(agents[0].oscillator.is_none());
        assert!(agents[1].oscillator.is_some());
        for agent in agents {
            assert!((agent.orientation.axis.length() - 1.0).abs() < 1e-9);
            assert!(env.contains(agent.position));
        }
    }
}
