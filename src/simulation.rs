use macroquad::math::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::{AppConfig, ConfigError, OscillatorConfig};
use crate::entity::{Agent, Population};
use crate::flocking::{self, Rule};
use crate::math::AxisAngle;
use crate::neighbors::NeighborSets;
use crate::physics;
use crate::signals::{self, Emission, OscillatorState};
use crate::world::Environment;

/// What the renderer gets for each boid, once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoidSnapshot {
    pub id: u32,
    pub position: DVec3,
    pub orientation: AxisAngle,
    pub emission: Option<Emission>,
}

/// Summary of a single tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Boids per steering rule, indexed by `Rule::index`.
    pub rule_counts: [usize; 4],
    /// Boids whose excitement reset this tick.
    pub blinks: usize,
    /// Length of the mean heading axis: 1 when everyone agrees, near 0 when scattered.
    pub polarization: f64,
    /// Boids sitting past a wall after this tick; they head back in on the next one.
    pub outside: usize,
}

impl TickReport {
    pub fn count(&self, rule: Rule) -> usize {
        self.rule_counts[rule.index()]
    }
}

/// Owns the population and the random source for one run.
pub struct SimState {
    config: AppConfig,
    population: Population,
    rng: ChaCha8Rng,
    pub tick_count: u64,
    pub paused: bool,
    pub last_report: TickReport,
}

impl SimState {
    /// Validate `config` and spawn `agent_count_target` boids at random.
    /// Nothing is created when validation fails.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let population = spawn_population(&config, &mut rng);
        info!(
            agents = population.len(),
            blinking = config.oscillator.is_some(),
            seed = config.seed,
            "Built boid population"
        );
        Ok(Self::assemble(config, population, rng))
    }

    /// Run with a caller-provided population, e.g. a hand-placed scenario.
    pub fn with_population(config: AppConfig, population: Population) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self::assemble(config, population, rng))
    }

    fn assemble(config: AppConfig, population: Population, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            population,
            rng,
            tick_count: 0,
            paused: false,
            last_report: TickReport::default(),
        }
    }

    /// Tear down the population and build a fresh one from `config`.
    /// On error the current run is left untouched.
    pub fn rebuild(&mut self, config: AppConfig) -> Result<(), ConfigError> {
        let paused = self.paused;
        *self = Self::new(config)?;
        self.paused = paused;
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.config.environment
    }

    pub fn oscillator(&self) -> Option<&OscillatorConfig> {
        self.config.oscillator.as_ref()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Advance every boid by one time step.
    ///
    /// Neighbor sets and oscillator values are frozen before any boid is
    /// touched, so iteration order never leaks into the result.
    pub fn tick(&mut self) -> TickReport {
        let env = &self.config.environment;
        let behavior = &self.config.behavior;
        let dt = env.time_step;

        let snapshot = self.population.poses();
        let neighbors = NeighborSets::compute(&snapshot, behavior.viewing_range);
        let oscillators: Vec<Option<OscillatorState>> = self
            .population
            .agents()
            .iter()
            .map(|a| a.oscillator)
            .collect();

        let mut report = TickReport {
            tick: self.tick_count + 1,
            ..TickReport::default()
        };

        for (idx, agent) in self.population.agents_mut().iter_mut().enumerate() {
            let peers = neighbors.of(idx);

            let steering =
                flocking::compute_orientation(&snapshot[idx], &snapshot, peers, behavior, dt);
            report.rule_counts[steering.rule.index()] += 1;

            let orientation = flocking::apply_noise(
                steering.orientation,
                agent.orientation.axis,
                behavior.noise_scale,
                env.planar,
                &mut self.rng,
            );

            let motion =
                physics::compute_position(agent.position, orientation.axis, behavior.speed, env);
            agent.position = motion.position;
            agent.orientation = AxisAngle::new(motion.axis, orientation.angle);
            if !env.contains(agent.position) {
                report.outside += 1;
            }

            let coupling = agent.oscillator.as_mut().zip(self.config.oscillator.as_ref());
            if let Some((state, osc)) = coupling {
                let peer_states: Vec<OscillatorState> =
                    peers.iter().filter_map(|&j| oscillators[j]).collect();
                *state = signals::advance_oscillator(state, &peer_states, osc, dt);
                if state.blinked_last_tick {
                    report.blinks += 1;
                }
            }
        }

        report.polarization = polarization(self.population.agents());
        self.tick_count += 1;

        debug!(
            tick = report.tick,
            drift = report.count(Rule::Drift),
            separation = report.count(Rule::Separation),
            cohesion = report.count(Rule::Cohesion),
            alignment = report.count(Rule::Alignment),
            blinks = report.blinks,
            polarization = report.polarization,
            outside = report.outside,
            "Tick complete"
        );

        self.last_report = report.clone();
        report
    }

    /// Read-only view for the renderer.
    pub fn snapshots(&self) -> Vec<BoidSnapshot> {
        let osc = self.config.oscillator.as_ref();
        self.population
            .agents()
            .iter()
            .map(|agent| BoidSnapshot {
                id: agent.id,
                position: agent.position,
                orientation: agent.orientation,
                emission: agent
                    .oscillator
                    .as_ref()
                    .zip(osc)
                    .map(|(state, cfg)| signals::emission(state, cfg)),
            })
            .collect()
    }
}

fn spawn_population(config: &AppConfig, rng: &mut ChaCha8Rng) -> Population {
    let env = &config.environment;
    let count = env.agent_count_target as usize;
    let blinking = config.oscillator.is_some();
    let mut population = Population::with_capacity(count);
    for _ in 0..count {
        population.spawn_random(env, blinking, rng);
    }
    population
}

fn polarization(agents: &[Agent]) -> f64 {
    if agents.is_empty() {
        return 0.0;
    }
    let sum: DVec3 = agents.iter().map(|a| a.orientation.axis).sum();
    sum.length() / agents.len() as f64
}
