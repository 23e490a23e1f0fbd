use macroquad::math::{dvec3, DVec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{self, ConfigError};

/// The tank the flock lives in. Fixed for the lifetime of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Half extents per axis; the tank spans `[-bounds, bounds]`.
    #[serde(with = "serde_dvec3")]
    pub bounds: DVec3,
    pub time_step: f64,
    pub agent_count_target: u32,
    pub planar: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            bounds: dvec3(
                config::DEFAULT_BOUNDS[0],
                config::DEFAULT_BOUNDS[1],
                config::DEFAULT_BOUNDS[2],
            ),
            time_step: 1.0 / config::DEFAULT_FPS_TARGET,
            agent_count_target: config::DEFAULT_AGENT_COUNT,
            planar: false,
        }
    }
}

impl Environment {
    pub fn validate(&self) -> Result<(), ConfigError> {
        config::check_positive("environment.time_step", self.time_step)?;
        config::check_positive("environment.bounds.x", self.bounds.x)?;
        config::check_positive("environment.bounds.y", self.bounds.y)?;
        if self.planar {
            config::check_non_negative("environment.bounds.z", self.bounds.z)?;
        } else {
            config::check_positive("environment.bounds.z", self.bounds.z)?;
        }
        Ok(())
    }

    /// Uniform spawn position inside the tank. Planar tanks pin z to zero.
    pub fn random_position(&self, rng: &mut impl Rng) -> DVec3 {
        let x = rng.gen_range(-self.bounds.x..=self.bounds.x);
        let y = rng.gen_range(-self.bounds.y..=self.bounds.y);
        let z = if self.planar {
            0.0
        } else {
            rng.gen_range(-self.bounds.z..=self.bounds.z)
        };
        dvec3(x, y, z)
    }

    pub fn contains(&self, pos: DVec3) -> bool {
        pos.abs().cmple(self.bounds).all()
    }
}

/// `DVec3` as a plain `[x, y, z]` array in config files.
mod serde_dvec3 {
    use macroquad::math::DVec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &DVec3, s: S) -> Result<S::Ok, S::Error> {
        v.to_array().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DVec3, D::Error> {
        let arr = <[f64; 3]>::deserialize(d)?;
        Ok(DVec3::from_array(arr))
    }
}
