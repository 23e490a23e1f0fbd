use macroquad::color::Color;
use rand::Rng;

use crate::config::{self, OscillatorConfig};

/// Width of the brightness bump around the firing threshold, in excitement units.
const BLINK_WIDTH: f64 = 0.08;

/// Lightness used for emitted colours.
const EMISSION_LIGHTNESS: f64 = 0.5;

/// Excitement and colour phase of a blinking boid.
///
/// Both scalars grow every tick and fire once they reach their threshold. The
/// reset back to zero happens on the tick after the crossing, so neighbors get
/// one tick to see the armed value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorState {
    pub excitement: f64,
    /// Hue in degrees.
    pub phase: f64,
    pub blinked_last_tick: bool,
}

impl OscillatorState {
    pub fn new(excitement: f64, phase: f64) -> Self {
        Self {
            excitement,
            phase,
            blinked_last_tick: false,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(
            rng.gen_range(0.0..config::EXCITEMENT_THRESHOLD),
            rng.gen_range(0.0..config::PHASE_THRESHOLD),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Accumulating,
    /// At or past the threshold; resets on the next tick.
    Armed,
}

/// Growth and coupling parameters for one scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coupling {
    pub threshold: f64,
    pub rate: f64,
    /// Both the width of the "about to fire" window and the boost per neighbor.
    pub empathy: f64,
}

impl Coupling {
    pub fn excitement(cfg: &OscillatorConfig) -> Self {
        Self {
            threshold: config::EXCITEMENT_THRESHOLD,
            rate: cfg.accumulation_rate,
            empathy: cfg.empathy_factor,
        }
    }

    pub fn phase(cfg: &OscillatorConfig) -> Self {
        Self {
            threshold: config::PHASE_THRESHOLD,
            rate: cfg.color_accumulation_rate,
            empathy: cfg.color_empathy_factor,
        }
    }

    pub fn stage(&self, value: f64) -> Stage {
        if value >= self.threshold {
            Stage::Armed
        } else {
            Stage::Accumulating
        }
    }

    /// Own value close enough to the threshold to be pulled, but not yet armed.
    /// Sitting exactly `empathy` below the threshold is not enough.
    pub fn receptive(&self, value: f64) -> bool {
        value < self.threshold && self.threshold - value < self.empathy
    }

    /// A neighbor value that counts as firing: within `empathy` of the
    /// threshold, including an armed value still visible before its reset.
    pub fn firing(&self, value: f64) -> bool {
        value >= self.threshold - self.empathy
    }

    /// Next value from the pre-tick value of this boid and of its neighbors.
    /// A receptive boid gains `empathy` for every firing neighbor.
    pub fn advance(&self, value: f64, peers: &[f64], dt: f64) -> f64 {
        if self.stage(value) == Stage::Armed {
            return 0.0;
        }
        let mut next = value + dt * self.rate;
        if self.receptive(value) {
            let firing = peers.iter().filter(|&&p| self.firing(p)).count();
            next += self.empathy * firing as f64;
        }
        next
    }
}

/// Advance both scalars of one boid. `peers` are the neighbors' pre-tick states.
pub fn advance_oscillator(
    own: &OscillatorState,
    peers: &[OscillatorState],
    cfg: &OscillatorConfig,
    dt: f64,
) -> OscillatorState {
    let excitement = Coupling::excitement(cfg);
    let phase = Coupling::phase(cfg);

    let peer_excitement: Vec<f64> = peers.iter().map(|p| p.excitement).collect();
    let peer_phase: Vec<f64> = peers.iter().map(|p| p.phase).collect();

    OscillatorState {
        excitement: excitement.advance(own.excitement, &peer_excitement, dt),
        phase: phase.advance(own.phase, &peer_phase, dt),
        blinked_last_tick: excitement.stage(own.excitement) == Stage::Armed,
    }
}

/// Light a boid gives off, for the renderer only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emission {
    pub color: Color,
    pub intensity: f32,
}

/// Brightness peaks as excitement reaches the threshold and rests at `min_brightness`.
pub fn intensity(excitement: f64, cfg: &OscillatorConfig) -> f64 {
    let d = (excitement - config::EXCITEMENT_THRESHOLD) / BLINK_WIDTH;
    let bump = (-d * d).exp();
    let span = cfg.max_brightness - cfg.min_brightness;
    (cfg.min_brightness + span * bump).clamp(cfg.min_brightness, cfg.max_brightness)
}

pub fn emission(state: &OscillatorState, cfg: &OscillatorConfig) -> Emission {
    let (r, g, b) = hsl_to_rgb(
        state.phase,
        cfg.color_saturation / 100.0,
        EMISSION_LIGHTNESS,
    );
    Emission {
        color: Color::new(r as f32, g as f32, b as f32, 1.0),
        intensity: intensity(state.excitement, cfg) as f32,
    }
}

/// Hue in degrees, saturation and lightness in [0, 1].
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> OscillatorConfig {
        OscillatorConfig {
            accumulation_rate: 1.0,
            empathy_factor: 0.5,
            ..OscillatorConfig::default()
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn passive_growth_without_peers() {
        let c = Coupling::excitement(&cfg());
        assert!(close(c.advance(0.2, &[], 0.1), 0.3));
    }

    #[test]
    fn armed_value_resets_on_the_following_tick() {
        let c = Coupling::excitement(&cfg());
        let crossed = c.advance(0.96, &[], 0.1);
        assert_eq!(c.stage(crossed), Stage::Armed);
        assert_eq!(c.advance(crossed, &[0.9, 0.95], 0.1), 0.0);
    }

    #[test]
    fn receptive_boid_is_pulled_by_each_firing_neighbor() {
        let c = Coupling::excitement(&cfg());
        // own 0.6 is within 0.5 of firing; two of three peers are too
        let next = c.advance(0.6, &[0.7, 0.9, 0.2], 0.1);
        assert!(close(next, 0.6 + 0.1 + 2.0 * 0.5));
    }

    #[test]
    fn armed_neighbor_is_sensed_before_its_reset() {
        let c = Coupling::excitement(&cfg());
        assert!(close(c.advance(0.7, &[1.06], 0.1), 0.7 + 0.1 + 0.5));
    }

    #[test]
    fn window_edge_is_not_receptive() {
        let c = Coupling::excitement(&cfg());
        assert!(!c.receptive(0.5));
        assert!(c.receptive(0.51));
        assert!(close(c.advance(0.5, &[1.06, 0.9], 0.1), 0.6));
    }

    #[test]
    fn two_boid_synchrony_scenario() {
        let cfg = cfg();
        let dt = 0.1;
        let a = OscillatorState::new(0.96, 0.0);
        let b = OscillatorState::new(0.40, 0.0);

        let a1 = advance_oscillator(&a, &[b], &cfg, dt);
        let b1 = advance_oscillator(&b, &[a], &cfg, dt);
        assert!(a1.excitement >= 1.0);
        assert!(!a1.blinked_last_tick);
        assert!(close(b1.excitement, 0.40 + dt));

        let a2 = advance_oscillator(&a1, &[b1], &cfg, dt);
        let b2 = advance_oscillator(&b1, &[a1], &cfg, dt);
        assert_eq!(a2.excitement, 0.0);
        assert!(a2.blinked_last_tick);
        assert!(close(b2.excitement, 0.40 + 2.0 * dt));
    }

    #[test]
    fn phase_wraps_after_a_full_turn() {
        let cfg = OscillatorConfig::default();
        let s = OscillatorState::new(0.0, 359.99);
        let crossed = advance_oscillator(&s, &[], &cfg, 1.0);
        assert!(crossed.phase >= 360.0);
        assert_eq!(advance_oscillator(&crossed, &[], &cfg, 1.0).phase, 0.0);
    }

    #[test]
    fn intensity_peaks_at_threshold_within_bounds() {
        let cfg = OscillatorConfig::default();
        assert!(close(intensity(1.0, &cfg), cfg.max_brightness));
        for e in [0.0, 0.3, 0.9, 1.05, 2.0] {
            let i = intensity(e, &cfg);
            assert!(i >= cfg.min_brightness && i <= cfg.max_brightness);
        }
        assert!(intensity(0.2, &cfg) < intensity(0.95, &cfg));
    }

    #[test]
    fn hsl_primaries() {
        let (r, g, b) = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!(close(r, 1.0) && close(g, 0.0) && close(b, 0.0));
        let (r, g, b) = hsl_to_rgb(120.0, 1.0, 0.5);
        assert!(close(r, 0.0) && close(g, 1.0) && close(b, 0.0));
        let (r, g, b) = hsl_to_rgb(240.0, 0.0, 0.5);
        assert!(close(r, 0.5) && close(g, 0.5) && close(b, 0.5));
    }
}
