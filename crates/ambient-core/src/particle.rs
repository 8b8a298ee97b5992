//! Per-particle kinematic state and the store that owns it.
//!
//! A store is built once per mount from a caller-supplied generator, so the
//! same seed always yields the same field. Only `position` and `wobble_phase`
//! change after construction.

use crate::config::ParticleRanges;
use glam::Vec2;
use rand::Rng;

/// A single drifting point.
///
/// Fields:
/// - `position`: normalized coordinates, both axes in [0, 1)
/// - `radius`: disc radius, fixed, strictly positive
/// - `opacity`: draw alpha in (0, 1], fixed
/// - `drift_x`: gentle left/right bias applied every tick in continuous-fall mode
/// - `fall_rate`: intrinsic downward speed used by continuous-fall mode
/// - `scroll_boost`: per-particle weight of the scroll-driven fall boost
/// - `wobble_*`: lateral oscillation used by continuous-fall mode
/// - `scroll_sensitivity`: how strongly the particle follows scroll displacement
/// - `x_parallax`: horizontal share of the vertical scroll displacement
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub drift_x: f32,
    pub fall_rate: f32,
    pub scroll_boost: f32,
    pub wobble_phase: f32,
    pub wobble_frequency: f32,
    pub wobble_amplitude: f32,
    pub scroll_sensitivity: f32,
    pub x_parallax: f32,
}

impl Particle {
    pub fn generate<R: Rng>(rng: &mut R, ranges: &ParticleRanges) -> Self {
        let position = Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
        let radius = rng.gen_range(ranges.radius.clone()).max(f32::MIN_POSITIVE);
        let opacity = rng
            .gen_range(ranges.opacity.clone())
            .clamp(f32::MIN_POSITIVE, 1.0);
        let fall_rate = rng.gen_range(ranges.fall_rate.clone());
        let drift_x = rng.gen_range(ranges.drift_x.clone());
        let scroll_boost = rng.gen_range(ranges.scroll_boost.clone());
        let wobble_amplitude = rng.gen_range(ranges.wobble_amplitude.clone());
        let wobble_frequency = rng.gen_range(ranges.wobble_frequency.clone());
        let wobble_phase = rng.gen_range(ranges.wobble_phase.clone());
        let scroll_sensitivity = rng.gen_range(ranges.scroll_factor.clone());
        let x_parallax = rng.gen_range(ranges.x_parallax.clone());
        Particle {
            position,
            radius,
            opacity,
            drift_x,
            fall_rate,
            scroll_boost,
            wobble_phase,
            wobble_frequency,
            wobble_amplitude,
            scroll_sensitivity,
            x_parallax,
        }
    }
}

/// Fixed-size set of particles for one mounted field.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn generate<R: Rng>(count: usize, ranges: &ParticleRanges, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| Particle::generate(rng, ranges)).collect();
        Self { particles }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Mutable access for the simulation step. The slice cannot grow or shrink.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.position).collect()
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
