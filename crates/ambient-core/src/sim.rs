use crate::config::{FallTuning, MotionMode};
use crate::constants::{BOOST_SCALE, WOBBLE_AMPLITUDE_SCALE, WOBBLE_TIME_STEP};
use crate::particle::{Particle, ParticleStore};
use std::f32::consts::TAU;

/// What the input coupler hands to one simulation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepInput {
    /// Discrete mode: scroll displacement since the last tick as a fraction
    /// of the viewport height.
    Displacement(f32),
    /// Continuous-fall mode: normalized scroll velocity in [-1, 1].
    Boost(f32),
}

/// Wrap a coordinate into [0, 1), keeping the overflow amount.
///
/// Values already in range are returned unchanged, bit for bit.
#[inline]
pub fn wrap_unit(v: f32) -> f32 {
    if !v.is_finite() {
        return 0.0;
    }
    let w = v - v.floor();
    // tiny negatives round up to exactly 1.0
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

/// Advance every particle by one tick under the given motion mode.
pub fn step(store: &mut ParticleStore, mode: &MotionMode, input: StepInput) {
    match (mode, input) {
        (MotionMode::Discrete, StepInput::Displacement(d)) => {
            for p in store.particles_mut() {
                step_discrete(p, d);
            }
        }
        (MotionMode::ContinuousFall(tuning), StepInput::Boost(b)) => {
            for p in store.particles_mut() {
                step_fall(p, tuning, b);
            }
        }
        (mode, input) => {
            log::warn!("step input {:?} does not match motion mode {:?}", input, mode);
        }
    }
}

#[inline]
fn step_discrete(p: &mut Particle, displacement: f32) {
    p.position.x = wrap_unit(p.position.x + displacement * p.x_parallax);
    p.position.y = wrap_unit(p.position.y + displacement * p.scroll_sensitivity);
}

#[inline]
fn step_fall(p: &mut Particle, tuning: &FallTuning, boost: f32) {
    // Kept within one period; an unbounded f32 phase stops advancing.
    p.wobble_phase = (p.wobble_phase + p.wobble_frequency * WOBBLE_TIME_STEP).rem_euclid(TAU);
    // Scrolling up never slows or reverses the fall.
    let accel =
        p.fall_rate * tuning.speed + boost.max(0.0) * p.scroll_boost * BOOST_SCALE * tuning.boost;
    p.position.y = wrap_unit(p.position.y + accel);
    p.position.x = wrap_unit(
        p.position.x + p.drift_x + p.wobble_phase.sin() * p.wobble_amplitude * WOBBLE_AMPLITUDE_SCALE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            radius: 1.0,
            opacity: 1.0,
            drift_x: 0.0,
            fall_rate: 0.004,
            scroll_boost: 0.05,
            wobble_phase: 0.0,
            wobble_frequency: 0.0,
            wobble_amplitude: 0.0,
            scroll_sensitivity: 0.5,
            x_parallax: 0.1,
        }
    }

    #[test]
    fn wrap_unit_handles_edges_and_large_values() {
        assert_eq!(wrap_unit(0.0), 0.0);
        assert_eq!(wrap_unit(0.25), 0.25);
        assert_eq!(wrap_unit(1.0), 0.0);
        assert!((wrap_unit(1.25) - 0.25).abs() < 1e-6);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
        assert!((wrap_unit(7.5) - 0.5).abs() < 1e-6);
        assert!((wrap_unit(-3.75) - 0.25).abs() < 1e-6);
        assert_eq!(wrap_unit(-1e-9), 0.0);
        assert_eq!(wrap_unit(f32::NAN), 0.0);
    }

    #[test]
    fn discrete_moves_by_sensitivity_and_parallax() {
        let mut store = ParticleStore::from_particles(vec![particle_at(0.5, 0.5)]);
        step(&mut store, &MotionMode::Discrete, StepInput::Displacement(0.2));
        let p = store.iter().next().unwrap().position;
        assert!((p.y - 0.6).abs() < 1e-6);
        assert!((p.x - 0.52).abs() < 1e-6);
    }

    #[test]
    fn discrete_wraps_bottom_to_top_preserving_overflow() {
        let mut store = ParticleStore::from_particles(vec![particle_at(0.5, 0.95)]);
        step(&mut store, &MotionMode::Discrete, StepInput::Displacement(0.2));
        let p = store.iter().next().unwrap().position;
        assert!((p.y - 0.05).abs() < 1e-6, "y = {}", p.y);
    }

    #[test]
    fn fall_ignores_upward_scroll() {
        let tuning = FallTuning {
            speed: 1.0,
            boost: 1.0,
        };
        let mode = MotionMode::ContinuousFall(tuning);
        let mut up = ParticleStore::from_particles(vec![particle_at(0.5, 0.1)]);
        let mut idle = up.clone();
        step(&mut up, &mode, StepInput::Boost(-1.0));
        step(&mut idle, &mode, StepInput::Boost(0.0));
        assert_eq!(up.positions(), idle.positions());
        assert!((idle.positions()[0].y - 0.104).abs() < 1e-6);
    }

    #[test]
    fn fall_boost_speeds_up_descent() {
        let mode = MotionMode::ContinuousFall(FallTuning {
            speed: 1.0,
            boost: 2.0,
        });
        let mut store = ParticleStore::from_particles(vec![particle_at(0.5, 0.1)]);
        step(&mut store, &mode, StepInput::Boost(1.0));
        // 0.004 + 1.0 * 0.05 * 0.03 * 2.0
        assert!((store.positions()[0].y - 0.107).abs() < 1e-6);
    }

    #[test]
    fn wobble_phase_keeps_advancing_from_a_large_start() {
        let mode = MotionMode::ContinuousFall(FallTuning::default());
        let mut p = particle_at(0.5, 0.5);
        p.wobble_phase = 8192.0;
        p.wobble_frequency = 0.025;
        p.wobble_amplitude = 0.1;
        let mut store = ParticleStore::from_particles(vec![p]);

        let mut phases = Vec::new();
        for _ in 0..5 {
            step(&mut store, &mode, StepInput::Boost(0.0));
            phases.push(store.iter().next().unwrap().wobble_phase);
        }
        for pair in phases.windows(2) {
            assert!(pair[1] > pair[0], "phase stalled: {:?}", phases);
            assert!((pair[1] - pair[0] - 0.00025).abs() < 1e-5);
        }
        assert!(phases.iter().all(|ph| (0.0..TAU).contains(ph)));
    }

    #[test]
    fn wobble_phase_wraps_across_a_full_period() {
        let mode = MotionMode::ContinuousFall(FallTuning::default());
        let mut p = particle_at(0.5, 0.5);
        p.wobble_phase = TAU - 0.0001;
        p.wobble_frequency = 0.05;
        let mut store = ParticleStore::from_particles(vec![p]);
        step(&mut store, &mode, StepInput::Boost(0.0));
        let phase = store.iter().next().unwrap().wobble_phase;
        assert!((phase - 0.0004).abs() < 1e-5, "phase = {}", phase);
    }

    #[test]
    fn mismatched_input_leaves_particles_alone() {
        let mut store = ParticleStore::from_particles(vec![particle_at(0.3, 0.3)]);
        step(&mut store, &MotionMode::Discrete, StepInput::Boost(1.0));
        assert_eq!(store.positions(), vec![Vec2::new(0.3, 0.3)]);
    }
}
