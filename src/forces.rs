//! External force sources: directional current fields and ambient sway.

use glam::Vec2;

use crate::error::PhysicsError;
use crate::tree::ParticleTree;

/// A directional force region defined by the level.
///
/// Currents act on the root with a per-entity multiplier and cascade into
/// the chain scaled by each child's own `force_scale`, giving a rigid base
/// and a flexible tip without the spring or collision logic knowing where
/// the force came from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Current {
    pub dx: f32,
    pub dy: f32,
    /// Whether this current comes from the level definition. Transient
    /// currents (debug tools, scripted gusts) leave this false and are
    /// ignored by entities that only respond to level currents.
    pub from_level: bool,
}

impl Current {
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}

/// Apply a level current to a tree: the root receives the current scaled by
/// `multiplier`, then each child of the root starts a cascade scaled and
/// attenuated by its own `force_scale`.
pub fn apply_current(tree: &mut ParticleTree, current: &Current, multiplier: f32) {
    if !current.from_level {
        return;
    }
    let direction = current.direction();
    tree.add_force(ParticleTree::ROOT, direction * multiplier);

    let children = tree.children(ParticleTree::ROOT).to_vec();
    for child in children {
        let force_scale = tree.particle(child).force_scale;
        tree.cascade_force(child, direction * force_scale, force_scale);
    }
}

/// Apply an ambient sway force to every chain hanging off the root,
/// cascading with the given attenuation. The root itself is left alone so
/// anchored stalks wave without their base drifting.
pub fn apply_sway(tree: &mut ParticleTree, sway: Vec2, attenuation: f32) {
    let children = tree.children(ParticleTree::ROOT).to_vec();
    for child in children {
        tree.cascade_force(child, sway, attenuation);
    }
}

/// A sine oscillator sampled from the host's monotonic clock, the source of
/// ambient sway. Phase is a function of the supplied time only; no state is
/// kept between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oscillator {
    pub offset: f32,
    pub amplitude: f32,
    pub period_ms: f32,
}

impl Oscillator {
    pub fn new(offset: f32, amplitude: f32, period_ms: f32) -> Result<Self, PhysicsError> {
        if !(period_ms.is_finite() && period_ms > 0.0) {
            return Err(PhysicsError::InvalidPeriod(period_ms));
        }
        Ok(Oscillator {
            offset,
            amplitude,
            period_ms,
        })
    }

    /// Sample the oscillator at `time_ms` milliseconds.
    pub fn sample(&self, time_ms: f32) -> f32 {
        self.offset + self.amplitude * (core::f32::consts::TAU * time_ms / self.period_ms).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillator_stays_within_band() {
        let osc = Oscillator::new(2.0, 5.0, 1000.0).unwrap();
        for i in 0..200 {
            let v = osc.sample(i as f32 * 17.0);
            assert!((-3.0..=7.0).contains(&v), "sample {v} outside band");
        }
    }

    #[test]
    fn oscillator_period_repeats() {
        let osc = Oscillator::new(0.0, 5.0, 1200.0).unwrap();
        let a = osc.sample(300.0);
        let b = osc.sample(300.0 + 1200.0);
        assert!((a - b).abs() < 1e-3);
    }

    #[test]
    fn non_positive_period_rejected() {
        assert!(Oscillator::new(0.0, 1.0, 0.0).is_err());
        assert!(Oscillator::new(0.0, 1.0, f32::NAN).is_err());
    }

    #[test]
    fn non_level_current_is_ignored() {
        let mut tree = ParticleTree::new(Vec2::ZERO, 1.0);
        let current = Current {
            dx: 3.0,
            dy: 0.0,
            from_level: false,
        };
        apply_current(&mut tree, &current, 1.0);
        assert_eq!(tree.root().force(), Vec2::ZERO);
    }
}
