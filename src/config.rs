//! Tick and per-particle tuning configuration.

use crate::error::PhysicsError;
use crate::particle::Particle;

/// Per-tick integration settings.
///
/// # Builder Pattern
/// ```
/// use stalky::TickConfig;
///
/// let config = TickConfig::new()
///     .with_damping_factor(0.97)
///     .with_axis_epsilon(1e-5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickConfig {
    /// Velocity retention factor [0, 1] applied during integration.
    /// 1.0 = no damping. Default: 0.99.
    pub damping_factor: f32,
    /// Floor applied to the parent-child distance before normalizing the
    /// spring axis. Default: 1e-6.
    pub axis_epsilon: f32,
}

impl TickConfig {
    pub fn new() -> Self {
        TickConfig {
            damping_factor: 0.99,
            axis_epsilon: 1e-6,
        }
    }

    pub fn with_damping_factor(mut self, damping_factor: f32) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    pub fn with_axis_epsilon(mut self, axis_epsilon: f32) -> Self {
        self.axis_epsilon = axis_epsilon.max(f32::MIN_POSITIVE);
        self
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-particle constraint tuning, applied to a child after attachment.
///
/// Mirrors the knobs entity code sets one by one; bundling them keeps
/// entity-kind presets serializable as level configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticleParams {
    pub spring_k: f32,
    pub spring_damping: f32,
    pub max_stretch: f32,
    pub soft_factor: f32,
    pub force_scale: f32,
    pub collider: bool,
    pub collider_radius: f32,
    pub world_radius: f32,
}

impl ParticleParams {
    /// Validate every field, returning the params unchanged on success.
    pub fn validated(self) -> Result<Self, PhysicsError> {
        if !self.spring_k.is_finite() || self.spring_k < 0.0 {
            return Err(PhysicsError::InvalidStiffness(self.spring_k));
        }
        if !self.spring_damping.is_finite() || self.spring_damping < 0.0 {
            return Err(PhysicsError::InvalidDamping(self.spring_damping));
        }
        if self.max_stretch <= 0.0 || self.max_stretch.is_nan() {
            return Err(PhysicsError::InvalidMaxStretch(self.max_stretch));
        }
        for radius in [self.collider_radius, self.world_radius] {
            if !radius.is_finite() || radius < 0.0 {
                return Err(PhysicsError::InvalidRadius(radius));
            }
        }
        Ok(self)
    }

    /// Copy these params onto a particle.
    pub fn apply(&self, particle: &mut Particle) {
        particle.spring_k = self.spring_k;
        particle.spring_damping = self.spring_damping;
        particle.max_stretch = self.max_stretch;
        particle.soft_factor = self.soft_factor;
        particle.force_scale = self.force_scale;
        particle.collider = self.collider;
        particle.update_radii(self.collider_radius, self.world_radius);
    }
}

impl Default for ParticleParams {
    fn default() -> Self {
        ParticleParams {
            spring_k: 0.1,
            spring_damping: 1.0,
            max_stretch: f32::INFINITY,
            soft_factor: 0.0,
            force_scale: 1.0,
            collider: false,
            collider_radius: 0.0,
            world_radius: 0.0,
        }
    }
}
