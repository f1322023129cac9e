//! Error types for tree construction and tuning validation.

use thiserror::Error;

/// Errors surfaced at the configuration boundary.
///
/// Structural misuse during tree construction (non-positive mass, unknown
/// parent handle) is a programming error and panics instead; there is no
/// recovery path once physics is in flight.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Spring stiffness must be non-negative and finite.
    #[error("spring stiffness must be non-negative and finite, got {0}")]
    InvalidStiffness(f32),
    /// Spring damping must be non-negative and finite.
    #[error("spring damping must be non-negative and finite, got {0}")]
    InvalidDamping(f32),
    /// Maximum stretch must be positive.
    #[error("max stretch must be positive, got {0}")]
    InvalidMaxStretch(f32),
    /// Collision or world radius must be non-negative and finite.
    #[error("radius must be non-negative and finite, got {0}")]
    InvalidRadius(f32),
    /// Particle handle does not belong to this tree.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
    /// Oscillator period must be positive.
    #[error("oscillator period must be positive, got {0}")]
    InvalidPeriod(f32),
    /// Preset dimensions must be positive and finite.
    #[error("preset dimension {name} must be positive and finite, got {value}")]
    InvalidPresetDimension { name: &'static str, value: f32 },
}
