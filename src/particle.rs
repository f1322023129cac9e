//! Point-mass particles with position-based dynamics and spring tuning.

use glam::Vec2;

use crate::tree::ParticleId;

/// Per-axis flags recording which axes were corrected by tile collision
/// during the most recent resolve pass. Downstream behaviors read these to
/// react to contact (e.g. suppressing further input on a just-collided axis).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactAxes {
    pub x: bool,
    pub y: bool,
}

impl ContactAxes {
    pub fn any(self) -> bool {
        self.x || self.y
    }

    pub(crate) fn clear(&mut self) {
        self.x = false;
        self.y = false;
    }
}

/// A point mass in a particle tree — implicit velocity via previous
/// position, forces accumulated per tick.
///
/// Spring tuning fields are public so entities can configure children after
/// attachment; `rest_length` is fixed at creation and only readable.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    /// Accumulated force, cleared when the particle is integrated.
    pub(crate) force: Vec2,
    pub mass: f32,
    /// Pinned in place; excluded from integration and the stretch clamp.
    pub fixed: bool,
    /// Tree root, representing the owning entity's anchor point.
    pub main: bool,
    /// Radius used for tile-collision resolution.
    pub collider_radius: f32,
    /// Rendering-facing radius in world units.
    pub world_radius: f32,
    pub spring_k: f32,
    pub spring_damping: f32,
    /// Parent distance captured at creation; never recomputed.
    pub(crate) rest_length: f32,
    /// Hard cap on parent distance, enforced positionally each tick.
    pub max_stretch: f32,
    /// Softens the effective spring/damping response, 0 = full stiffness.
    pub soft_factor: f32,
    /// Multiplier for cascaded and current-field forces.
    pub force_scale: f32,
    /// Whether this particle participates in tile-collision resolution.
    pub collider: bool,
    pub contact_axes: ContactAxes,
    pub(crate) parent: Option<ParticleId>,
    pub(crate) children: Vec<ParticleId>,
}

impl Particle {
    pub(crate) fn new(pos: Vec2, mass: f32, main: bool, fixed: bool) -> Self {
        assert!(
            mass.is_finite() && mass > 0.0,
            "particle mass must be positive and finite, got {mass}"
        );
        Particle {
            pos,
            prev_pos: pos,
            force: Vec2::ZERO,
            mass,
            fixed,
            main,
            collider_radius: 0.0,
            world_radius: 0.0,
            spring_k: 0.1,
            spring_damping: 1.0,
            rest_length: 0.0,
            max_stretch: f32::INFINITY,
            soft_factor: 0.0,
            force_scale: 1.0,
            collider: false,
            contact_axes: ContactAxes::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Accumulate an external force. Safe to call any number of times per
    /// tick; contributions from multiple sources sum.
    pub fn add_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Force accumulated so far this tick.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Implicit per-tick velocity, `pos - prev_pos`.
    pub fn velocity(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    /// Parent distance fixed at creation time (zero for the root).
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Set the collision and rendering radii. No other effect.
    pub fn update_radii(&mut self, collider_radius: f32, world_radius: f32) {
        self.collider_radius = collider_radius;
        self.world_radius = world_radius;
    }

    pub fn parent(&self) -> Option<ParticleId> {
        self.parent
    }

    pub fn children(&self) -> &[ParticleId] {
        &self.children
    }
}
