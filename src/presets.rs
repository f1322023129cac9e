//! Prebuilt particle-tree shapes: vegetation stalks and frond fans.
//!
//! These mirror how game entities assemble their chains: a grass stalk is a
//! root plus two stem segments and a tip with tapering stiffness, a frond
//! fan is a body anchor with an arc of flexible tips. Hosts that need other
//! shapes build them directly with [`ParticleTree::create_child`].

use glam::Vec2;

use crate::config::ParticleParams;
use crate::error::PhysicsError;
use crate::tree::{ParticleId, ParticleTree};

/// Which way a stalk grows out of its anchor tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

/// Tuning for [`build_stalk`]. Where the original vegetation randomized a
/// value per instance (blade height, lean, stem ratio), the knob is a
/// parameter here so hosts control their own variety source.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StalkParams {
    pub facing: Facing,
    /// Overall blade height multiplier, typically 0.75..=1.25.
    pub blade_height: f32,
    /// Rest length of a full stem segment in world units.
    pub segment_length: f32,
    /// First stem segment's share of the blade height, typically
    /// 0.25..=0.375.
    pub stem_ratio: f32,
    /// Sideways lean of the first segment as a fraction of a segment
    /// length, typically 0.5..=1.0.
    pub lean: f32,
    pub lean_left: bool,
    pub root_mass: f32,
    pub collider_radius: f32,
    pub world_radius: f32,
}

impl Default for StalkParams {
    fn default() -> Self {
        StalkParams {
            facing: Facing::Up,
            blade_height: 1.0,
            segment_length: 1.2,
            stem_ratio: 0.3,
            lean: 0.75,
            lean_left: false,
            root_mass: 2.0,
            collider_radius: 0.4,
            world_radius: 0.1,
        }
    }
}

impl StalkParams {
    fn validated(&self) -> Result<(), PhysicsError> {
        for (name, value) in [
            ("blade_height", self.blade_height),
            ("segment_length", self.segment_length),
            ("stem_ratio", self.stem_ratio),
            ("lean", self.lean),
            ("root_mass", self.root_mass),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PhysicsError::InvalidPresetDimension { name, value });
            }
        }
        for radius in [self.collider_radius, self.world_radius] {
            if !radius.is_finite() || radius < 0.0 {
                return Err(PhysicsError::InvalidRadius(radius));
            }
        }
        Ok(())
    }
}

// Per-segment tuning tables, base/mid/tip. Stiffness, damping and mass
// taper toward the tip; force scale grows so currents bend the tip first.
const VERTICAL_SEGMENTS: [ParticleParams; 3] = [
    ParticleParams {
        spring_k: 0.4,
        spring_damping: 15.0,
        max_stretch: 1.0,
        soft_factor: 0.15,
        force_scale: 0.5,
        collider: false,
        collider_radius: 0.4,
        world_radius: 0.1,
    },
    ParticleParams {
        spring_k: 0.2,
        spring_damping: 8.0,
        max_stretch: 1.0,
        soft_factor: 0.15,
        force_scale: 0.9,
        collider: false,
        collider_radius: 0.4,
        world_radius: 0.1,
    },
    ParticleParams {
        spring_k: 0.08,
        spring_damping: 4.0,
        max_stretch: 1.1,
        soft_factor: 0.01,
        force_scale: 1.3,
        collider: false,
        collider_radius: 0.4,
        world_radius: 0.1,
    },
];

const HORIZONTAL_SEGMENTS: [ParticleParams; 3] = [
    ParticleParams {
        spring_k: 0.35,
        spring_damping: 14.0,
        max_stretch: 1.0,
        soft_factor: 0.15,
        force_scale: 0.6,
        collider: false,
        collider_radius: 0.4,
        world_radius: 0.1,
    },
    ParticleParams {
        spring_k: 0.18,
        spring_damping: 9.0,
        max_stretch: 1.0,
        soft_factor: 0.15,
        force_scale: 1.0,
        collider: false,
        collider_radius: 0.4,
        world_radius: 0.1,
    },
    ParticleParams {
        spring_k: 0.06,
        spring_damping: 3.5,
        max_stretch: 1.1,
        soft_factor: 0.01,
        force_scale: 1.2,
        collider: false,
        collider_radius: 0.4,
        world_radius: 0.1,
    },
];

const SEGMENT_MASSES: [f32; 3] = [2.0, 1.5, 0.3];

/// Build a four-particle vegetation stalk (root, two stem segments, tip)
/// rooted at `root_pos`.
pub fn build_stalk(root_pos: Vec2, params: &StalkParams) -> Result<ParticleTree, PhysicsError> {
    params.validated()?;

    let seg = params.segment_length;
    let rise = params.blade_height * seg;
    let mut lean = seg * params.lean;
    if params.lean_left {
        lean = -lean;
    }

    let (offsets, tables): ([Vec2; 3], &[ParticleParams; 3]) = match params.facing {
        Facing::Up => (
            [
                Vec2::new(lean, -rise * params.stem_ratio),
                Vec2::new(-lean, -rise * params.stem_ratio * 2.0),
                Vec2::new(0.0, -rise),
            ],
            &VERTICAL_SEGMENTS,
        ),
        Facing::Down => (
            [
                Vec2::new(lean, rise * params.stem_ratio),
                Vec2::new(-lean, rise * params.stem_ratio * 2.0),
                Vec2::new(0.0, rise),
            ],
            &VERTICAL_SEGMENTS,
        ),
        Facing::Left => (
            [
                Vec2::new(-lean.abs(), seg * 0.2),
                Vec2::new(-lean.abs() * 0.8, seg * 0.28),
                Vec2::new(-lean.abs() * 0.5, seg * 0.32),
            ],
            &HORIZONTAL_SEGMENTS,
        ),
        Facing::Right => (
            [
                Vec2::new(lean.abs(), seg * 0.2),
                Vec2::new(lean.abs() * 0.8, seg * 0.28),
                Vec2::new(lean.abs() * 0.5, seg * 0.32),
            ],
            &HORIZONTAL_SEGMENTS,
        ),
    };

    let mut tree = ParticleTree::new(root_pos, params.root_mass);
    tree.root_mut()
        .update_radii(params.collider_radius, params.world_radius);

    let mut parent = ParticleTree::ROOT;
    for i in 0..3 {
        let child = tree.create_child(parent, offsets[i], SEGMENT_MASSES[i]);
        let mut segment = tables[i];
        // Stretch caps are expressed in segment lengths in the tables.
        segment.max_stretch *= seg;
        segment.collider_radius = params.collider_radius;
        segment.world_radius = params.world_radius;
        segment.validated()?;
        segment.apply(tree.particle_mut(child));
        parent = child;
    }

    Ok(tree)
}

/// Tuning for [`build_frond_fan`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrondParams {
    /// Number of fronds arranged along the arc; at least 2.
    pub fronds: usize,
    /// Horizontal half-spread of the arc in world units.
    pub spread: f32,
    /// Height of the arc.
    pub height: f32,
    pub body_mass: f32,
    pub collider_radius: f32,
    pub world_radius: f32,
}

impl Default for FrondParams {
    fn default() -> Self {
        FrondParams {
            fronds: 5,
            spread: 2.0,
            height: 0.6,
            body_mass: 1.0,
            collider_radius: 1.0,
            world_radius: 0.5,
        }
    }
}

/// A body anchor with a spine segment and an arc of flexible frond tips.
/// The tip handles are kept in arc order for drawing code.
#[derive(Clone, Debug)]
pub struct FrondFan {
    pub tree: ParticleTree,
    /// The spine segment the fronds hang off.
    pub spine: ParticleId,
    pub tips: Vec<ParticleId>,
}

/// Build an articulated frond fan (creature body with appendages) rooted at
/// `root_pos`. The root is the collidable body; fronds never collide.
pub fn build_frond_fan(root_pos: Vec2, params: &FrondParams) -> Result<FrondFan, PhysicsError> {
    if params.fronds < 2 {
        return Err(PhysicsError::InvalidPresetDimension {
            name: "fronds",
            value: params.fronds as f32,
        });
    }
    for (name, value) in [
        ("spread", params.spread),
        ("height", params.height),
        ("body_mass", params.body_mass),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(PhysicsError::InvalidPresetDimension { name, value });
        }
    }

    let mut tree = ParticleTree::new(root_pos, params.body_mass);
    {
        let root = tree.root_mut();
        root.collider = true;
        root.update_radii(params.collider_radius, params.world_radius);
    }

    let spine = tree.create_child(ParticleTree::ROOT, Vec2::new(0.0, -0.4), 0.3);
    {
        let p = tree.particle_mut(spine);
        p.spring_k = 0.6;
        p.spring_damping = 0.95;
    }

    let count = params.fronds;
    let mut tips = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f32 / (count - 1) as f32;
        let x = -params.spread + 2.0 * params.spread * t;
        let y = -0.5 - (t * core::f32::consts::PI).sin() * params.height;
        let tip = tree.create_child(spine, Vec2::new(x, y), 0.1);
        let p = tree.particle_mut(tip);
        p.spring_k = 0.4;
        p.spring_damping = 0.8;
        tips.push(tip);
    }

    Ok(FrondFan { tree, spine, tips })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stalk_has_four_particles_in_a_chain() {
        let tree = build_stalk(Vec2::new(3.0, 8.0), &StalkParams::default()).unwrap();
        assert_eq!(tree.len(), 4);
        // Single chain: every non-leaf has exactly one child.
        for (id, p) in tree.iter() {
            let expected = if id.index() == 3 { 0 } else { 1 };
            assert_eq!(p.children().len(), expected);
        }
    }

    #[test]
    fn stalk_rejects_negative_radius() {
        let params = StalkParams {
            collider_radius: -0.4,
            ..StalkParams::default()
        };
        assert_eq!(
            build_stalk(Vec2::ZERO, &params).unwrap_err(),
            PhysicsError::InvalidRadius(-0.4)
        );
    }

    #[test]
    fn stalk_rejects_zero_segment_length() {
        let params = StalkParams {
            segment_length: 0.0,
            ..StalkParams::default()
        };
        assert!(build_stalk(Vec2::ZERO, &params).is_err());
    }

    #[test]
    fn frond_fan_tips_share_the_spine() {
        let fan = build_frond_fan(Vec2::ZERO, &FrondParams::default()).unwrap();
        assert_eq!(fan.tips.len(), 5);
        for tip in &fan.tips {
            assert_eq!(fan.tree.parent(*tip), Some(fan.spine));
        }
        assert!(fan.tree.root().collider);
        assert!(!fan.tree.particle(fan.tips[0]).collider);
    }

    #[test]
    fn frond_fan_needs_two_fronds() {
        let params = FrondParams {
            fronds: 1,
            ..FrondParams::default()
        };
        assert!(build_frond_fan(Vec2::ZERO, &params).is_err());
    }
}
