//! Arena-backed particle trees built by child attachment.

use glam::Vec2;
use log::debug;

use crate::error::PhysicsError;
use crate::particle::Particle;

/// Handle to a particle within its owning [`ParticleTree`].
///
/// Handles are plain arena indices; they are only meaningful for the tree
/// that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId(pub(crate) usize);

impl ParticleId {
    /// Arena index backing this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A rooted tree of spring-linked particles, owned by a single entity.
///
/// The root is created first and marked `main`; children are attached with
/// [`create_child`](ParticleTree::create_child), which fixes their rest
/// length from the initial offset. Parent indices are always smaller than
/// child indices, so iterating the arena in index order is a root-to-leaf
/// topological traversal.
#[derive(Clone, Debug)]
pub struct ParticleTree {
    particles: Vec<Particle>,
}

impl ParticleTree {
    /// Handle of the root particle.
    pub const ROOT: ParticleId = ParticleId(0);

    /// Create a tree consisting of a single root particle.
    ///
    /// # Panics
    /// Panics if `mass` is non-positive or non-finite.
    pub fn new(root_pos: Vec2, mass: f32) -> Self {
        let root = Particle::new(root_pos, mass, true, false);
        debug!(
            "particle tree rooted at ({:.2}, {:.2}), mass {mass}",
            root_pos.x, root_pos.y
        );
        ParticleTree { particles: vec![root] }
    }

    /// Attach a new particle at `parent.pos + offset`, with its rest length
    /// fixed to `offset.length()`. Returns the handle for further
    /// configuration (spring constants, radii, flags).
    ///
    /// # Panics
    /// Panics if `parent` is not a handle from this tree, or if `mass` or
    /// `offset` is not finite and positive where required.
    pub fn create_child(&mut self, parent: ParticleId, offset: Vec2, mass: f32) -> ParticleId {
        assert!(
            parent.0 < self.particles.len(),
            "parent handle {} out of bounds (count: {})",
            parent.0,
            self.particles.len()
        );
        assert!(offset.is_finite(), "child offset must be finite, got {offset}");

        let pos = self.particles[parent.0].pos + offset;
        let mut child = Particle::new(pos, mass, false, false);
        child.rest_length = offset.length();
        child.parent = Some(parent);

        let id = ParticleId(self.particles.len());
        self.particles.push(child);
        self.particles[parent.0].children.push(id);
        id
    }

    /// Apply `force` to `id`, then walk its subtree depth-first in child
    /// insertion order, each child receiving the incoming force scaled by
    /// `attenuation * child.force_scale` and propagating that attenuated
    /// value onward (geometric decay per level).
    pub fn cascade_force(&mut self, id: ParticleId, force: Vec2, attenuation: f32) {
        let mut work = vec![(id, force)];
        while let Some((id, f)) = work.pop() {
            self.particles[id.0].add_force(f);
            // Reverse push so insertion order pops first.
            for i in (0..self.particles[id.0].children.len()).rev() {
                let child = self.particles[id.0].children[i];
                let scaled = f * attenuation * self.particles[child.0].force_scale;
                work.push((child, scaled));
            }
        }
    }

    /// Accumulate a force on a single particle.
    pub fn add_force(&mut self, id: ParticleId, force: Vec2) {
        self.particles[id.0].add_force(force);
    }

    pub fn root(&self) -> &Particle {
        &self.particles[0]
    }

    pub fn root_mut(&mut self) -> &mut Particle {
        &mut self.particles[0]
    }

    /// Root position, the entity's synchronized world anchor.
    pub fn root_position(&self) -> Vec2 {
        self.particles[0].pos
    }

    /// Overwrite the root position from the entity's authoritative world
    /// position after physics. A synchronization, not a simulation step:
    /// the implied root velocity is left untouched and children keep
    /// responding elastically to the dragged anchor.
    pub fn sync_root(&mut self, pos: Vec2) {
        self.particles[0].pos = pos;
    }

    /// Reposition the root, zeroing its implied velocity. The rest of the
    /// chain relaxes toward it over subsequent ticks.
    pub fn reset(&mut self, pos: Vec2) {
        debug!("particle tree reset to ({:.2}, {:.2})", pos.x, pos.y);
        let root = &mut self.particles[0];
        root.pos = pos;
        root.prev_pos = pos;
        root.force = Vec2::ZERO;
    }

    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.0]
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> &mut Particle {
        &mut self.particles[id.0]
    }

    /// Fallible lookup for handles that may come from another tree.
    pub fn try_particle(&self, id: ParticleId) -> Result<&Particle, PhysicsError> {
        self.particles.get(id.0).ok_or(PhysicsError::ParticleOutOfBounds {
            index: id.0,
            count: self.particles.len(),
        })
    }

    pub fn parent(&self, id: ParticleId) -> Option<ParticleId> {
        self.particles[id.0].parent
    }

    pub fn children(&self, id: ParticleId) -> &[ParticleId] {
        &self.particles[id.0].children
    }

    /// Number of particles; at least 1, since the root always exists.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticleId> {
        (0..self.particles.len()).map(ParticleId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &Particle)> {
        self.particles.iter().enumerate().map(|(i, p)| (ParticleId(i), p))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticleId, &mut Particle)> {
        self.particles
            .iter_mut()
            .enumerate()
            .map(|(i, p)| (ParticleId(i), p))
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.pos).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_placed_at_parent_offset() {
        let mut tree = ParticleTree::new(Vec2::new(2.0, 3.0), 1.0);
        let child = tree.create_child(ParticleTree::ROOT, Vec2::new(3.0, 4.0), 1.0);
        assert_eq!(tree.particle(child).pos, Vec2::new(5.0, 7.0));
        assert!((tree.particle(child).rest_length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn parent_index_always_smaller() {
        let mut tree = ParticleTree::new(Vec2::ZERO, 1.0);
        let a = tree.create_child(ParticleTree::ROOT, Vec2::X, 1.0);
        let b = tree.create_child(a, Vec2::X, 1.0);
        let c = tree.create_child(a, Vec2::Y, 1.0);
        for id in [a, b, c] {
            let parent = tree.parent(id).unwrap();
            assert!(parent.index() < id.index());
        }
    }

    #[test]
    fn exactly_one_main_particle() {
        let mut tree = ParticleTree::new(Vec2::ZERO, 1.0);
        let a = tree.create_child(ParticleTree::ROOT, Vec2::X, 1.0);
        tree.create_child(a, Vec2::X, 1.0);
        let mains = tree.iter().filter(|(_, p)| p.main).count();
        assert_eq!(mains, 1);
        assert!(tree.root().main);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn foreign_parent_handle_panics() {
        let mut tree = ParticleTree::new(Vec2::ZERO, 1.0);
        tree.create_child(ParticleId(7), Vec2::X, 1.0);
    }

    #[test]
    fn try_particle_reports_bounds() {
        let tree = ParticleTree::new(Vec2::ZERO, 1.0);
        let err = tree.try_particle(ParticleId(3)).unwrap_err();
        assert_eq!(err, PhysicsError::ParticleOutOfBounds { index: 3, count: 1 });
    }

    #[test]
    fn reset_zeroes_implied_velocity() {
        let mut tree = ParticleTree::new(Vec2::ZERO, 1.0);
        tree.root_mut().pos = Vec2::new(4.0, 4.0);
        tree.root_mut().prev_pos = Vec2::new(3.0, 3.0);
        tree.reset(Vec2::new(1.0, 1.0));
        assert_eq!(tree.root().pos, Vec2::new(1.0, 1.0));
        assert_eq!(tree.root().velocity(), Vec2::ZERO);
    }
}
