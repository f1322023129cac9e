//! Tile-grid collision resolution for collider particles.

use log::trace;

use crate::particle::Particle;
use crate::tree::ParticleTree;

/// Solidity lookup over an axis-aligned unit-tile grid.
///
/// Out-of-range coordinates are open space, never an error.
pub trait TileGrid {
    fn is_solid(&self, tx: i32, ty: i32) -> bool;
}

/// A dense solid-tile map. Ships for tests and demos; real levels usually
/// implement [`TileGrid`] on their own tile storage.
#[derive(Clone, Debug)]
pub struct SolidMap {
    cols: i32,
    rows: i32,
    solid: Vec<bool>,
}

impl SolidMap {
    /// Create an all-open map of `cols × rows` tiles anchored at (0, 0).
    pub fn new(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        SolidMap {
            cols,
            rows,
            solid: vec![false; (cols * rows) as usize],
        }
    }

    pub fn set_solid(&mut self, tx: i32, ty: i32, solid: bool) {
        if let Some(index) = self.index(tx, ty) {
            self.solid[index] = solid;
        }
    }

    fn index(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 || tx >= self.cols || ty >= self.rows {
            None
        } else {
            Some((ty * self.cols + tx) as usize)
        }
    }
}

impl TileGrid for SolidMap {
    fn is_solid(&self, tx: i32, ty: i32) -> bool {
        self.index(tx, ty).map(|i| self.solid[i]).unwrap_or(false)
    }
}

/// Resolves interpenetration between collider particles and solid tiles.
///
/// Each collider particle scans its 3×3 tile neighborhood; every
/// overlapping solid tile is resolved independently in scan order along the
/// axis of smaller penetration, with no re-convergence pass. Corner cases
/// where several tiles overlap at once may resolve inconsistently from
/// frame to frame; that is accepted behavior, not a solver defect.
#[derive(Clone, Copy, Debug)]
pub struct TileCollisionResolver {
    /// Scales the reactive force applied alongside each positional
    /// correction, letting the spring system absorb the contact next tick.
    pub restitution: f32,
}

impl TileCollisionResolver {
    pub fn new(restitution: f32) -> Self {
        TileCollisionResolver { restitution }
    }

    /// Resolve every collider particle in `tree` against `grid`.
    ///
    /// Clears all contact flags first, so flags afterwards describe exactly
    /// this pass. Returns the number of tile contacts resolved.
    pub fn resolve<G: TileGrid>(&self, tree: &mut ParticleTree, grid: &G) -> usize {
        let mut contacts = 0;

        for (_, particle) in tree.iter_mut() {
            particle.contact_axes.clear();
            if !particle.collider {
                continue;
            }

            let tx = particle.pos.x.floor() as i32;
            let ty = particle.pos.y.floor() as i32;

            for dy in -1..=1 {
                for dx in -1..=1 {
                    if grid.is_solid(tx + dx, ty + dy)
                        && self.resolve_tile_overlap(particle, tx + dx, ty + dy)
                    {
                        contacts += 1;
                    }
                }
            }
        }

        contacts
    }

    /// Resolve one particle against one solid unit tile. Pushes out along
    /// the axis of smaller penetration only (ties go to the y axis) and
    /// applies a reactive force opposing the overlap.
    fn resolve_tile_overlap(&self, particle: &mut Particle, tile_x: i32, tile_y: i32) -> bool {
        let radius = particle.collider_radius;
        let center_x = tile_x as f32 + 0.5;
        let center_y = tile_y as f32 + 0.5;

        let dx = particle.pos.x - center_x;
        let px = (0.5 + radius) - dx.abs();
        if px <= 0.0 {
            return false;
        }

        let dy = particle.pos.y - center_y;
        let py = (0.5 + radius) - dy.abs();
        if py <= 0.0 {
            return false;
        }

        // Smallest overlap wins; push toward the side the particle is
        // already on.
        if px < py {
            let sign = if dx < 0.0 { -1.0 } else { 1.0 };
            particle.pos.x += sign * px;
            particle.force.x += sign * px * self.restitution;
            particle.contact_axes.x = true;
        } else {
            let sign = if dy < 0.0 { -1.0 } else { 1.0 };
            particle.pos.y += sign * py;
            particle.force.y += sign * py * self.restitution;
            particle.contact_axes.y = true;
        }
        trace!(
            "tile contact at ({tile_x}, {tile_y}), penetration ({px:.3}, {py:.3})"
        );
        true
    }
}

impl Default for TileCollisionResolver {
    fn default() -> Self {
        TileCollisionResolver { restitution: 0.5 }
    }
}
