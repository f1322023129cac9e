//! Per-tick spring constraint evaluation and Verlet integration.

use glam::Vec2;

use crate::config::TickConfig;
use crate::observer::StepObserver;
use crate::tree::{ParticleId, ParticleTree};

/// Evaluates spring-damper constraints and advances particle trees with
/// position-based Verlet steps.
///
/// One call to [`step`](SpringIntegrator::step) is one simulation tick for
/// one tree: a single root-to-leaf pass accumulating constraint forces and
/// enforcing the hard stretch clamp, followed by integration of every
/// non-fixed particle.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpringIntegrator {
    config: TickConfig,
}

impl SpringIntegrator {
    pub fn new(config: TickConfig) -> Self {
        SpringIntegrator { config }
    }

    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Advance `tree` by one tick of duration `dt`.
    ///
    /// External forces accumulated since the previous tick participate in
    /// this integration and are cleared afterwards. Fixed particles never
    /// move but still anchor their children's constraints; roots that are
    /// overwritten externally each tick behave the same way.
    pub fn step<O: StepObserver>(&self, tree: &mut ParticleTree, dt: f32, observer: &mut O) {
        self.solve_springs(tree);
        observer.on_springs_solved();

        self.integrate(tree, dt);
        // Re-enforce the stretch cap on the integrated positions so the
        // invariant holds at every tick boundary, not just mid-pass.
        self.enforce_stretch(tree);
        observer.on_integrate();

        observer.on_step_complete();
    }

    /// Accumulate spring-damper forces and clamp overstretch, root to
    /// leaves. Index order is topological, so every parent is up to date
    /// before its children are visited.
    fn solve_springs(&self, tree: &mut ParticleTree) {
        let epsilon = self.config.axis_epsilon;

        for i in 1..tree.len() {
            let id = ParticleId(i);
            let Some(parent) = tree.parent(id) else {
                continue;
            };
            let (parent_pos, parent_vel) = {
                let p = tree.particle(parent);
                (p.pos, p.velocity())
            };

            let particle = tree.particle_mut(id);
            let delta = particle.pos - parent_pos;
            let length = delta.length();
            let axis = delta / length.max(epsilon);

            // Softness tunes down the whole elastic response.
            let soften = (1.0 - particle.soft_factor).clamp(0.0, 1.0);
            let stretch = -particle.spring_k * (length - particle.rest_length());
            let relative_vel = (particle.velocity() - parent_vel).dot(axis);
            let damp = -particle.spring_damping * relative_vel;
            let spring_force = axis * ((stretch + damp) * soften);
            particle.add_force(spring_force);

            // Hard cap on parent distance; takes precedence over the spring
            // force and bounds runaway divergence under transient forcing.
            if length > particle.max_stretch && !particle.fixed {
                particle.pos = parent_pos + axis * particle.max_stretch;
            }
        }
    }

    /// Positional stretch cap, root to leaves. Parents settle before their
    /// children are measured, so every parent-child pair satisfies the cap
    /// when the pass finishes.
    fn enforce_stretch(&self, tree: &mut ParticleTree) {
        let epsilon = self.config.axis_epsilon;

        for i in 1..tree.len() {
            let id = ParticleId(i);
            let Some(parent) = tree.parent(id) else {
                continue;
            };
            let parent_pos = tree.particle(parent).pos;

            let particle = tree.particle_mut(id);
            if particle.fixed {
                continue;
            }
            let delta = particle.pos - parent_pos;
            let length = delta.length();
            if length > particle.max_stretch {
                let axis = delta / length.max(epsilon);
                particle.pos = parent_pos + axis * particle.max_stretch;
            }
        }
    }

    /// Implicit-velocity Verlet step. Forces are cleared on every particle,
    /// fixed ones included, so each tick starts from a zero accumulator.
    fn integrate(&self, tree: &mut ParticleTree, dt: f32) {
        let damping = self.config.damping_factor;
        let dt2 = dt * dt;

        for (_, particle) in tree.iter_mut() {
            if particle.fixed {
                particle.force = Vec2::ZERO;
                continue;
            }
            let velocity = particle.velocity() * damping;
            let new_pos = particle.pos + velocity + (particle.force / particle.mass) * dt2;
            particle.prev_pos = particle.pos;
            particle.pos = new_pos;
            particle.force = Vec2::ZERO;
        }
    }
}
