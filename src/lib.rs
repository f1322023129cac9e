//! Hierarchical spring-mass soft-body chains for tile-based 2D games.
//!
//! `stalky` animates procedurally built particle chains — vegetation stalks,
//! articulated creature appendages, dragged skeletons — as rooted trees of
//! elastically linked point masses. Chains stay numerically stable under
//! continuous external forcing (ambient sway, current fields, player
//! impulses) and resolve interpenetration against a static solid-tile grid
//! every simulation tick.
//!
//! # Features
//!
//! - **Particle trees**: arena-backed rooted trees built by child attachment,
//!   rest lengths fixed at creation
//! - **Spring integration**: force-based spring-damper constraints with a
//!   hard stretch clamp, plus position-based Verlet steps
//! - **Force cascade**: subtree force propagation with geometric attenuation
//!   and per-particle scaling
//! - **Tile collision**: 3×3 neighborhood push-out against axis-aligned unit
//!   tiles, with reactive forces and per-axis contact flags
//! - **Current fields & sway**: directional region forces and sine
//!   oscillators for organic ambient motion
//! - **Observable**: monitor tick phases via the `StepObserver` trait

pub mod collision;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod observer;
pub mod particle;
pub mod presets;
pub mod tree;

// Re-export primary API
pub use collision::{SolidMap, TileCollisionResolver, TileGrid};
pub use config::{ParticleParams, TickConfig};
pub use error::PhysicsError;
pub use forces::{apply_current, apply_sway, Current, Oscillator};
pub use integrator::SpringIntegrator;
pub use observer::{NoOpStepObserver, StepObserver};
pub use particle::{ContactAxes, Particle};
pub use presets::{build_frond_fan, build_stalk, Facing, FrondFan, FrondParams, StalkParams};
pub use tree::{ParticleId, ParticleTree};
