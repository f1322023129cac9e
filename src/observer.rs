//! Step observer trait for monitoring the physics tick.

/// Trait for observing the phases of a physics tick.
///
/// Implement this to monitor solver progress (debugging, visualization,
/// profiling). All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after spring constraint forces and the stretch clamp have
    /// been applied to every non-root particle.
    fn on_springs_solved(&mut self) {}

    /// Called after all non-fixed particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called when the tick for one tree is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
