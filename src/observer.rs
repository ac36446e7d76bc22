//! Hooks into the phases of [`World::step`](crate::World::step).

/// Receives a call as each phase of a world step finishes.
///
/// The collision and constraint hooks report how much work each pass did,
/// which is enough to tell when a scene has settled. Every hook defaults to
/// doing nothing.
pub trait StepObserver {
    /// Called after every stepped node has been integrated.
    fn on_integrate(&mut self) {}

    /// Called after the external interaction has touched every stepped node.
    fn on_interaction(&mut self) {}

    /// Called after each collision pass with the number of pairs separated.
    fn on_collision_pass(&mut self, _pass: usize, _resolved: usize) {}

    /// Called after each constraint iteration with the number of
    /// constraints that were corrected.
    fn on_constraint_iteration(&mut self, _iteration: usize, _corrected: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// Ignores every hook. [`World::update`](crate::World::update) steps with this.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
