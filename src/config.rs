//! Configuration types for the world and for individual steps.

use alloc::collections::BTreeSet;

use crate::arena::{ConstraintId, NodeId};
use crate::float::Float;
use crate::vec::Vec2;

/// World-wide simulation parameters.
///
/// # Builder Pattern
/// ```
/// use verlet2d::{WorldConfig, Vec2};
///
/// let config: WorldConfig<f32> = WorldConfig::new()
///     .with_gravity(Vec2::new(0.0, 980.0))
///     .with_air_friction(0.99)
///     .with_time_step(1.0 / 60.0)
///     .with_collision_passes(5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig<F: Float> {
    /// Gravity acceleration in units/s². Default: zero.
    pub gravity: Vec2<F>,
    /// Fraction of velocity kept each step. 1.0 = no drag. Default: 0.99.
    pub air_friction: F,
    /// Fixed timestep in seconds. Default: 1/60.
    pub time_step: F,
    /// Whether nodes collide with each other. Default: true.
    pub collisions: bool,
    /// Collision passes per step. Default: 5.
    pub collision_passes: usize,
    /// Fraction of each overlap removed per collision pass. Default: 1.0.
    pub collision_correction: F,
    /// Seed for randomized update order. Default: 0.
    pub seed: u64,
}

impl<F: Float> WorldConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WorldConfig {
            gravity: Vec2::zero(),
            air_friction: F::from_f32(0.99),
            time_step: F::one() / F::from_f32(60.0),
            collisions: true,
            collision_passes: 5,
            collision_correction: F::one(),
            seed: 0,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_air_friction(mut self, air_friction: F) -> Self {
        self.air_friction = air_friction;
        self
    }

    pub fn with_time_step(mut self, time_step: F) -> Self {
        self.time_step = time_step;
        self
    }

    /// Turn node-node collision off, e.g. for cloth.
    pub fn without_collisions(mut self) -> Self {
        self.collisions = false;
        self
    }

    pub fn with_collision_passes(mut self, passes: usize) -> Self {
        self.collision_passes = passes;
        self
    }

    pub fn with_collision_correction(mut self, correction: F) -> Self {
        self.collision_correction = correction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-call options for [`World::update`](crate::World::update).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOptions {
    /// Nodes left out of integration, interaction and collision.
    pub excluded_nodes: BTreeSet<NodeId>,
    /// Constraints left out of relaxation.
    pub excluded_constraints: BTreeSet<ConstraintId>,
    /// Integrate and interact with nodes in a shuffled order.
    pub randomize_nodes: bool,
    /// Shuffle the constraint order before every relaxation pass.
    pub randomize_constraints: bool,
    /// Relaxation passes over all constraints. Default: 1.
    pub constraint_iterations: usize,
}

impl StepOptions {
    pub fn new() -> Self {
        StepOptions {
            excluded_nodes: BTreeSet::new(),
            excluded_constraints: BTreeSet::new(),
            randomize_nodes: false,
            randomize_constraints: false,
            constraint_iterations: 1,
        }
    }

    pub fn with_constraint_iterations(mut self, iterations: usize) -> Self {
        self.constraint_iterations = iterations;
        self
    }

    pub fn with_randomized(mut self, nodes: bool, constraints: bool) -> Self {
        self.randomize_nodes = nodes;
        self.randomize_constraints = constraints;
        self
    }

    pub fn excluding_node(mut self, id: NodeId) -> Self {
        self.excluded_nodes.insert(id);
        self
    }

    pub fn excluding_constraint(mut self, id: ConstraintId) -> Self {
        self.excluded_constraints.insert(id);
        self
    }
}

impl Default for StepOptions {
    fn default() -> Self {
        Self::new()
    }
}
