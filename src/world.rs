//! The world: node and constraint registries plus the step driver.

use alloc::vec::Vec;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::arena::{Arena, ConstraintId, NodeId};
use crate::boundary::BoundaryPolicy;
use crate::collision;
use crate::config::{StepOptions, WorldConfig};
use crate::constraint::{Constraint, ConstraintDesc, ConstraintUpdate};
use crate::error::{PhysicsError, PhysicsResult};
use crate::float::Float;
use crate::integrator::integrate;
use crate::interaction::{Interaction, NoInteraction};
use crate::node::{Node, NodeDesc, NodeUpdate};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::solver;
use crate::vec::Vec2;

/// Owns every node and constraint and advances them together.
///
/// IDs are never reused: deleting an entity tombstones its slot. Deleting a
/// node also deletes every constraint attached to it.
///
/// ```
/// use verlet2d::{BoundaryPolicy, ConstraintDesc, NodeDesc, StepOptions, Vec2, World, WorldConfig};
///
/// let config = WorldConfig::new().with_gravity(Vec2::new(0.0, 980.0));
/// let mut world: World<f32> = World::new(config, BoundaryPolicy::rectangular(800.0, 600.0));
///
/// let anchor = world.create_node(NodeDesc::new(400.0, 50.0).pinned());
/// let bob = world.create_node(NodeDesc::new(450.0, 50.0));
/// world.create_constraint(ConstraintDesc::new(anchor, bob).with_stiffness(1.0)).unwrap();
///
/// let options = StepOptions::new().with_constraint_iterations(4);
/// for _ in 0..60 {
///     world.update(&options);
/// }
/// assert!(world.node(bob).unwrap().pos.y > 50.0);
/// ```
#[derive(Debug)]
pub struct World<F: Float> {
    config: WorldConfig<F>,
    boundary: BoundaryPolicy<F>,
    nodes: Arena<NodeId, Node<F>>,
    constraints: Arena<ConstraintId, Constraint<F>>,
    rng: StdRng,
}

impl<F: Float> World<F> {
    pub fn new(config: WorldConfig<F>, boundary: BoundaryPolicy<F>) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        World {
            config,
            boundary,
            nodes: Arena::new(),
            constraints: Arena::new(),
            rng,
        }
    }

    pub fn create_node(&mut self, desc: NodeDesc<F>) -> NodeId {
        let id = self.nodes.next_key();
        self.nodes.insert(desc.build(id, self.config.time_step));
        debug!(node = %id, "Created node");
        id
    }

    /// Fails with [`PhysicsError::InvalidNodeReference`] if either endpoint
    /// is not live; nothing is created in that case.
    ///
    /// A missing or non-positive rest length is replaced by the current
    /// endpoint distance. Coincident endpoints therefore get a rest length of
    /// zero, which holds the pair together at a single point.
    pub fn create_constraint(&mut self, desc: ConstraintDesc<F>) -> PhysicsResult<ConstraintId> {
        let start = self
            .nodes
            .get(desc.start)
            .ok_or(PhysicsError::InvalidNodeReference { id: desc.start })?;
        let end = self
            .nodes
            .get(desc.end)
            .ok_or(PhysicsError::InvalidNodeReference { id: desc.end })?;
        let rest_length = desc
            .rest_length
            .filter(|&length| length > F::zero())
            .unwrap_or_else(|| start.pos.distance(end.pos));

        let id = self.constraints.next_key();
        self.constraints.insert(Constraint {
            id,
            start: desc.start,
            end: desc.end,
            rest_length,
            stiffness: desc.stiffness,
            allow_compression: desc.allow_compression,
            allow_tension: desc.allow_tension,
        });
        debug!(constraint = %id, start = %desc.start, end = %desc.end, "Created constraint");
        Ok(id)
    }

    /// Delete a node and every constraint attached to it.
    ///
    /// Returns `None` if the node was already gone.
    pub fn delete_node(&mut self, id: NodeId) -> Option<Node<F>> {
        let node = self.nodes.remove(id)?;
        let attached: Vec<ConstraintId> = self
            .constraints
            .iter()
            .filter(|(_, c)| c.connects(id))
            .map(|(cid, _)| cid)
            .collect();
        for &cid in &attached {
            self.constraints.remove(cid);
        }
        debug!(node = %id, cascaded = attached.len(), "Deleted node");
        Some(node)
    }

    /// Delete a constraint, and with `cascade` both of its endpoints too.
    ///
    /// Returns `None` if the constraint was already gone.
    pub fn delete_constraint(&mut self, id: ConstraintId, cascade: bool) -> Option<Constraint<F>> {
        let constraint = self.constraints.remove(id)?;
        debug!(constraint = %id, cascade, "Deleted constraint");
        if cascade {
            self.delete_node(constraint.start);
            self.delete_node(constraint.end);
        }
        Some(constraint)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<F>> {
        self.nodes.get(id)
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint<F>> {
        self.constraints.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Live nodes in ID order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<F>> + '_ {
        self.nodes.iter().map(|(_, n)| n)
    }

    /// Live constraints in ID order.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint<F>> + '_ {
        self.constraints.iter().map(|(_, c)| c)
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys()
    }

    pub fn constraint_ids(&self) -> Vec<ConstraintId> {
        self.constraints.keys()
    }

    /// Endpoint positions of every live constraint, for drawing.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2<F>, Vec2<F>)> + '_ {
        self.constraints.iter().filter_map(move |(_, c)| {
            let start = self.nodes.get(c.start)?;
            let end = self.nodes.get(c.end)?;
            Some((start.pos, end.pos))
        })
    }

    /// Replace the node's velocity (units per second). Pinned nodes stay at
    /// rest.
    pub fn set_velocity(&mut self, id: NodeId, vx: F, vy: F) -> PhysicsResult<()> {
        let dt = self.config.time_step;
        self.node_mut(id)?.set_velocity(Vec2::new(vx, vy), dt);
        Ok(())
    }

    /// Add to the node's velocity (units per second).
    pub fn add_velocity(&mut self, id: NodeId, vx: F, vy: F) -> PhysicsResult<()> {
        let dt = self.config.time_step;
        self.node_mut(id)?.add_velocity(Vec2::new(vx, vy), dt);
        Ok(())
    }

    /// Overwrite the fields set in `update`, then re-apply the boundary.
    pub fn configure_node(&mut self, id: NodeId, update: NodeUpdate<F>) -> PhysicsResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(PhysicsError::NodeNotFound { id })?;
        update.apply(node);
        if !node.pinned {
            self.boundary.apply(node);
        }
        Ok(())
    }

    pub fn configure_constraint(
        &mut self,
        id: ConstraintId,
        update: ConstraintUpdate<F>,
    ) -> PhysicsResult<()> {
        let constraint = self
            .constraints
            .get_mut(id)
            .ok_or(PhysicsError::ConstraintNotFound { id })?;
        update.apply(constraint);
        Ok(())
    }

    /// Move a node to the pointer. The distance moved becomes its velocity,
    /// so releasing the drag throws the node. Works on pinned nodes too.
    pub fn drag_node(&mut self, id: NodeId, x: F, y: F) -> PhysicsResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(PhysicsError::NodeNotFound { id })?;
        node.drag_to(Vec2::new(x, y));
        self.boundary.apply(node);
        if node.pinned {
            node.prev_pos = node.pos;
        }
        Ok(())
    }

    pub fn config(&self) -> &WorldConfig<F> {
        &self.config
    }

    pub fn set_gravity(&mut self, gravity: Vec2<F>) {
        self.config.gravity = gravity;
    }

    pub fn boundary(&self) -> &BoundaryPolicy<F> {
        &self.boundary
    }

    /// Advance one timestep with no external interaction.
    pub fn update(&mut self, options: &StepOptions) {
        self.step(options, &mut NoInteraction, &mut NoOpStepObserver);
    }

    /// Advance one timestep.
    ///
    /// Phases, in order: integration, `interaction`, collision passes,
    /// constraint relaxation. The boundary policy runs on each node as soon
    /// as a phase moves it. The set of stepped entities is captured up
    /// front, and every entity is looked up again before it is touched.
    pub fn step<I, O>(&mut self, options: &StepOptions, interaction: &mut I, observer: &mut O)
    where
        I: Interaction<F>,
        O: StepObserver,
    {
        let World { config, boundary, nodes, constraints, rng } = self;

        let node_ids: Vec<NodeId> = nodes
            .iter()
            .map(|(id, _)| id)
            .filter(|id| !options.excluded_nodes.contains(id))
            .collect();
        let mut constraint_ids: Vec<ConstraintId> = constraints
            .iter()
            .map(|(id, _)| id)
            .filter(|id| !options.excluded_constraints.contains(id))
            .collect();
        trace!(
            nodes = node_ids.len(),
            constraints = constraint_ids.len(),
            iterations = options.constraint_iterations,
            "Stepping world"
        );

        let mut node_order = node_ids.clone();
        if options.randomize_nodes {
            node_order.shuffle(&mut *rng);
        }

        for &id in &node_order {
            if let Some(node) = nodes.get_mut(id) {
                if node.pinned {
                    continue;
                }
                integrate(node, config.gravity, config.air_friction, config.time_step);
                boundary.apply(node);
            }
        }
        observer.on_integrate();

        for &id in &node_order {
            if let Some(node) = nodes.get_mut(id) {
                if node.pinned {
                    continue;
                }
                interaction.apply(node);
                boundary.apply(node);
            }
        }
        observer.on_interaction();

        if config.collisions {
            for pass in 0..config.collision_passes {
                let resolved =
                    collision::resolve_pass(&node_ids, nodes, boundary, config.collision_correction);
                observer.on_collision_pass(pass, resolved);
            }
        }

        for iteration in 0..options.constraint_iterations {
            if options.randomize_constraints {
                constraint_ids.shuffle(&mut *rng);
            }
            let corrected = solver::relax_pass(&constraint_ids, constraints, nodes, boundary);
            observer.on_constraint_iteration(iteration, corrected);
        }

        observer.on_step_complete();
    }

    fn node_mut(&mut self, id: NodeId) -> PhysicsResult<&mut Node<F>> {
        self.nodes.get_mut(id).ok_or(PhysicsError::NodeNotFound { id })
    }
}
