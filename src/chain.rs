//! Chains (ropes, strings) built from world nodes and constraints.

use alloc::vec::Vec;

use crate::arena::{ConstraintId, NodeId};
use crate::constraint::ConstraintDesc;
use crate::error::{PhysicsError, PhysicsResult};
use crate::float::Float;
use crate::node::{NodeDesc, DEFAULT_RADIUS};
use crate::vec::Vec2;
use crate::world::World;

/// Configuration for creating a chain.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainConfig<F: Float> {
    pub stiffness: F,
    pub radius: F,
    /// Links go slack under compression instead of pushing back.
    pub rope: bool,
}

impl<F: Float> Default for ChainConfig<F> {
    fn default() -> Self {
        ChainConfig {
            stiffness: F::one(),
            radius: F::from_f32(DEFAULT_RADIUS),
            rope: false,
        }
    }
}

/// Handles to the nodes and links of a chain living in a [`World`].
///
/// The chain owns nothing; deleting its nodes through the world is fine and
/// simply leaves stale IDs here.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    nodes: Vec<NodeId>,
    links: Vec<ConstraintId>,
}

impl Chain {
    /// Lay `segments + 1` evenly spaced nodes from `start` to `end` and link
    /// neighbours with constraints at the initial spacing.
    pub fn new<F: Float>(
        world: &mut World<F>,
        start: Vec2<F>,
        end: Vec2<F>,
        segments: usize,
        config: &ChainConfig<F>,
    ) -> PhysicsResult<Self> {
        if segments == 0 {
            return Err(PhysicsError::InsufficientSegments);
        }
        let mut nodes = Vec::with_capacity(segments + 1);
        let mut links = Vec::with_capacity(segments);

        let segment_length = start.distance(end) / F::from_usize(segments);

        for i in 0..=segments {
            let t = F::from_usize(i) / F::from_usize(segments);
            let desc = NodeDesc::at(start.lerp(end, t)).with_radius(config.radius);
            nodes.push(world.create_node(desc));
        }

        for pair in nodes.windows(2) {
            let mut desc = ConstraintDesc::new(pair[0], pair[1])
                .with_rest_length(segment_length)
                .with_stiffness(config.stiffness);
            if config.rope {
                desc = desc.allow_compression();
            }
            links.push(world.create_constraint(desc)?);
        }

        Ok(Chain { nodes, links })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn links(&self) -> &[ConstraintId] {
        &self.links
    }

    pub fn first(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn last(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.links.len()
    }

    /// Positions of the chain's surviving nodes, first to last.
    pub fn positions<F: Float>(&self, world: &World<F>) -> Vec<Vec2<F>> {
        self.nodes
            .iter()
            .filter_map(|&id| world.node(id))
            .map(|n| n.pos)
            .collect()
    }
}
