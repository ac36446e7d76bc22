//! Cloth grids with structural, shear, and bend constraints.

use alloc::vec::Vec;

use crate::arena::{ConstraintId, NodeId};
use crate::constraint::ConstraintDesc;
use crate::error::{PhysicsError, PhysicsResult};
use crate::float::Float;
use crate::node::{NodeDesc, NodeUpdate};
use crate::vec::Vec2;
use crate::world::World;

/// Configuration for a cloth grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig<F: Float> {
    pub cols: usize,
    pub rows: usize,
    pub spacing: F,
    pub radius: F,
    pub structural_stiffness: F,
    pub shear_stiffness: F,
    pub bend_stiffness: F,
}

/// Handles to a `cols × rows` cloth living in a [`World`].
///
/// Node at (col, row) has index `row * cols + col`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cloth {
    nodes: Vec<NodeId>,
    constraints: Vec<ConstraintId>,
    cols: usize,
    rows: usize,
}

impl Cloth {
    /// Create a grid starting at `origin`, extending in positive X
    /// (columns) and positive Y (rows).
    ///
    /// Creates 3 types of constraints:
    /// - Structural: horizontal + vertical neighbors (rest = spacing)
    /// - Shear: diagonal neighbors (rest = spacing * sqrt(2))
    /// - Bend: skip-one horizontal + vertical (rest = spacing * 2)
    pub fn new<F: Float>(
        world: &mut World<F>,
        origin: Vec2<F>,
        config: &GridConfig<F>,
    ) -> PhysicsResult<Self> {
        let (cols, rows) = (config.cols, config.rows);
        if cols < 2 || rows < 2 {
            return Err(PhysicsError::InvalidGridDimensions);
        }
        let spacing = config.spacing;
        let mut nodes = Vec::with_capacity(cols * rows);

        for row in 0..rows {
            for col in 0..cols {
                let x = origin.x + F::from_usize(col) * spacing;
                let y = origin.y + F::from_usize(row) * spacing;
                nodes.push(world.create_node(NodeDesc::new(x, y).with_radius(config.radius)));
            }
        }

        let diag_length = (spacing * spacing + spacing * spacing).sqrt();
        let bend_length = spacing * F::two();
        let at = |col: usize, row: usize| nodes[row * cols + col];
        let mut links: Vec<(NodeId, NodeId, F, F)> = Vec::new();

        // Structural
        for row in 0..rows {
            for col in 0..cols - 1 {
                links.push((at(col, row), at(col + 1, row), spacing, config.structural_stiffness));
            }
        }
        for row in 0..rows - 1 {
            for col in 0..cols {
                links.push((at(col, row), at(col, row + 1), spacing, config.structural_stiffness));
            }
        }

        // Shear
        for row in 0..rows - 1 {
            for col in 0..cols - 1 {
                links.push((at(col, row), at(col + 1, row + 1), diag_length, config.shear_stiffness));
                links.push((at(col + 1, row), at(col, row + 1), diag_length, config.shear_stiffness));
            }
        }

        // Bend
        for row in 0..rows {
            for col in 0..cols.saturating_sub(2) {
                links.push((at(col, row), at(col + 2, row), bend_length, config.bend_stiffness));
            }
        }
        for row in 0..rows.saturating_sub(2) {
            for col in 0..cols {
                links.push((at(col, row), at(col, row + 2), bend_length, config.bend_stiffness));
            }
        }

        let mut constraints = Vec::with_capacity(links.len());
        for (a, b, rest_length, stiffness) in links {
            let desc = ConstraintDesc::new(a, b)
                .with_rest_length(rest_length)
                .with_stiffness(stiffness);
            constraints.push(world.create_constraint(desc)?);
        }

        Ok(Cloth { nodes, constraints, cols, rows })
    }

    pub fn node_at(&self, col: usize, row: usize) -> NodeId {
        self.nodes[row * self.cols + col]
    }

    pub fn pin<F: Float>(&self, world: &mut World<F>, col: usize, row: usize) -> PhysicsResult<()> {
        world.configure_node(self.node_at(col, row), NodeUpdate::new().with_pinned(true))
    }

    pub fn pin_top_row<F: Float>(&self, world: &mut World<F>) -> PhysicsResult<()> {
        for col in 0..self.cols {
            self.pin(world, col, 0)?;
        }
        Ok(())
    }

    /// Cut every constraint touching the node at (col, row). The node stays.
    /// Returns how many constraints were removed.
    pub fn tear_at<F: Float>(&self, world: &mut World<F>, col: usize, row: usize) -> usize {
        let target = self.node_at(col, row);
        let attached: Vec<ConstraintId> = self
            .constraints
            .iter()
            .copied()
            .filter(|&id| world.constraint(id).is_some_and(|c| c.connects(target)))
            .collect();
        for &id in &attached {
            world.delete_constraint(id, false);
        }
        attached.len()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }

    /// Positions in row-major order. Deleted nodes are skipped.
    pub fn positions<F: Float>(&self, world: &World<F>) -> Vec<Vec2<F>> {
        self.nodes
            .iter()
            .filter_map(|&id| world.node(id))
            .map(|n| n.pos)
            .collect()
    }
}
