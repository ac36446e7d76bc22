//! Error types for world operations.

use thiserror::Error;

use crate::arena::{ConstraintId, NodeId};

/// Result type alias for world operations.
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Errors that can occur during world operations.
///
/// Deleting something that is already gone is not an error, and the step
/// itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhysicsError {
    /// A constraint endpoint does not refer to a live node.
    #[error("constraint endpoint {id} is not a live node")]
    InvalidNodeReference { id: NodeId },
    /// The node was deleted or never existed.
    #[error("{id} does not exist")]
    NodeNotFound { id: NodeId },
    /// The constraint was deleted or never existed.
    #[error("{id} does not exist")]
    ConstraintNotFound { id: ConstraintId },
    /// Cloth grids must be at least 2x2.
    #[error("grid must be at least 2x2")]
    InvalidGridDimensions,
    /// Chains need at least one segment.
    #[error("chain needs at least one segment")]
    InsufficientSegments,
}
