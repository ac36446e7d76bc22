//! Gauss-Seidel relaxation of distance constraints.

use crate::arena::{Arena, ConstraintId, NodeId};
use crate::boundary::BoundaryPolicy;
use crate::constraint::Constraint;
use crate::float::Float;
use crate::node::Node;

/// Move both endpoints of `constraint` toward its rest length.
///
/// Each unpinned endpoint takes half of `stiffness` times the error, in
/// opposite directions, and is passed through `boundary` right away.
/// Returns `false` when nothing was corrected: an endpoint is gone, the
/// endpoints coincide, or a one-sided constraint is slack.
pub fn relax<F: Float>(
    constraint: &Constraint<F>,
    nodes: &mut Arena<NodeId, Node<F>>,
    boundary: &BoundaryPolicy<F>,
) -> bool {
    let Some((start, end)) = nodes.get_pair_mut(constraint.start, constraint.end) else {
        return false;
    };

    let diff = start.pos - end.pos;
    let dist = diff.length();
    if dist <= F::zero() || !constraint.is_engaged(dist) {
        return false;
    }

    let correction = (constraint.rest_length - dist) / dist;
    let offset = diff.scale(correction * F::half() * constraint.stiffness);

    if !start.pinned {
        start.pos = start.pos + offset;
        boundary.apply(start);
    }
    if !end.pinned {
        end.pos = end.pos - offset;
        boundary.apply(end);
    }
    true
}

/// One pass over `order`, each constraint seeing the positions left by the
/// ones before it. Dead or missing IDs are skipped.
pub fn relax_pass<F: Float>(
    order: &[ConstraintId],
    constraints: &Arena<ConstraintId, Constraint<F>>,
    nodes: &mut Arena<NodeId, Node<F>>,
    boundary: &BoundaryPolicy<F>,
) -> usize {
    let mut corrected = 0;
    for &id in order {
        if let Some(constraint) = constraints.get(id) {
            if relax(constraint, nodes, boundary) {
                corrected += 1;
            }
        }
    }
    corrected
}
