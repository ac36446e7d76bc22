//! Pairwise circle collision with mass-weighted positional correction.
//!
//! Every pair is tested; there is no broad phase. Overlapping circles are
//! pushed apart along the line between their centers, each taking a share
//! of the overlap inversely proportional to its mass. The previous position
//! is pushed the other way by the pair's restitution, which turns the
//! correction into an apparent rebound on the next integration.

use crate::arena::{Arena, NodeId};
use crate::boundary::BoundaryPolicy;
use crate::float::Float;
use crate::node::Node;

/// Separate `a` and `b` if their circles overlap.
///
/// `correction` is the fraction of the overlap removed (1.0 leaves the pair
/// exactly touching). Pinned nodes never move; the other node takes the
/// whole correction. Returns whether anything moved.
pub fn resolve_pair<F: Float>(a: &mut Node<F>, b: &mut Node<F>, correction: F) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist <= F::zero() || dist >= min_dist {
        return false;
    }

    let w_a = a.inv_mass();
    let w_b = b.inv_mass();
    let w_total = w_a + w_b;
    if w_total <= F::zero() {
        return false;
    }

    let normal = delta.scale(F::one() / dist);
    let push = normal.scale((min_dist - dist) * correction);
    let restitution = a.restitution.min(b.restitution);

    let shift_a = -push.scale(w_a / w_total);
    let shift_b = push.scale(w_b / w_total);

    a.pos = a.pos + shift_a;
    a.prev_pos = a.prev_pos - shift_a.scale(restitution);
    b.pos = b.pos + shift_b;
    b.prev_pos = b.prev_pos - shift_b.scale(restitution);
    true
}

/// One pass over every unordered pair in `ids`, lower ID first.
///
/// `ids` must be sorted ascending. Nodes that have disappeared are skipped.
/// Returns the number of pairs separated.
pub fn resolve_pass<F: Float>(
    ids: &[NodeId],
    nodes: &mut Arena<NodeId, Node<F>>,
    boundary: &BoundaryPolicy<F>,
    correction: F,
) -> usize {
    let mut resolved = 0;
    for (i, &id_a) in ids.iter().enumerate() {
        for &id_b in &ids[i + 1..] {
            let Some((a, b)) = nodes.get_pair_mut(id_a, id_b) else {
                continue;
            };
            if resolve_pair(a, b, correction) {
                if !a.pinned {
                    boundary.apply(a);
                }
                if !b.pinned {
                    boundary.apply(b);
                }
                resolved += 1;
            }
        }
    }
    resolved
}
