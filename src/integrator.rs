//! Verlet integration with gravity and air friction.

use crate::float::Float;
use crate::node::Node;
use crate::vec::Vec2;

/// Advance one unpinned node by one timestep.
///
/// Convention: `pos += (pos - prev_pos) * air_friction + gravity * dt²`.
/// Gravity is an acceleration in units/s² and is added as given, so the
/// caller picks which way is down. `prev_pos` ends up at the position
/// before the move.
pub fn integrate<F: Float>(node: &mut Node<F>, gravity: Vec2<F>, air_friction: F, dt: F) {
    if node.pinned {
        return;
    }
    let velocity = node.velocity_raw().scale(air_friction);
    let new_pos = node.pos + velocity + gravity.scale(dt * dt);
    node.prev_pos = node.pos;
    node.pos = new_pos;
}
