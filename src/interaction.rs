//! External interactions applied once per step after integration.

use crate::float::Float;
use crate::node::Node;
use crate::vec::Vec2;

/// Something outside the simulation pushing on nodes, e.g. a cursor.
///
/// Called once for every stepped node after integration. The world runs the
/// boundary policy on the node afterwards.
pub trait Interaction<F: Float> {
    fn apply(&mut self, node: &mut Node<F>);
}

/// No external interaction.
pub struct NoInteraction;

impl<F: Float> Interaction<F> for NoInteraction {
    fn apply(&mut self, _node: &mut Node<F>) {}
}

/// Pushes nodes out of a circle around the pointer.
///
/// A node closer than `radius` to the pointer is moved straight away from
/// it by `radius - distance`. The previous position is left alone, so the
/// push also becomes velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerRepulsion<F: Float> {
    /// `None` while the pointer is outside the scene.
    pub pointer: Option<Vec2<F>>,
    pub radius: F,
}

impl<F: Float> PointerRepulsion<F> {
    pub fn new(radius: F) -> Self {
        PointerRepulsion { pointer: None, radius }
    }

    pub fn set_pointer(&mut self, x: F, y: F) {
        self.pointer = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }
}

impl<F: Float> Interaction<F> for PointerRepulsion<F> {
    fn apply(&mut self, node: &mut Node<F>) {
        let Some(pointer) = self.pointer else {
            return;
        };
        if node.pinned {
            return;
        }
        let away = node.pos - pointer;
        let dist = away.length();
        if dist <= F::zero() || dist >= self.radius {
            return;
        }
        node.pos = node.pos + away.scale((self.radius - dist) / dist);
    }
}
