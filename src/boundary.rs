//! Containment rules applied after every node displacement.

use alloc::boxed::Box;
use core::fmt;

use crate::float::Float;
use crate::node::Node;
use crate::vec::Vec2;

/// Keeps nodes inside a region. One policy is active per world.
///
/// The world applies the policy inline after each integration, interaction,
/// collision and constraint correction that moves a node, so later solver
/// passes never read an out-of-bounds position. Only `pos` is touched.
pub enum BoundaryPolicy<F: Float> {
    /// No containment.
    Unbounded,
    /// Clamp each axis into `[radius, extent - radius]`.
    Rectangular { width: F, height: F },
    /// Keep the whole circle within `max_radius` of `center`.
    Radial { center: Vec2<F>, max_radius: F },
    Custom(Box<dyn Fn(&mut Node<F>)>),
}

impl<F: Float> BoundaryPolicy<F> {
    pub fn rectangular(width: F, height: F) -> Self {
        BoundaryPolicy::Rectangular { width, height }
    }

    pub fn radial(center: Vec2<F>, max_radius: F) -> Self {
        BoundaryPolicy::Radial { center, max_radius }
    }

    pub fn custom(rule: impl Fn(&mut Node<F>) + 'static) -> Self {
        BoundaryPolicy::Custom(Box::new(rule))
    }

    pub fn apply(&self, node: &mut Node<F>) {
        match self {
            BoundaryPolicy::Unbounded => {}
            BoundaryPolicy::Rectangular { width, height } => {
                let r = node.radius;
                node.pos.x = node.pos.x.clamp(r, *width - r);
                node.pos.y = node.pos.y.clamp(r, *height - r);
            }
            BoundaryPolicy::Radial { center, max_radius } => {
                let limit = *max_radius - node.radius;
                let offset = node.pos - *center;
                let dist = offset.length();
                if dist > limit && dist > F::zero() {
                    node.pos = *center + offset.scale(limit / dist);
                }
            }
            BoundaryPolicy::Custom(rule) => rule(node),
        }
    }
}

impl<F: Float> Default for BoundaryPolicy<F> {
    fn default() -> Self {
        BoundaryPolicy::Unbounded
    }
}

impl<F: Float> fmt::Debug for BoundaryPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPolicy::Unbounded => f.write_str("Unbounded"),
            BoundaryPolicy::Rectangular { width, height } => f
                .debug_struct("Rectangular")
                .field("width", width)
                .field("height", height)
                .finish(),
            BoundaryPolicy::Radial { center, max_radius } => f
                .debug_struct("Radial")
                .field("center", center)
                .field("max_radius", max_radius)
                .finish(),
            BoundaryPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
