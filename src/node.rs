//! Verlet nodes: circular point masses with implicit velocity.

use crate::arena::NodeId;
use crate::float::Float;
use crate::vec::Vec2;

/// Radius given to nodes created without one.
pub const DEFAULT_RADIUS: f32 = 5.0;
/// Restitution given to nodes created without one.
pub const DEFAULT_RESTITUTION: f32 = 0.8;

/// A circular point mass.
///
/// Velocity is never stored. It is the difference between `pos` and
/// `prev_pos`, and every operation that changes a node's velocity does so by
/// rewriting `prev_pos`.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<F: Float> {
    pub id: NodeId,
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub radius: F,
    pub mass: F,
    pub pinned: bool,
    pub restitution: F,
}

impl<F: Float> Node<F> {
    /// Zero for pinned nodes and nodes with non-positive mass, which then
    /// never yield to contact.
    pub fn inv_mass(&self) -> F {
        if self.pinned || self.mass <= F::zero() {
            F::zero()
        } else {
            F::one() / self.mass
        }
    }

    /// Per-step displacement carried into the next integration.
    pub fn velocity_raw(&self) -> Vec2<F> {
        self.pos - self.prev_pos
    }

    /// Velocity in units per second.
    pub fn velocity(&self, dt: F) -> Vec2<F> {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            return Vec2::zero();
        }
        self.velocity_raw().scale(F::one() / dt)
    }

    /// Encode `velocity` (units per second) by moving the previous position.
    /// Pinned nodes stay at rest.
    pub fn set_velocity(&mut self, velocity: Vec2<F>, dt: F) {
        if self.pinned {
            return;
        }
        self.prev_pos = self.pos - velocity.scale(dt);
    }

    pub fn add_velocity(&mut self, velocity: Vec2<F>, dt: F) {
        if self.pinned {
            return;
        }
        self.prev_pos = self.prev_pos - velocity.scale(dt);
    }

    /// Move while keeping the current velocity.
    pub fn translate(&mut self, delta: Vec2<F>) {
        self.pos = self.pos + delta;
        self.prev_pos = self.prev_pos + delta;
    }

    /// Move the way a pointer drag does: the drag distance becomes velocity.
    pub fn drag_to(&mut self, pos: Vec2<F>) {
        self.prev_pos = self.pos;
        self.pos = pos;
    }

    pub fn pin(&mut self) {
        self.pinned = true;
        self.prev_pos = self.pos;
    }

    /// Release a pinned node. It starts from rest.
    pub fn unpin(&mut self) {
        if self.pinned {
            self.pinned = false;
            self.prev_pos = self.pos;
        }
    }
}

/// Parameters for [`World::create_node`](crate::World::create_node).
///
/// # Builder Pattern
/// ```
/// use verlet2d::NodeDesc;
///
/// let desc: NodeDesc<f32> = NodeDesc::new(100.0, 50.0)
///     .with_velocity(20.0, 0.0)
///     .with_radius(8.0)
///     .with_restitution(0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDesc<F: Float> {
    pub pos: Vec2<F>,
    /// Initial velocity in units per second. Default: zero.
    pub velocity: Vec2<F>,
    pub pinned: bool,
    /// Default: 5.
    pub radius: F,
    /// Default: `radius²`.
    pub mass: Option<F>,
    /// Default: 0.8.
    pub restitution: F,
}

impl<F: Float> NodeDesc<F> {
    pub fn new(x: F, y: F) -> Self {
        NodeDesc {
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            pinned: false,
            radius: F::from_f32(DEFAULT_RADIUS),
            mass: None,
            restitution: F::from_f32(DEFAULT_RESTITUTION),
        }
    }

    pub fn at(pos: Vec2<F>) -> Self {
        Self::new(pos.x, pos.y)
    }

    pub fn with_velocity(mut self, vx: F, vy: F) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn with_radius(mut self, radius: F) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = restitution;
        self
    }

    pub(crate) fn build(self, id: NodeId, dt: F) -> Node<F> {
        let mut node = Node {
            id,
            pos: self.pos,
            prev_pos: self.pos,
            radius: self.radius,
            mass: self.mass.unwrap_or(self.radius * self.radius),
            pinned: self.pinned,
            restitution: self.restitution,
        };
        node.set_velocity(self.velocity, dt);
        node
    }
}

/// Post-creation changes to a node. Unset fields are left alone.
///
/// Radius changes do not rederive the mass; set both when needed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeUpdate<F: Float> {
    /// Teleport target. The previous position moves by the same offset, so
    /// velocity survives the move.
    pub position: Option<Vec2<F>>,
    pub radius: Option<F>,
    pub mass: Option<F>,
    /// Pinning also zeroes the node's velocity.
    pub pinned: Option<bool>,
    pub restitution: Option<F>,
}

impl<F: Float> NodeUpdate<F> {
    pub fn new() -> Self {
        NodeUpdate {
            position: None,
            radius: None,
            mass: None,
            pinned: None,
            restitution: None,
        }
    }

    pub fn with_position(mut self, x: F, y: F) -> Self {
        self.position = Some(Vec2::new(x, y));
        self
    }

    pub fn with_radius(mut self, radius: F) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = Some(pinned);
        self
    }

    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = Some(restitution);
        self
    }

    pub(crate) fn apply(&self, node: &mut Node<F>) {
        if let Some(pos) = self.position {
            node.translate(pos - node.pos);
        }
        if let Some(radius) = self.radius {
            node.radius = radius;
        }
        if let Some(mass) = self.mass {
            node.mass = mass;
        }
        match self.pinned {
            Some(true) => node.pin(),
            Some(false) => node.unpin(),
            None => {}
        }
        if let Some(restitution) = self.restitution {
            node.restitution = restitution;
        }
    }
}
