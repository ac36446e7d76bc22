//! Distance constraints between two nodes.

use crate::arena::{ConstraintId, NodeId};
use crate::float::Float;

/// Stiffness given to constraints created without one.
pub const DEFAULT_STIFFNESS: f32 = 0.3;

/// Keeps two nodes at `rest_length` from each other.
///
/// Endpoints are held by ID, so a constraint can never outlive its nodes
/// unnoticed. With both `allow_*` flags unset the constraint is a rigid rod.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint<F: Float> {
    pub id: ConstraintId,
    pub start: NodeId,
    pub end: NodeId,
    pub rest_length: F,
    pub stiffness: F,
    /// Go slack when shorter than the rest length (rope).
    pub allow_compression: bool,
    /// Go slack when longer than the rest length.
    pub allow_tension: bool,
}

impl<F: Float> Constraint<F> {
    pub fn connects(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    /// Whether a constraint at `distance` should be corrected at all.
    pub fn is_engaged(&self, distance: F) -> bool {
        if self.allow_compression && distance < self.rest_length {
            return false;
        }
        if self.allow_tension && distance > self.rest_length {
            return false;
        }
        true
    }
}

/// Parameters for [`World::create_constraint`](crate::World::create_constraint).
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintDesc<F: Float> {
    pub start: NodeId,
    pub end: NodeId,
    /// `None`, zero or negative uses the endpoint distance at creation time.
    pub rest_length: Option<F>,
    /// Default: 0.3.
    pub stiffness: F,
    pub allow_compression: bool,
    pub allow_tension: bool,
}

impl<F: Float> ConstraintDesc<F> {
    pub fn new(start: NodeId, end: NodeId) -> Self {
        ConstraintDesc {
            start,
            end,
            rest_length: None,
            stiffness: F::from_f32(DEFAULT_STIFFNESS),
            allow_compression: false,
            allow_tension: false,
        }
    }

    /// A rope: pulls when stretched, slack when compressed.
    pub fn rope(start: NodeId, end: NodeId) -> Self {
        Self::new(start, end).allow_compression()
    }

    pub fn with_rest_length(mut self, rest_length: F) -> Self {
        self.rest_length = Some(rest_length);
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn allow_compression(mut self) -> Self {
        self.allow_compression = true;
        self
    }

    pub fn allow_tension(mut self) -> Self {
        self.allow_tension = true;
        self
    }
}

/// Post-creation changes to a constraint. Endpoints are fixed for life.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstraintUpdate<F: Float> {
    pub rest_length: Option<F>,
    pub stiffness: Option<F>,
    pub allow_compression: Option<bool>,
    pub allow_tension: Option<bool>,
}

impl<F: Float> ConstraintUpdate<F> {
    pub fn new() -> Self {
        ConstraintUpdate {
            rest_length: None,
            stiffness: None,
            allow_compression: None,
            allow_tension: None,
        }
    }

    pub fn with_rest_length(mut self, rest_length: F) -> Self {
        self.rest_length = Some(rest_length);
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = Some(stiffness);
        self
    }

    pub fn with_allow_compression(mut self, allow: bool) -> Self {
        self.allow_compression = Some(allow);
        self
    }

    pub fn with_allow_tension(mut self, allow: bool) -> Self {
        self.allow_tension = Some(allow);
        self
    }

    pub(crate) fn apply(&self, constraint: &mut Constraint<F>) {
        if let Some(rest_length) = self.rest_length {
            constraint.rest_length = rest_length;
        }
        if let Some(stiffness) = self.stiffness {
            constraint.stiffness = stiffness;
        }
        if let Some(allow) = self.allow_compression {
            constraint.allow_compression = allow;
        }
        if let Some(allow) = self.allow_tension {
            constraint.allow_tension = allow;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaKey;

    fn constraint(allow_compression: bool, allow_tension: bool) -> Constraint<f32> {
        Constraint {
            id: ConstraintId::from_index(0),
            start: NodeId::from_index(0),
            end: NodeId::from_index(1),
            rest_length: 10.0,
            stiffness: 1.0,
            allow_compression,
            allow_tension,
        }
    }

    #[test]
    fn rigid_is_always_engaged() {
        let c = constraint(false, false);
        assert!(c.is_engaged(5.0));
        assert!(c.is_engaged(15.0));
    }

    #[test]
    fn compression_allowed_goes_slack_when_short() {
        let c = constraint(true, false);
        assert!(!c.is_engaged(5.0));
        assert!(c.is_engaged(15.0));
    }

    #[test]
    fn tension_allowed_goes_slack_when_long() {
        let c = constraint(false, true);
        assert!(c.is_engaged(5.0));
        assert!(!c.is_engaged(15.0));
    }

    #[test]
    fn update_leaves_unset_fields() {
        let mut c = constraint(false, false);
        ConstraintUpdate::new().with_stiffness(0.5).with_allow_tension(true).apply(&mut c);
        assert_eq!(c.stiffness, 0.5);
        assert_eq!(c.rest_length, 10.0);
        assert!(c.allow_tension);
        assert!(!c.allow_compression);
    }
}
