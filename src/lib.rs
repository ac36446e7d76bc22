//! 2D Verlet physics for interactive toys and games.
//!
//! `verlet2d` simulates circular nodes joined by distance constraints. Nodes
//! move by Verlet integration with gravity and air friction, push each other
//! apart on contact, and are kept inside a boundary. Good for ragdolls,
//! ropes, cloth, and ball pits where stable real-time behaviour matters more
//! than physical exactness.
//!
//! # Features
//!
//! - **Verlet integration**: Implicit velocity, no stored velocity field
//! - **Constraint solver**: Gauss-Seidel relaxation, rigid or one-sided (rope)
//! - **Collisions**: Exhaustive pairwise circle separation, mass weighted,
//!   with restitution
//! - **Boundaries**: Rectangular, radial, or custom containment
//! - **Stable IDs**: Deleted nodes and constraints are never reissued
//! - **Ropes & cloth**: `Chain` and `Cloth` builders with tear support
//! - **Observable**: Monitor steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod arena;
pub mod node;
pub mod constraint;
pub mod integrator;
pub mod solver;
pub mod collision;
pub mod boundary;
pub mod interaction;
pub mod world;
pub mod chain;
pub mod grid;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use arena::{ConstraintId, NodeId};
pub use node::{Node, NodeDesc, NodeUpdate};
pub use constraint::{Constraint, ConstraintDesc, ConstraintUpdate};
pub use boundary::BoundaryPolicy;
pub use interaction::{Interaction, NoInteraction, PointerRepulsion};
pub use world::World;
pub use chain::{Chain, ChainConfig};
pub use grid::{Cloth, GridConfig};
pub use config::{StepOptions, WorldConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::{PhysicsError, PhysicsResult};
