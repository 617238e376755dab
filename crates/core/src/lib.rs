//! # U-Cartonize Core
//!
//! Core traits and types for the U-Cartonize container packing engine.
//!
//! This crate provides the types shared between the packing algorithms and
//! their callers.
//!
//! ## Core Components
//!
//! - **Geometry traits**: `Geometry`, `Boundary` and the `Orientation3D` enumeration
//! - **AABB math**: overlap, containment and contact-area tests
//! - **Results**: `Placement`, `PackedContainer`, `StrategyResult`
//! - **Configuration**: `Config`, `FitnessWeights`, `AggressiveConfig`, `Strategy`
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod aabb;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use aabb::AABB3D;
pub use error::{Error, Result};
pub use geometry::{Boundary, Geometry, ItemId, Orientation3D, OrientationConstraint};
pub use placement::Placement;
pub use result::{PackedContainer, StrategyResult, StrategySummary, UnplacedItem, UnplacedReason};
pub use solver::{
    AggressiveConfig, Config, ExpensivePenalty, FitnessWeights, Solver, Strategy,
    UtilizationBonus,
};
