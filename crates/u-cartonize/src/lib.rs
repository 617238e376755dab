//! # U-Cartonize
//!
//! Container packing engine: assigns a set of rectangular items to instances
//! of one or more container types and computes a non-overlapping 3D position
//! and orientation for every placed item.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use u_cartonize::d3::{Allocator, ContainerType, Item};
//! use u_cartonize::{Config, Strategy};
//!
//! let items = vec![Item::new("book", 200.0, 150.0, 40.0, 600.0)];
//! let containers = vec![ContainerType::new("M", 300.0, 200.0, 150.0).with_price(2.5)];
//!
//! let result = Allocator::new(Strategy::BestFit, Config::default())
//!     .allocate(&items, &containers)?;
//! ```
//!
//! ## Strategies
//!
//! - `GreedyMaxUtilization`: most items per container
//! - `BestFit`: least empty volume per container
//! - `LargestFirstOptimized`: largest containers first, most items per price
//! - `AggressivePartial`: bounded rounds over groups of the smallest items
//! - `CostOptimized`: cheapest single container, else cheapest plan
//!
//! ## Feature Flags
//!
//! - `d3` (default): 3D box packing
//! - `serde`: Serialization support

/// Core traits and abstractions.
pub use u_cartonize_core as core;

/// 3D box packing.
#[cfg(feature = "d3")]
pub use u_cartonize_d3 as d3;

// Re-export commonly used types at root level
pub use u_cartonize_core::{
    Config, Error, Placement, Result, Solver, Strategy, StrategyResult, UnplacedReason,
};
