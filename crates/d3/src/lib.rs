//! # U-Cartonize 3D
//!
//! Box packing for the U-Cartonize engine.
//!
//! The crate is layered bottom-up:
//!
//! - [`extreme_point`]: candidate positions and free-space tests for one container
//! - [`fitness`]: scoring of candidate placements
//! - [`packer`]: single-container packing of an item subset
//! - [`allocator`]: multi-container strategies built on the packer
//!
//! ```
//! use u_cartonize_d3::{best_fit, ContainerType, Item};
//! use u_cartonize_core::Config;
//!
//! let items: Vec<Item> = (0..4)
//!     .map(|i| Item::new(format!("box-{}", i), 10.0, 10.0, 10.0, 1.0))
//!     .collect();
//! let containers = vec![ContainerType::new("carton", 20.0, 20.0, 10.0).with_price(2.0)];
//!
//! let result = best_fit(&items, &containers, &Config::default()).unwrap();
//! assert_eq!(result.container_count(), 1);
//! assert!(result.all_placed());
//! ```

pub mod allocator;
pub mod boundary;
pub mod cache;
pub mod extreme_point;
pub mod fitness;
pub mod geometry;
pub mod packer;
pub mod packing_utils;
pub mod verify;

// Re-exports
pub use allocator::{
    aggressive_partial, best_fit, cost_optimized, greedy_max_utilization,
    largest_first_optimized, Allocator,
};
pub use boundary::ContainerType;
pub use cache::PackingCache;
pub use extreme_point::ExtremePointSet;
pub use fitness::{FitnessEvaluator, ScoredPlacement};
pub use geometry::Item;
pub use packer::{PackOutcome, Packer};
pub use verify::{verify_container, verify_result};
pub use u_cartonize_core::{
    Config, Error, PackedContainer, Placement, Result, Strategy, StrategyResult, UnplacedItem,
    UnplacedReason,
};
