//! Packing result representation.

use crate::geometry::ItemId;
use crate::placement::Placement;
use crate::solver::Strategy;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why an item ended up unplaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnplacedReason {
    /// The item exceeds every container interior in every allowed orientation.
    NeverFits,
    /// The item is heavier than every container's weight limit.
    OverWeight,
    /// The item could fit but no container had room left for it.
    NotPlaced,
}

/// An item that could not be placed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnplacedItem {
    /// Index of the item in the input slice.
    pub item_index: usize,
    /// The item's ID.
    pub item_id: ItemId,
    /// Reason the item was left out.
    pub reason: UnplacedReason,
}

impl UnplacedItem {
    /// Creates a new unplaced entry.
    pub fn new(item_index: usize, item_id: ItemId, reason: UnplacedReason) -> Self {
        Self {
            item_index,
            item_id,
            reason,
        }
    }
}

/// A container instance with the items placed in it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackedContainer {
    /// ID of the container type used.
    pub container_id: String,

    /// Index of the container type in the input list.
    pub container_index: usize,

    /// Inner dimensions of the container.
    pub dimensions: Vector3<f64>,

    /// Maximum placed weight.
    pub max_weight: f64,

    /// Price of the container instance.
    pub price: f64,

    /// Placements in the order they were made.
    pub placements: Vec<Placement>,
}

impl PackedContainer {
    /// Returns the inner volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns the volume occupied by placed items.
    pub fn used_volume(&self) -> f64 {
        self.placements.iter().map(Placement::volume).sum()
    }

    /// Returns used volume divided by inner volume.
    pub fn utilization(&self) -> f64 {
        let volume = self.volume();
        if volume > 0.0 {
            self.used_volume() / volume
        } else {
            0.0
        }
    }

    /// Returns the unused inner volume.
    pub fn remaining_volume(&self) -> f64 {
        (self.volume() - self.used_volume()).max(0.0)
    }

    /// Returns the sum of placed weights.
    pub fn placed_weight(&self) -> f64 {
        self.placements.iter().map(|p| p.weight).sum()
    }

    /// Returns the number of placed items.
    pub fn item_count(&self) -> usize {
        self.placements.len()
    }
}

/// Result of a multi-container strategy run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrategyResult {
    /// Strategy that produced this result.
    pub strategy: Strategy,

    /// Container instances used, in the order they were committed.
    pub containers: Vec<PackedContainer>,

    /// Items that could not be placed anywhere.
    pub unplaced: Vec<UnplacedItem>,

    /// Number of allocation rounds executed.
    pub rounds: usize,
}

impl StrategyResult {
    /// Creates a new empty result.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            containers: Vec::new(),
            unplaced: Vec::new(),
            rounds: 0,
        }
    }

    /// Returns true if every item was placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.containers.iter().map(PackedContainer::item_count).sum()
    }

    /// Returns the number of unplaced items.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Returns the number of container instances used.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Returns the summed price of all container instances.
    pub fn total_cost(&self) -> f64 {
        self.containers.iter().map(|c| c.price).sum()
    }

    /// Returns the summed placed weight.
    pub fn total_weight(&self) -> f64 {
        self.containers.iter().map(PackedContainer::placed_weight).sum()
    }

    /// Returns total used volume over total container volume.
    pub fn utilization(&self) -> f64 {
        let volume: f64 = self.containers.iter().map(PackedContainer::volume).sum();
        if volume > 0.0 {
            self.containers
                .iter()
                .map(PackedContainer::used_volume)
                .sum::<f64>()
                / volume
        } else {
            0.0
        }
    }

    /// Iterates over every placement with the index of its container.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &Placement)> {
        self.containers
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.placements.iter().map(move |p| (i, p)))
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization() * 100.0)
    }

    /// Computes summary statistics.
    pub fn summary(&self) -> StrategySummary {
        StrategySummary::from(self)
    }

    /// Merges the result of another item group into this one.
    ///
    /// `item_offset` is added to the other result's item indices, so groups
    /// packed from consecutive slices of one order keep distinct indices.
    pub fn merge(&mut self, other: StrategyResult, item_offset: usize) {
        for mut container in other.containers {
            for placement in &mut container.placements {
                placement.item_index += item_offset;
            }
            self.containers.push(container);
        }
        self.unplaced
            .extend(other.unplaced.into_iter().map(|mut u| {
                u.item_index += item_offset;
                u
            }));
        self.rounds += other.rounds;
    }
}

/// Summary statistics for a strategy result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrategySummary {
    /// Strategy name.
    pub strategy: String,
    /// Container instances used.
    pub containers_used: usize,
    /// Total price of used containers.
    pub total_cost: f64,
    /// Items placed.
    pub total_placed: usize,
    /// Items left unplaced.
    pub total_unplaced: usize,
    /// Utilization percentage across all containers.
    pub utilization_percent: f64,
    /// Total placed weight.
    pub total_weight: f64,
}

impl From<&StrategyResult> for StrategySummary {
    fn from(result: &StrategyResult) -> Self {
        Self {
            strategy: result.strategy.name().to_string(),
            containers_used: result.container_count(),
            total_cost: result.total_cost(),
            total_placed: result.placed_count(),
            total_unplaced: result.unplaced_count(),
            utilization_percent: result.utilization() * 100.0,
            total_weight: result.total_weight(),
        }
    }
}
