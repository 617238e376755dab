//! Shared utilities for the multi-container strategies.
//!
//! - [`screen_items`]: splits off items no container type can ever take
//! - [`container_order`]: the order in which a strategy tries container types
//! - [`packed_container`]: turns a committed trial into a [`PackedContainer`]
//! - [`waste_ratio`] and [`items_per_price`]: per-trial selection metrics

use crate::boundary::ContainerType;
use crate::geometry::Item;
use u_cartonize_core::aabb::fits_within;
use u_cartonize_core::geometry::{Boundary, Geometry};
use u_cartonize_core::{
    Error, PackedContainer, Placement, Result, Strategy, UnplacedItem, UnplacedReason,
};

/// Items that can go into at least one container type, and the rest.
#[derive(Debug, Clone, Default)]
pub struct ScreenedItems {
    /// Indices of packable items, in input order.
    pub packable: Vec<usize>,
    /// Items rejected up front.
    pub rejected: Vec<UnplacedItem>,
}

/// Rejects an item with a side no longer than `epsilon`.
///
/// Overlap tests shrink each box by `epsilon`, so such an item would never
/// collide with anything.
pub fn check_item_resolution(item: &Item, epsilon: f64) -> Result<()> {
    let d = item.dimensions();
    if d.iter().any(|&side| side <= epsilon) {
        return Err(Error::InvalidDimension(format!(
            "Item '{}' has a side at or below the tolerance {}: {}x{}x{}",
            item.id(),
            epsilon,
            d.x,
            d.y,
            d.z
        )));
    }
    Ok(())
}

/// Separates items that fit no container type in any allowed orientation
/// (`NeverFits`) or are heavier than every container's limit (`OverWeight`).
pub fn screen_items(items: &[Item], containers: &[ContainerType], epsilon: f64) -> ScreenedItems {
    let mut screened = ScreenedItems::default();

    for (index, item) in items.iter().enumerate() {
        let orientations = item.orientations();
        let fits_somewhere = containers.iter().any(|c| {
            let dims = c.dimensions();
            orientations
                .iter()
                .any(|(_, size)| fits_within(size, &dims, epsilon))
        });
        let reason = if !fits_somewhere {
            Some(UnplacedReason::NeverFits)
        } else if containers.iter().all(|c| item.weight() > c.max_weight()) {
            Some(UnplacedReason::OverWeight)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                screened
                    .rejected
                    .push(UnplacedItem::new(index, item.id().clone(), reason))
            }
            None => screened.packable.push(index),
        }
    }

    screened
}

/// Returns container-type indices in the order a strategy tries them.
///
/// Sorts are stable, so equal keys keep input order.
pub fn container_order(strategy: Strategy, containers: &[ContainerType]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..containers.len()).collect();
    match strategy {
        Strategy::LargestFirstOptimized => {
            order.sort_by(|&a, &b| containers[b].measure().total_cmp(&containers[a].measure()));
        }
        Strategy::AggressivePartial => {
            order.sort_by(|&a, &b| {
                containers[a]
                    .price_per_volume()
                    .total_cmp(&containers[b].price_per_volume())
            });
        }
        Strategy::GreedyMaxUtilization | Strategy::BestFit | Strategy::CostOptimized => {}
    }
    order
}

/// Returns container-type indices sorted by ascending price per volume.
pub fn order_by_price_per_volume(containers: &[ContainerType]) -> Vec<usize> {
    container_order(Strategy::AggressivePartial, containers)
}

/// Returns container-type indices sorted by ascending price.
pub fn order_by_price(containers: &[ContainerType]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..containers.len()).collect();
    order.sort_by(|&a, &b| containers[a].price().total_cmp(&containers[b].price()));
    order
}

/// Builds a packed container record for a committed trial.
pub fn packed_container(
    container_index: usize,
    container: &ContainerType,
    placements: Vec<Placement>,
) -> PackedContainer {
    PackedContainer {
        container_id: container.id().to_string(),
        container_index,
        dimensions: container.dimensions(),
        max_weight: container.max_weight(),
        price: container.price(),
        placements,
    }
}

/// Fraction of the container's volume left empty by `used_volume`.
pub fn waste_ratio(container: &ContainerType, used_volume: f64) -> f64 {
    let volume = container.measure();
    if volume > 0.0 {
        (volume - used_volume) / volume
    } else {
        1.0
    }
}

/// Items placed per unit of price; a non-positive price counts as 1.
pub fn items_per_price(container: &ContainerType, placed: usize) -> f64 {
    let price = if container.price() > 0.0 {
        container.price()
    } else {
        1.0
    };
    placed as f64 / price
}
