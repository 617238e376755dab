//! Invariant checks for strategy results.
//!
//! A failure here means the packer or a strategy is wrong, not that the
//! order was too large: capacity problems surface as unplaced items.

use crate::boundary::ContainerType;
use crate::geometry::Item;
use u_cartonize_core::geometry::{Boundary, Geometry, Orientation3D};
use u_cartonize_core::{Error, PackedContainer, Result, StrategyResult};

/// Checks no-overlap, bounds, weight, orientation and conservation for a result.
pub fn verify_result(
    items: &[Item],
    containers: &[ContainerType],
    result: &StrategyResult,
    epsilon: f64,
) -> Result<()> {
    let mut seen = vec![0usize; items.len()];

    for (slot, packed) in result.containers.iter().enumerate() {
        let container = containers.get(packed.container_index).ok_or_else(|| {
            violation(format!(
                "container #{} refers to unknown type index {}",
                slot, packed.container_index
            ))
        })?;
        if container.id() != packed.container_id {
            return Err(violation(format!(
                "container #{} is labelled '{}' but type {} is '{}'",
                slot,
                packed.container_id,
                packed.container_index,
                container.id()
            )));
        }
        verify_container(items, packed, epsilon)
            .map_err(|e| violation(format!("container #{} ('{}'): {}", slot, packed.container_id, e)))?;

        for p in &packed.placements {
            seen[p.item_index] += 1;
        }
    }

    for u in &result.unplaced {
        let count = seen.get_mut(u.item_index).ok_or_else(|| {
            violation(format!("unplaced entry refers to unknown item {}", u.item_index))
        })?;
        *count += 1;
    }

    if let Some((index, count)) = seen.iter().enumerate().find(|(_, c)| **c != 1) {
        return Err(violation(format!(
            "item {} ('{}') appears {} times across placements and unplaced",
            index,
            items[index].id(),
            count
        )));
    }

    Ok(())
}

/// Checks one packed container against its items.
pub fn verify_container(items: &[Item], packed: &PackedContainer, epsilon: f64) -> Result<()> {
    for (i, p) in packed.placements.iter().enumerate() {
        let item = items
            .get(p.item_index)
            .ok_or_else(|| violation(format!("placement refers to unknown item {}", p.item_index)))?;

        if !Orientation3D::is_valid_size(
            &item.dimensions(),
            &p.size,
            item.orientation_constraint(),
            epsilon,
        ) || p.orientation.apply(&item.dimensions()) != p.size
        {
            return Err(violation(format!(
                "item {} has size {:?}, not an allowed orientation of {:?}",
                p.item_index,
                p.size,
                item.dimensions()
            )));
        }

        let aabb = p.aabb();
        if !aabb.within(&packed.dimensions, epsilon) {
            return Err(violation(format!(
                "item {} at {:?} leaves the container",
                p.item_index, p.position
            )));
        }

        for q in &packed.placements[i + 1..] {
            if aabb.intersects(&q.aabb(), epsilon) {
                return Err(violation(format!(
                    "items {} and {} overlap",
                    p.item_index, q.item_index
                )));
            }
        }
    }

    let weight = packed.placed_weight();
    if weight > packed.max_weight + epsilon {
        return Err(violation(format!(
            "placed weight {} exceeds limit {}",
            weight, packed.max_weight
        )));
    }

    Ok(())
}

fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing_utils::packed_container;
    use nalgebra::Vector3;
    use u_cartonize_core::{Placement, Strategy, UnplacedItem, UnplacedReason};

    fn placement(index: usize, x: f64) -> Placement {
        Placement::new(
            index,
            format!("I{}", index),
            Vector3::new(x, 0.0, 0.0),
            Vector3::new(10.0, 10.0, 10.0),
            Orientation3D::IDENTITY,
            1.0,
        )
    }

    fn fixture() -> (Vec<Item>, Vec<ContainerType>) {
        let items = (0..3)
            .map(|i| Item::new(format!("I{}", i), 10.0, 10.0, 10.0, 1.0))
            .collect();
        let containers = vec![ContainerType::new("C", 30.0, 10.0, 10.0)];
        (items, containers)
    }

    #[test]
    fn test_valid_result() {
        let (items, containers) = fixture();
        let mut result = StrategyResult::new(Strategy::BestFit);
        result.containers.push(packed_container(
            0,
            &containers[0],
            vec![placement(0, 0.0), placement(1, 10.0)],
        ));
        result
            .unplaced
            .push(UnplacedItem::new(2, "I2".into(), UnplacedReason::NotPlaced));

        assert!(verify_result(&items, &containers, &result, 1e-9).is_ok());
    }

    #[test]
    fn test_overlap_detected() {
        let (items, containers) = fixture();
        let mut result = StrategyResult::new(Strategy::BestFit);
        result.containers.push(packed_container(
            0,
            &containers[0],
            vec![placement(0, 0.0), placement(1, 5.0), placement(2, 20.0)],
        ));

        let err = verify_result(&items, &containers, &result, 1e-9).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn test_out_of_bounds_detected() {
        let (items, containers) = fixture();
        let mut result = StrategyResult::new(Strategy::BestFit);
        result.containers.push(packed_container(
            0,
            &containers[0],
            vec![placement(0, 0.0), placement(1, 10.0), placement(2, 25.0)],
        ));

        assert!(verify_result(&items, &containers, &result, 1e-9).is_err());
    }

    #[test]
    fn test_missing_item_detected() {
        let (items, containers) = fixture();
        let mut result = StrategyResult::new(Strategy::BestFit);
        result.containers.push(packed_container(
            0,
            &containers[0],
            vec![placement(0, 0.0), placement(1, 10.0)],
        ));

        assert!(verify_result(&items, &containers, &result, 1e-9).is_err());
    }

    #[test]
    fn test_weight_limit_detected() {
        let (items, _) = fixture();
        let containers = vec![ContainerType::new("C", 30.0, 10.0, 10.0).with_max_weight(1.5)];
        let packed = packed_container(0, &containers[0], vec![placement(0, 0.0), placement(1, 10.0)]);

        assert!(verify_container(&items, &packed, 1e-9).is_err());
    }
}
