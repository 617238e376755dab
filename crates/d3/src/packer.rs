//! Single-container packer.

use crate::boundary::ContainerType;
use crate::extreme_point::ExtremePointSet;
use crate::fitness::FitnessEvaluator;
use crate::geometry::Item;
use crate::packing_utils::check_item_resolution;
use u_cartonize_core::aabb::fits_within;
use u_cartonize_core::geometry::{Boundary, Geometry};
use u_cartonize_core::solver::Config;
use u_cartonize_core::{Placement, Result, UnplacedItem, UnplacedReason, AABB3D};

/// Placements made in one container instance plus the items left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackOutcome {
    /// Placements, in placement order.
    pub placements: Vec<Placement>,
    /// Items that were not placed.
    pub unplaced: Vec<UnplacedItem>,
}

impl PackOutcome {
    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if every item was placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the placed volume.
    pub fn used_volume(&self) -> f64 {
        self.placements.iter().map(Placement::volume).sum()
    }

    /// Returns the placed weight.
    pub fn placed_weight(&self) -> f64 {
        self.placements.iter().map(|p| p.weight).sum()
    }

    /// Returns placed volume over the container's inner volume.
    pub fn utilization(&self, container: &ContainerType) -> f64 {
        let volume = container.measure();
        if volume > 0.0 {
            self.used_volume() / volume
        } else {
            0.0
        }
    }
}

/// Places as many items as possible into one container instance.
///
/// Items are taken largest volume first. Each item is tried in every allowed
/// orientation at every extreme-point candidate; the feasible pair with the
/// lowest fitness score is committed.
#[derive(Debug, Clone)]
pub struct Packer {
    config: Config,
}

impl Packer {
    /// Creates a new packer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates a packer with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Packs `items` into one instance of `container`.
    ///
    /// Fails with `InvalidDimension` before any placement if an item or the
    /// container is invalid, or if an item side is not longer than
    /// [`Config::epsilon`]. Items that cannot be placed are reported in
    /// [`PackOutcome::unplaced`].
    pub fn pack(&self, items: &[Item], container: &ContainerType) -> Result<PackOutcome> {
        container.validate()?;
        for item in items {
            item.validate()?;
            check_item_resolution(item, self.config.epsilon)?;
        }
        let subset: Vec<usize> = (0..items.len()).collect();
        Ok(self.pack_subset(items, &subset, container))
    }

    /// Packs the items at `subset` (indices into `items`) into one instance of
    /// `container`. Inputs are assumed to be validated.
    ///
    /// Placement and unplaced indices refer to `items`.
    pub fn pack_subset(
        &self,
        items: &[Item],
        subset: &[usize],
        container: &ContainerType,
    ) -> PackOutcome {
        let epsilon = self.config.epsilon;
        let dims = container.dimensions();
        let evaluator = FitnessEvaluator::new(self.config.fitness, epsilon);
        let mut space = ExtremePointSet::new(dims, epsilon);
        let mut outcome = PackOutcome::default();
        let mut placed_weight = 0.0;

        // Largest first; the sort is stable so equal volumes keep input order.
        let mut order: Vec<usize> = subset.to_vec();
        order.sort_by(|&a, &b| items[b].measure().total_cmp(&items[a].measure()));

        for index in order {
            let item = &items[index];
            let orientations: Vec<_> = item
                .orientations()
                .into_iter()
                .filter(|(_, size)| fits_within(size, &dims, epsilon))
                .collect();

            if orientations.is_empty() {
                outcome.unplaced.push(UnplacedItem::new(
                    index,
                    item.id().clone(),
                    UnplacedReason::NeverFits,
                ));
                continue;
            }

            if placed_weight + item.weight() > container.max_weight() {
                outcome.unplaced.push(UnplacedItem::new(
                    index,
                    item.id().clone(),
                    UnplacedReason::OverWeight,
                ));
                continue;
            }

            match evaluator.best_placement(&space, &orientations) {
                Some(best) => {
                    space.insert(AABB3D::from_position_size(best.position, best.size));
                    placed_weight += item.weight();
                    outcome.placements.push(Placement::new(
                        index,
                        item.id().clone(),
                        best.position,
                        best.size,
                        best.orientation,
                        item.weight(),
                    ));
                }
                None => outcome.unplaced.push(UnplacedItem::new(
                    index,
                    item.id().clone(),
                    UnplacedReason::NotPlaced,
                )),
            }
        }

        outcome
    }
}
