//! Caller-owned cache of single-container packing trials.
//!
//! Strategies repeat the same (item subset, container type) trial across
//! rounds and across strategy runs on one order. A [`PackingCache`] handed to
//! [`Allocator::with_cache`](crate::allocator::Allocator::with_cache) reuses
//! those outcomes. There is no process-wide cache.
//!
//! Keys are canonical: they capture the geometry, weight and orientation
//! constraint of each item in trial order, the container's dimensions and
//! weight limit, and the packer parameters, but not item or container IDs.
//! Outcomes are stored relative to the trial subset and remapped on a hit.

use crate::boundary::ContainerType;
use crate::geometry::Item;
use crate::packer::{PackOutcome, Packer};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use u_cartonize_core::geometry::{Boundary, Geometry, OrientationConstraint};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TrialKey {
    container: [u64; 4],
    params: [u64; 4],
    items: Vec<([u64; 4], OrientationConstraint)>,
}

impl TrialKey {
    fn new(packer: &Packer, items: &[Item], subset: &[usize], container: &ContainerType) -> Self {
        let dims = container.dimensions();
        let config = packer.config();
        Self {
            container: [
                dims.x.to_bits(),
                dims.y.to_bits(),
                dims.z.to_bits(),
                container.max_weight().to_bits(),
            ],
            params: [
                config.fitness.height_penalty.to_bits(),
                config.fitness.ground_bonus.to_bits(),
                config.fitness.contact_weight.to_bits(),
                config.epsilon.to_bits(),
            ],
            items: subset
                .iter()
                .map(|&i| {
                    let item = &items[i];
                    let d = item.dimensions();
                    (
                        [
                            d.x.to_bits(),
                            d.y.to_bits(),
                            d.z.to_bits(),
                            item.weight().to_bits(),
                        ],
                        item.orientation_constraint(),
                    )
                })
                .collect(),
        }
    }
}

/// Cache of packing outcomes keyed by a canonical fingerprint of the trial.
#[derive(Debug, Default)]
pub struct PackingCache {
    entries: Mutex<HashMap<TrialKey, PackOutcome>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl PackingCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached trials.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of lookups served from the cache.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups that had to run the packer.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Returns the outcome of packing `subset` into `container`, running the
    /// packer only on a miss.
    pub fn pack_subset(
        &self,
        packer: &Packer,
        items: &[Item],
        subset: &[usize],
        container: &ContainerType,
    ) -> PackOutcome {
        let key = TrialKey::new(packer, items, subset, container);

        let cached = self.lock().get(&key).cloned();
        if let Some(relative) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return remap(relative, items, subset);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let outcome = packer.pack_subset(items, subset, container);
        self.lock().insert(key, to_relative(&outcome, subset));
        outcome
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<TrialKey, PackOutcome>> {
        // A poisoned lock only means another trial panicked; the map is still usable.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Rewrites item indices as positions within `subset`.
fn to_relative(outcome: &PackOutcome, subset: &[usize]) -> PackOutcome {
    let position = |index: usize| subset.iter().position(|&i| i == index).unwrap_or(index);
    let mut relative = outcome.clone();
    for p in &mut relative.placements {
        p.item_index = position(p.item_index);
    }
    for u in &mut relative.unplaced {
        u.item_index = position(u.item_index);
    }
    relative
}

/// Maps a relative outcome back onto the caller's items.
fn remap(mut relative: PackOutcome, items: &[Item], subset: &[usize]) -> PackOutcome {
    for p in &mut relative.placements {
        p.item_index = subset[p.item_index];
        p.item_id = items[p.item_index].id().clone();
    }
    for u in &mut relative.unplaced {
        u.item_index = subset[u.item_index];
        u.item_id = items[u.item_index].id().clone();
    }
    relative
}
