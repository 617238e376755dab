//! Multi-container allocation strategies.
//!
//! Every strategy is the same repeated-allocation loop: each round packs the
//! remaining items (or groups of them) into every available container type,
//! scores the trials, and commits the best one. Strategies differ only in
//! their [`Plan`]: container-type order, item order, candidate groups,
//! scoring, round limit and what happens when a round finds nothing.
//!
//! Trials inside a round are independent. With [`Config::parallel`] they run
//! on the rayon pool; results are collected in trial order and the first
//! trial with the highest score wins, so parallel and sequential runs agree.

use crate::boundary::ContainerType;
use crate::cache::PackingCache;
use crate::geometry::Item;
use crate::packer::{PackOutcome, Packer};
use crate::packing_utils::{
    check_item_resolution, container_order, items_per_price, order_by_price,
    order_by_price_per_volume, packed_container, screen_items, waste_ratio,
};
use crate::verify::verify_result;
use rayon::prelude::*;
use std::collections::HashSet;
use u_cartonize_core::geometry::{Boundary, Geometry};
use u_cartonize_core::solver::{AggressiveConfig, Config, Solver, Strategy};
use u_cartonize_core::{Error, Result, StrategyResult, UnplacedItem, UnplacedReason};

/// How a trial is scored; higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scoring {
    /// Number of placed items.
    MostItems,
    /// Negated waste ratio.
    LeastWaste,
    /// Placed items per unit of price.
    ItemsPerPrice,
    /// Weighted utilization and item ratio with bonuses.
    Utilization,
}

impl Scoring {
    /// Scores a trial, or rejects it with `None`.
    fn score(
        self,
        aggressive: &AggressiveConfig,
        container: &ContainerType,
        outcome: &PackOutcome,
        group_size: usize,
    ) -> Option<f64> {
        let placed = outcome.placed_count();
        if placed == 0 {
            return None;
        }
        match self {
            Self::MostItems => Some(placed as f64),
            Self::LeastWaste => Some(-waste_ratio(container, outcome.used_volume())),
            Self::ItemsPerPrice => Some(items_per_price(container, placed)),
            Self::Utilization => aggressive.score(
                outcome.utilization(container),
                placed,
                group_size,
                container.price(),
            ),
        }
    }
}

/// Parameters of the repeated-allocation loop for one strategy.
#[derive(Debug, Clone)]
struct Plan {
    strategy: Strategy,
    scoring: Scoring,
    /// Candidate group sizes; `None` tries all remaining items at once.
    group_sizes: Option<Vec<usize>>,
    /// Stop trying smaller groups once the best score exceeds this.
    early_stop: Option<f64>,
    /// Sort items by ascending volume before the first round.
    ascending_items: bool,
    /// Upper bound on rounds in addition to the item count.
    round_limit: Option<usize>,
    /// On a round without an acceptable trial, drop the first remaining item
    /// and continue instead of stopping.
    skip_on_failure: bool,
}

impl Plan {
    /// Returns the plan for a strategy; `None` for composite strategies.
    fn for_strategy(strategy: Strategy, config: &Config) -> Option<Self> {
        let standard = |scoring| Plan {
            strategy,
            scoring,
            group_sizes: None,
            early_stop: None,
            ascending_items: false,
            round_limit: None,
            skip_on_failure: false,
        };
        match strategy {
            Strategy::GreedyMaxUtilization => Some(standard(Scoring::MostItems)),
            Strategy::BestFit => Some(standard(Scoring::LeastWaste)),
            Strategy::LargestFirstOptimized => Some(standard(Scoring::ItemsPerPrice)),
            Strategy::AggressivePartial => Some(Plan {
                strategy,
                scoring: Scoring::Utilization,
                group_sizes: Some(config.aggressive.group_sizes.clone()),
                early_stop: Some(config.aggressive.early_stop_score),
                ascending_items: true,
                round_limit: Some(config.aggressive.max_rounds),
                skip_on_failure: true,
            }),
            Strategy::CostOptimized => None,
        }
    }

    /// Group sizes to try for `remaining` items, capped and without
    /// consecutive repeats.
    fn group_sizes(&self, remaining: usize) -> Vec<usize> {
        match &self.group_sizes {
            None => vec![remaining],
            Some(sizes) => {
                let mut capped: Vec<usize> = sizes.iter().map(|&s| s.min(remaining)).collect();
                capped.dedup();
                capped
            }
        }
    }
}

/// A scored single-container trial.
#[derive(Debug, Clone)]
struct Trial {
    container_index: usize,
    group_size: usize,
    outcome: PackOutcome,
    score: f64,
}

/// Runs a multi-container strategy over a compatibility group.
///
/// # Example
///
/// ```
/// use u_cartonize_d3::{Allocator, ContainerType, Item};
/// use u_cartonize_core::{Config, Strategy};
///
/// let items = vec![
///     Item::new("mug", 100.0, 100.0, 120.0, 350.0),
///     Item::new("mug", 100.0, 100.0, 120.0, 350.0),
/// ];
/// let containers = vec![ContainerType::new("S", 200.0, 200.0, 150.0).with_price(1.5)];
///
/// let result = Allocator::new(Strategy::BestFit, Config::default())
///     .allocate(&items, &containers)
///     .unwrap();
/// assert!(result.all_placed());
/// assert_eq!(result.container_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator<'c> {
    strategy: Strategy,
    packer: Packer,
    cache: Option<&'c PackingCache>,
}

impl<'c> Allocator<'c> {
    /// Creates an allocator for a strategy.
    pub fn new(strategy: Strategy, config: Config) -> Self {
        Self {
            strategy,
            packer: Packer::new(config),
            cache: None,
        }
    }

    /// Reuses trial outcomes through a caller-owned cache.
    pub fn with_cache(mut self, cache: &'c PackingCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Returns the strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        self.packer.config()
    }

    /// Allocates `items` to instances of `containers`.
    ///
    /// Every item ends up in exactly one placement or in the unplaced set.
    /// Fails with `NoContainersAvailable` on an empty container list and with
    /// `InvalidDimension` on invalid input (including item sides not longer
    /// than [`Config::epsilon`]), before any packing.
    pub fn allocate(&self, items: &[Item], containers: &[ContainerType]) -> Result<StrategyResult> {
        if containers.is_empty() {
            return Err(Error::NoContainersAvailable);
        }
        self.config().validate()?;
        for container in containers {
            container.validate()?;
        }
        let epsilon = self.config().epsilon;
        for item in items {
            item.validate()?;
            check_item_resolution(item, epsilon)?;
        }

        let screened = screen_items(items, containers, epsilon);
        for u in &screened.rejected {
            log::warn!(
                "Item {} ('{}') fits no container type: {:?}",
                u.item_index,
                u.item_id,
                u.reason
            );
        }

        let mut result = match Plan::for_strategy(self.strategy, self.config()) {
            Some(plan) => self.repeated_allocation(
                items,
                containers,
                &screened.packable,
                &plan,
                &container_order(self.strategy, containers),
            ),
            None => self.cost_optimized(items, containers, &screened.packable),
        };
        result.unplaced.extend(screened.rejected);
        result.unplaced.sort_by_key(|u| u.item_index);

        if let Err(e) = verify_result(items, containers, &result, epsilon) {
            log::error!(
                "Strategy '{}' produced an invalid result: {}",
                self.strategy.name(),
                e
            );
            return Err(e);
        }

        log::debug!(
            "Strategy '{}': {} items in {} containers (cost {:.2}, utilization {}), {} unplaced, {} rounds",
            self.strategy.name(),
            result.placed_count(),
            result.container_count(),
            result.total_cost(),
            result.utilization_percent(),
            result.unplaced_count(),
            result.rounds
        );
        Ok(result)
    }

    /// The shared outer loop: one committed container per round.
    fn repeated_allocation(
        &self,
        items: &[Item],
        containers: &[ContainerType],
        packable: &[usize],
        plan: &Plan,
        order: &[usize],
    ) -> StrategyResult {
        let mut result = StrategyResult::new(plan.strategy);
        let mut remaining: Vec<usize> = packable.to_vec();
        if plan.ascending_items {
            remaining.sort_by(|&a, &b| items[a].measure().total_cmp(&items[b].measure()));
        }

        let max_rounds = plan
            .round_limit
            .map_or(remaining.len(), |limit| limit.min(remaining.len()));
        let mut stock: Vec<Option<usize>> = containers.iter().map(ContainerType::stock).collect();

        while !remaining.is_empty() && result.rounds < max_rounds {
            let available: Vec<usize> = order
                .iter()
                .copied()
                .filter(|&i| stock[i] != Some(0))
                .collect();
            if available.is_empty() {
                log::debug!(
                    "Strategy '{}': container stock exhausted with {} items left",
                    plan.strategy.name(),
                    remaining.len()
                );
                break;
            }
            result.rounds += 1;

            match self.run_round(plan, items, containers, &remaining, &available) {
                Some(trial) => {
                    let container = &containers[trial.container_index];
                    log::debug!(
                        "Strategy '{}' round {}: '{}' takes {}/{} items (score {:.4})",
                        plan.strategy.name(),
                        result.rounds,
                        container.id(),
                        trial.outcome.placed_count(),
                        trial.group_size,
                        trial.score
                    );
                    if let Some(left) = stock[trial.container_index].as_mut() {
                        *left -= 1;
                    }
                    let placed: HashSet<usize> = trial
                        .outcome
                        .placements
                        .iter()
                        .map(|p| p.item_index)
                        .collect();
                    remaining.retain(|i| !placed.contains(i));
                    result.containers.push(packed_container(
                        trial.container_index,
                        container,
                        trial.outcome.placements,
                    ));
                }
                None if plan.skip_on_failure => {
                    let skipped = remaining.remove(0);
                    log::debug!(
                        "Strategy '{}' round {}: no acceptable trial, skipping item {}",
                        plan.strategy.name(),
                        result.rounds,
                        skipped
                    );
                    result.unplaced.push(UnplacedItem::new(
                        skipped,
                        items[skipped].id().clone(),
                        UnplacedReason::NotPlaced,
                    ));
                }
                None => break,
            }
        }

        if !remaining.is_empty() {
            log::warn!(
                "Strategy '{}' left {} items unplaced after {} rounds",
                plan.strategy.name(),
                remaining.len(),
                result.rounds
            );
        }
        result.unplaced.extend(remaining.into_iter().map(|index| {
            UnplacedItem::new(index, items[index].id().clone(), UnplacedReason::NotPlaced)
        }));
        result
    }

    /// Tries every candidate group against every available container type and
    /// returns the best acceptable trial.
    fn run_round(
        &self,
        plan: &Plan,
        items: &[Item],
        containers: &[ContainerType],
        remaining: &[usize],
        available: &[usize],
    ) -> Option<Trial> {
        let mut best: Option<Trial> = None;

        for group_size in plan.group_sizes(remaining.len()) {
            let group = &remaining[..group_size];

            for (container_index, outcome) in self.run_trials(items, containers, group, available) {
                let container = &containers[container_index];
                let Some(score) =
                    plan.scoring
                        .score(&self.config().aggressive, container, &outcome, group_size)
                else {
                    continue;
                };
                log::trace!(
                    "Trial '{}' x {} items: {} placed, score {:.4}",
                    container.id(),
                    group_size,
                    outcome.placed_count(),
                    score
                );
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(Trial {
                        container_index,
                        group_size,
                        outcome,
                        score,
                    });
                }
            }

            if let (Some(stop), Some(b)) = (plan.early_stop, best.as_ref()) {
                if b.score > stop {
                    break;
                }
            }
        }

        best
    }

    /// Packs `group` into each available container type, in `available` order.
    fn run_trials(
        &self,
        items: &[Item],
        containers: &[ContainerType],
        group: &[usize],
        available: &[usize],
    ) -> Vec<(usize, PackOutcome)> {
        let trial = |&index: &usize| (index, self.pack(items, group, &containers[index]));
        if self.config().parallel {
            available.par_iter().map(trial).collect()
        } else {
            available.iter().map(trial).collect()
        }
    }

    fn pack(&self, items: &[Item], group: &[usize], container: &ContainerType) -> PackOutcome {
        match self.cache {
            Some(cache) => cache.pack_subset(&self.packer, items, group, container),
            None => self.packer.pack_subset(items, group, container),
        }
    }

    /// One container if the cheapest type that holds everything exists,
    /// otherwise the cheapest complete result of greedy, largest-first and
    /// best-fit.
    ///
    /// `rounds` counts only the committed plan: 1 for a single container,
    /// else the rounds of the chosen sub-strategy.
    fn cost_optimized(
        &self,
        items: &[Item],
        containers: &[ContainerType],
        packable: &[usize],
    ) -> StrategyResult {
        let mut result = StrategyResult::new(Strategy::CostOptimized);
        if packable.is_empty() {
            return result;
        }

        for index in order_by_price(containers) {
            let container = &containers[index];
            if container.stock() == Some(0) {
                continue;
            }
            let outcome = self.pack(items, packable, container);
            if outcome.all_placed() {
                result.rounds = 1;
                log::debug!(
                    "Strategy 'cost_optimized': single container '{}' holds all {} items",
                    container.id(),
                    packable.len()
                );
                result
                    .containers
                    .push(packed_container(index, container, outcome.placements));
                return result;
            }
        }

        let by_value = order_by_price_per_volume(containers);
        let candidates = [
            (Strategy::GreedyMaxUtilization, by_value.clone()),
            (
                Strategy::LargestFirstOptimized,
                container_order(Strategy::LargestFirstOptimized, containers),
            ),
            (Strategy::BestFit, by_value),
        ];

        let mut best: Option<StrategyResult> = None;
        for (strategy, order) in candidates {
            let Some(plan) = Plan::for_strategy(strategy, self.config()) else {
                continue;
            };
            let candidate = self.repeated_allocation(items, containers, packable, &plan, &order);
            log::debug!(
                "Strategy 'cost_optimized': '{}' uses {} containers for {:.2}, {} unplaced",
                strategy.name(),
                candidate.container_count(),
                candidate.total_cost(),
                candidate.unplaced_count()
            );
            let better = best.as_ref().map_or(true, |b| {
                (candidate.unplaced_count(), candidate.total_cost())
                    < (b.unplaced_count(), b.total_cost())
            });
            if better {
                best = Some(candidate);
            }
        }

        let mut result = best.unwrap_or(result);
        result.strategy = Strategy::CostOptimized;
        result
    }
}

impl Solver for Allocator<'_> {
    type Item = Item;
    type Container = ContainerType;

    fn solve(&self, items: &[Item], containers: &[ContainerType]) -> Result<StrategyResult> {
        self.allocate(items, containers)
    }
}

/// Greedy-Max-Utilization: each round commits the type placing the most items.
pub fn greedy_max_utilization(
    items: &[Item],
    containers: &[ContainerType],
    config: &Config,
) -> Result<StrategyResult> {
    Allocator::new(Strategy::GreedyMaxUtilization, config.clone()).allocate(items, containers)
}

/// Best-Fit: each round commits the type with the lowest waste ratio.
pub fn best_fit(
    items: &[Item],
    containers: &[ContainerType],
    config: &Config,
) -> Result<StrategyResult> {
    Allocator::new(Strategy::BestFit, config.clone()).allocate(items, containers)
}

/// Largest-First-Optimized: largest types first, best items-per-price ratio wins.
pub fn largest_first_optimized(
    items: &[Item],
    containers: &[ContainerType],
    config: &Config,
) -> Result<StrategyResult> {
    Allocator::new(Strategy::LargestFirstOptimized, config.clone()).allocate(items, containers)
}

/// Aggressive-Partial-Packing: bounded rounds over shrinking groups of the smallest items.
pub fn aggressive_partial(
    items: &[Item],
    containers: &[ContainerType],
    config: &Config,
) -> Result<StrategyResult> {
    Allocator::new(Strategy::AggressivePartial, config.clone()).allocate(items, containers)
}

/// Cheapest single container if one holds everything, else the cheapest multi-container plan.
pub fn cost_optimized(
    items: &[Item],
    containers: &[ContainerType],
    config: &Config,
) -> Result<StrategyResult> {
    Allocator::new(Strategy::CostOptimized, config.clone()).allocate(items, containers)
}
