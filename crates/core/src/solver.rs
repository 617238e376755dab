//! Solver traits and configuration.

use crate::geometry::{Boundary, Geometry};
use crate::result::StrategyResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Multi-container allocation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// Commit the container type that places the most items each round.
    GreedyMaxUtilization,
    /// Commit the container type with the lowest waste ratio each round.
    #[default]
    BestFit,
    /// Largest container types first, committing the best items-per-price ratio.
    LargestFirstOptimized,
    /// Bounded rounds over shrinking item groups, scored on utilization (large orders).
    AggressivePartial,
    /// Single cheapest container if possible, otherwise the cheapest of
    /// greedy, largest-first and best-fit.
    CostOptimized,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 5] = [
        Strategy::GreedyMaxUtilization,
        Strategy::BestFit,
        Strategy::LargestFirstOptimized,
        Strategy::AggressivePartial,
        Strategy::CostOptimized,
    ];

    /// Returns the short name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GreedyMaxUtilization => "greedy",
            Self::BestFit => "best_fit",
            Self::LargestFirstOptimized => "large_first",
            Self::AggressivePartial => "aggressive",
            Self::CostOptimized => "cost_optimized",
        }
    }

    /// Looks a strategy up by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Weights of the placement fitness score (lower score is better).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitnessWeights {
    /// Penalty per unit of height above the floor.
    pub height_penalty: f64,
    /// Bonus for resting on the floor.
    pub ground_bonus: f64,
    /// Bonus scaled by the fraction of the item's surface touching walls or items.
    pub contact_weight: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            height_penalty: 10.0,
            ground_bonus: 100.0,
            contact_weight: 50.0,
        }
    }
}

/// Multiplier applied to an aggressive-packing score at a utilization threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UtilizationBonus {
    /// Minimum utilization for the bonus.
    pub threshold: f64,
    /// Score multiplier.
    pub multiplier: f64,
}

/// Score penalty for expensive containers that are not well filled.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpensivePenalty {
    /// Prices strictly above this are considered expensive.
    pub price_above: f64,
    /// The penalty applies below this utilization.
    pub utilization_below: f64,
    /// Score multiplier.
    pub multiplier: f64,
}

/// Calibration parameters of the aggressive partial-packing strategy.
///
/// The defaults are empirical values; they are tunable, not derived.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AggressiveConfig {
    /// Upper bound on rounds (further capped by the item count).
    pub max_rounds: usize,
    /// Candidate group sizes, tried in order.
    pub group_sizes: Vec<usize>,
    /// Trials below this utilization are rejected.
    pub min_utilization: f64,
    /// Weight of utilization in the score.
    pub utilization_weight: f64,
    /// Weight of placed/group-size in the score.
    pub item_ratio_weight: f64,
    /// Bonuses; the first whose threshold is met applies.
    pub bonuses: Vec<UtilizationBonus>,
    /// Smaller group sizes are skipped once the best score exceeds this.
    pub early_stop_score: f64,
    /// Optional penalty for expensive, under-filled containers.
    pub expensive_penalty: Option<ExpensivePenalty>,
}

impl Default for AggressiveConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            group_sizes: vec![12, 10, 8, 6, 4, 3, 2, 1],
            min_utilization: 0.4,
            utilization_weight: 0.85,
            item_ratio_weight: 0.15,
            bonuses: vec![
                UtilizationBonus {
                    threshold: 0.8,
                    multiplier: 1.5,
                },
                UtilizationBonus {
                    threshold: 0.7,
                    multiplier: 1.3,
                },
                UtilizationBonus {
                    threshold: 0.6,
                    multiplier: 1.2,
                },
            ],
            early_stop_score: 0.6,
            expensive_penalty: Some(ExpensivePenalty {
                price_above: 50.0,
                utilization_below: 0.75,
                multiplier: 0.8,
            }),
        }
    }
}

impl AggressiveConfig {
    /// Scores a trial; `None` if its utilization is below the floor.
    pub fn score(
        &self,
        utilization: f64,
        placed: usize,
        group_size: usize,
        price: f64,
    ) -> Option<f64> {
        if utilization < self.min_utilization {
            return None;
        }
        let item_ratio = placed as f64 / group_size.max(1) as f64;
        let mut score = utilization * self.utilization_weight + item_ratio * self.item_ratio_weight;

        if let Some(bonus) = self.bonuses.iter().find(|b| utilization >= b.threshold) {
            score *= bonus.multiplier;
        }
        if let Some(penalty) = &self.expensive_penalty {
            if price > penalty.price_above && utilization < penalty.utilization_below {
                score *= penalty.multiplier;
            }
        }
        Some(score)
    }
}

/// Common configuration for the packer and strategies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Placement fitness weights.
    pub fitness: FitnessWeights,

    /// Aggressive partial-packing calibration.
    pub aggressive: AggressiveConfig,

    /// Geometric tolerance for bounds, overlap and contact tests.
    pub epsilon: f64,

    /// Run independent trials of a round on the rayon pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fitness: FitnessWeights::default(),
            aggressive: AggressiveConfig::default(),
            epsilon: 1e-9,
            parallel: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fitness weights.
    pub fn with_fitness(mut self, fitness: FitnessWeights) -> Self {
        self.fitness = fitness;
        self
    }

    /// Sets the aggressive-strategy calibration.
    pub fn with_aggressive(mut self, aggressive: AggressiveConfig) -> Self {
        self.aggressive = aggressive;
        self
    }

    /// Sets the geometric tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enables or disables parallel trials.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let f = &self.fitness;
        if f.height_penalty < 0.0 || f.ground_bonus < 0.0 || f.contact_weight < 0.0 {
            return Err(Error::ConfigError(
                "Fitness weights must be non-negative".into(),
            ));
        }
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(Error::ConfigError("Epsilon must be non-negative".into()));
        }

        let a = &self.aggressive;
        if a.group_sizes.is_empty() || a.group_sizes.contains(&0) {
            return Err(Error::ConfigError(
                "Group sizes must be non-empty and positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&a.min_utilization) {
            return Err(Error::ConfigError(format!(
                "Minimum utilization {} must be within [0, 1]",
                a.min_utilization
            )));
        }
        if a.bonuses.iter().any(|b| b.multiplier <= 0.0) {
            return Err(Error::ConfigError(
                "Bonus multipliers must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Trait for multi-container packing solvers.
pub trait Solver {
    /// The item type this solver handles.
    type Item: Geometry;
    /// The container type this solver handles.
    type Container: Boundary;

    /// Allocates every item to container instances or to the unplaced set.
    fn solve(&self, items: &[Self::Item], containers: &[Self::Container])
        -> Result<StrategyResult>;
}
