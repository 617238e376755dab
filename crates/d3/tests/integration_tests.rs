//! Integration tests for u-cartonize-d3.

use approx::assert_relative_eq;
use u_cartonize_core::geometry::{Geometry, OrientationConstraint};
use u_cartonize_core::{Config, Error, Strategy, StrategyResult, UnplacedReason};
use u_cartonize_d3::{
    aggressive_partial, best_fit, verify_result, Allocator, ContainerType, Item, Packer,
    PackingCache,
};

/// A mixed order with repeatable dimensions.
fn mixed_items(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            let w = 10.0 + ((i * 7) % 13) as f64 * 5.0;
            let l = 10.0 + ((i * 11) % 9) as f64 * 5.0;
            let h = 5.0 + ((i * 5) % 7) as f64 * 5.0;
            let item = Item::new(format!("SKU-{}", i), w, l, h, 50.0 + (i % 5) as f64 * 100.0);
            if i % 4 == 0 {
                item.with_orientation(OrientationConstraint::Upright)
            } else {
                item
            }
        })
        .collect()
}

fn carton_catalog() -> Vec<ContainerType> {
    vec![
        ContainerType::new("S", 60.0, 40.0, 30.0)
            .with_price(1.5)
            .with_max_weight(1500.0),
        ContainerType::new("M", 80.0, 60.0, 50.0)
            .with_price(3.0)
            .with_max_weight(3000.0),
        ContainerType::new("L", 120.0, 80.0, 60.0)
            .with_price(6.0)
            .with_max_weight(6000.0),
    ]
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_single_item_at_origin() {
        let items = vec![Item::new("A", 100.0, 100.0, 50.0, 500.0)];
        let container = ContainerType::new("C", 200.0, 200.0, 100.0);

        let outcome = Packer::default_config().pack(&items, &container).unwrap();

        assert!(outcome.unplaced.is_empty());
        assert_eq!(outcome.placements.len(), 1);
        assert_relative_eq!(outcome.placements[0].position.norm(), 0.0);
    }

    #[test]
    fn test_oversized_item_never_fits() {
        let items = vec![Item::new("B", 300.0, 300.0, 300.0, 1000.0)];
        let container = ContainerType::new("C", 200.0, 200.0, 100.0);

        let outcome = Packer::default_config().pack(&items, &container).unwrap();

        assert!(outcome.placements.is_empty());
        assert_eq!(outcome.unplaced.len(), 1);
        assert_eq!(outcome.unplaced[0].reason, UnplacedReason::NeverFits);
    }

    #[test]
    fn test_stacking_layers() {
        let items = vec![
            Item::new("C1", 150.0, 150.0, 50.0, 100.0),
            Item::new("C2", 150.0, 150.0, 50.0, 100.0),
        ];
        let container = ContainerType::new("C", 150.0, 150.0, 100.0);

        let outcome = Packer::default_config().pack(&items, &container).unwrap();

        assert_eq!(outcome.placements.len(), 2);
        assert_relative_eq!(outcome.placements[0].z(), 0.0);
        assert_relative_eq!(outcome.placements[1].z(), 50.0);
    }

    #[test]
    fn test_aggressive_matches_best_fit_on_near_full_order() {
        let items: Vec<Item> = (0..12)
            .map(|i| Item::new(format!("cube-{}", i), 20.0, 20.0, 20.0, 1.0))
            .collect();
        let containers = vec![
            ContainerType::new("A", 40.0, 60.0, 45.0).with_price(10.0),
            ContainerType::new("B", 200.0, 200.0, 200.0).with_price(100.0),
        ];
        let config = Config::default();

        let aggressive = aggressive_partial(&items, &containers, &config).unwrap();
        let best = best_fit(&items, &containers, &config).unwrap();

        assert!(aggressive.utilization() >= 0.8);
        assert_relative_eq!(aggressive.utilization(), 96_000.0 / 108_000.0, epsilon = 1e-9);

        let ids = |r: &StrategyResult| -> Vec<String> {
            r.containers.iter().map(|c| c.container_id.clone()).collect()
        };
        assert_eq!(ids(&aggressive), vec!["A".to_string()]);
        assert_eq!(ids(&aggressive), ids(&best));
        assert_eq!(aggressive.placed_count(), best.placed_count());
        assert_relative_eq!(aggressive.utilization(), best.utilization());
    }
}

mod property_tests {
    use super::*;

    #[test]
    fn test_every_strategy_produces_valid_results() {
        let items = mixed_items(40);
        let containers = carton_catalog();

        for strategy in Strategy::ALL {
            let config = Config::default();
            let result = Allocator::new(strategy, config.clone())
                .allocate(&items, &containers)
                .unwrap();

            verify_result(&items, &containers, &result, config.epsilon).unwrap();
            assert_eq!(
                result.placed_count() + result.unplaced_count(),
                items.len(),
                "strategy {}",
                strategy.name()
            );
            assert_eq!(result.strategy, strategy);
        }
    }

    #[test]
    fn test_non_aggressive_strategies_place_everything_that_fits() {
        let items = mixed_items(30);
        let containers = carton_catalog();

        for strategy in [
            Strategy::GreedyMaxUtilization,
            Strategy::BestFit,
            Strategy::LargestFirstOptimized,
            Strategy::CostOptimized,
        ] {
            let result = Allocator::new(strategy, Config::default())
                .allocate(&items, &containers)
                .unwrap();
            assert!(result.all_placed(), "strategy {}", strategy.name());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let items = mixed_items(25);
        let containers = carton_catalog();

        for strategy in Strategy::ALL {
            let parallel = Allocator::new(strategy, Config::default().with_parallel(true))
                .allocate(&items, &containers)
                .unwrap();
            let sequential = Allocator::new(strategy, Config::default().with_parallel(false))
                .allocate(&items, &containers)
                .unwrap();
            assert_eq!(parallel, sequential, "strategy {}", strategy.name());
        }
    }

    #[test]
    fn test_placements_respect_orientation_constraints() {
        let items = mixed_items(20);
        let containers = carton_catalog();

        let result = best_fit(&items, &containers, &Config::default()).unwrap();

        for (_, placement) in result.placements() {
            let item = &items[placement.item_index];
            if item.orientation_constraint() == OrientationConstraint::Upright {
                assert_relative_eq!(placement.size.z, item.height());
            }
        }
    }

    #[test]
    fn test_weight_limits_hold() {
        let items: Vec<Item> = (0..6)
            .map(|i| Item::new(format!("brick-{}", i), 10.0, 10.0, 10.0, 400.0))
            .collect();
        let containers = vec![ContainerType::new("tote", 100.0, 100.0, 100.0).with_max_weight(1000.0)];

        let result = best_fit(&items, &containers, &Config::default()).unwrap();

        assert!(result.all_placed());
        assert_eq!(result.container_count(), 3);
        for packed in &result.containers {
            assert!(packed.placed_weight() <= 1000.0);
        }
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_no_containers() {
        let err = Allocator::new(Strategy::GreedyMaxUtilization, Config::default())
            .allocate(&mixed_items(3), &[])
            .unwrap_err();
        assert!(matches!(err, Error::NoContainersAvailable));
    }

    #[test]
    fn test_invalid_container() {
        let containers = vec![ContainerType::new("flat", 100.0, 100.0, 0.0)];
        let err = best_fit(&mixed_items(3), &containers, &Config::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension(_)));
    }

    #[test]
    fn test_sub_tolerance_items_rejected() {
        let items: Vec<Item> = (0..3)
            .map(|i| Item::new(format!("grain-{}", i), 5e-10, 5e-10, 5e-10, 1.0))
            .collect();
        let containers = vec![ContainerType::new("C", 1e-9, 1e-9, 1e-9)];

        for strategy in Strategy::ALL {
            let err = Allocator::new(strategy, Config::default())
                .allocate(&items, &containers)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidDimension(_)), "strategy {}", strategy.name());
        }
    }

    #[test]
    fn test_invalid_config() {
        let config = Config::default().with_epsilon(-1.0);
        let err = best_fit(&mixed_items(3), &carton_catalog(), &config).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_over_weight_item() {
        let items = vec![
            Item::new("anvil", 10.0, 10.0, 10.0, 5000.0),
            Item::new("feather", 10.0, 10.0, 10.0, 1.0),
        ];
        let containers = vec![ContainerType::new("box", 50.0, 50.0, 50.0).with_max_weight(100.0)];

        let result = best_fit(&items, &containers, &Config::default()).unwrap();

        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.unplaced[0].item_id, "anvil");
        assert_eq!(result.unplaced[0].reason, UnplacedReason::OverWeight);
    }
}

mod cache_tests {
    use super::*;

    #[test]
    fn test_cache_shared_between_strategies() {
        let items = mixed_items(20);
        let containers = carton_catalog();
        let cache = PackingCache::new();

        let uncached = best_fit(&items, &containers, &Config::default()).unwrap();
        let cached = Allocator::new(Strategy::BestFit, Config::default())
            .with_cache(&cache)
            .allocate(&items, &containers)
            .unwrap();
        assert_eq!(uncached, cached);
        assert!(!cache.is_empty());

        // Cost-optimized re-runs best-fit internally and reuses its trials.
        let hits = cache.hits();
        Allocator::new(Strategy::CostOptimized, Config::default())
            .with_cache(&cache)
            .allocate(&items, &containers)
            .unwrap();
        assert!(cache.hits() > hits);
    }
}
