//! Placement fitness evaluation.
//!
//! `score = |p| + height_penalty * z - ground_bonus * [z == 0] - contact_weight * contact_ratio`
//!
//! where `contact_ratio` is the fraction of the box's surface touching the
//! container walls or already placed boxes. Lower scores are better.

use crate::extreme_point::ExtremePointSet;
use nalgebra::Vector3;
use u_cartonize_core::{FitnessWeights, Orientation3D, AABB3D};

/// A feasible (orientation, position) pair with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlacement {
    /// Orientation applied to the item.
    pub orientation: Orientation3D,
    /// Size after the orientation.
    pub size: Vector3<f64>,
    /// Minimum corner.
    pub position: Vector3<f64>,
    /// Fitness score (lower is better).
    pub score: f64,
}

/// Scores candidate placements against the current occupancy.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator {
    weights: FitnessWeights,
    epsilon: f64,
}

impl FitnessEvaluator {
    /// Creates an evaluator.
    pub fn new(weights: FitnessWeights, epsilon: f64) -> Self {
        Self { weights, epsilon }
    }

    /// Scores a box of `size` at `position`.
    pub fn score(&self, space: &ExtremePointSet, position: &Vector3<f64>, size: &Vector3<f64>) -> f64 {
        let aabb = AABB3D::from_position_size(*position, *size);
        let surface = aabb.surface_area();
        let contact_ratio = if surface > 0.0 {
            (space.contact_area(&aabb) / surface).min(1.0)
        } else {
            0.0
        };

        let on_ground = position.z.abs() <= self.epsilon;
        let mut score = position.norm() + self.weights.height_penalty * position.z;
        if on_ground {
            score -= self.weights.ground_bonus;
        }
        score - self.weights.contact_weight * contact_ratio
    }

    /// Finds the lowest-scoring free placement over all orientations and candidates.
    ///
    /// Orientations are visited in the given order and candidates in
    /// generation order; a later pair replaces the current best only with a
    /// strictly lower score.
    pub fn best_placement(
        &self,
        space: &ExtremePointSet,
        orientations: &[(Orientation3D, Vector3<f64>)],
    ) -> Option<ScoredPlacement> {
        let mut best: Option<ScoredPlacement> = None;

        for (orientation, size) in orientations {
            for position in space.candidates(size) {
                if !space.is_free(&position, size) {
                    continue;
                }
                let score = self.score(space, &position, size);
                if best.map_or(true, |b| score < b.score) {
                    best = Some(ScoredPlacement {
                        orientation: *orientation,
                        size: *size,
                        position,
                        score,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn evaluator() -> FitnessEvaluator {
        FitnessEvaluator::new(FitnessWeights::default(), 1e-9)
    }

    #[test]
    fn test_origin_score_in_empty_container() {
        let space = ExtremePointSet::new(Vector3::new(100.0, 100.0, 100.0), 1e-9);
        let size = Vector3::new(10.0, 10.0, 10.0);
        // Three of six faces touch walls.
        let score = evaluator().score(&space, &Vector3::zeros(), &size);
        assert_relative_eq!(score, -100.0 - 50.0 * 0.5);
    }

    #[test]
    fn test_elevated_position_penalized() {
        let space = ExtremePointSet::new(Vector3::new(100.0, 100.0, 100.0), 1e-9);
        let size = Vector3::new(10.0, 10.0, 10.0);
        let ground = evaluator().score(&space, &Vector3::new(50.0, 0.0, 0.0), &size);
        let raised = evaluator().score(&space, &Vector3::new(0.0, 0.0, 10.0), &size);
        assert!(ground < raised);
    }

    #[test]
    fn test_best_placement_prefers_floor() {
        let mut space = ExtremePointSet::new(Vector3::new(100.0, 100.0, 100.0), 1e-9);
        space.insert(AABB3D::from_position_size(
            Vector3::zeros(),
            Vector3::new(10.0, 10.0, 10.0),
        ));

        let orientations = vec![(Orientation3D::IDENTITY, Vector3::new(10.0, 10.0, 10.0))];
        let best = evaluator().best_placement(&space, &orientations).unwrap();
        assert_eq!(best.position.z, 0.0);
        assert_ne!(best.position, Vector3::zeros());
    }

    #[test]
    fn test_best_placement_none_when_full() {
        let mut space = ExtremePointSet::new(Vector3::new(10.0, 10.0, 10.0), 1e-9);
        space.insert(AABB3D::from_position_size(
            Vector3::zeros(),
            Vector3::new(10.0, 10.0, 10.0),
        ));
        let orientations = vec![(Orientation3D::IDENTITY, Vector3::new(1.0, 1.0, 1.0))];
        assert!(evaluator().best_placement(&space, &orientations).is_none());
    }

    #[test]
    fn test_ties_keep_first_orientation() {
        let space = ExtremePointSet::new(Vector3::new(100.0, 100.0, 100.0), 1e-9);
        let dims = Vector3::new(10.0, 20.0, 30.0);
        let orientations = Orientation3D::enumerate(&dims, Default::default());
        let best = evaluator().best_placement(&space, &orientations).unwrap();
        // All orientations at the origin touch half their surface; the first wins.
        assert!(best.orientation.is_identity());
        assert_eq!(best.position, Vector3::zeros());
    }
}
