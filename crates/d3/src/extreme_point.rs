//! Extreme-point candidate generation for 3D placement.
//!
//! Extreme points are positions derived from the far faces of boxes already
//! in the container. Placing the next box only at these points (plus the
//! origin) keeps the search linear in the number of placed boxes while still
//! reaching the positions that pack tightly against walls and neighbours.
//!
//! # References
//!
//! - Crainic, T. G., Perboli, G., & Tadei, R. (2008). Extreme point-based heuristics
//!   for three-dimensional bin packing.

use nalgebra::Vector3;
use std::collections::HashSet;
use u_cartonize_core::AABB3D;

/// Occupancy of one container instance and the candidate positions it yields.
#[derive(Debug, Clone)]
pub struct ExtremePointSet {
    /// Container inner dimensions.
    container: Vector3<f64>,
    /// Placed boxes, in placement order.
    placed: Vec<AABB3D>,
    /// Geometric tolerance.
    epsilon: f64,
}

impl ExtremePointSet {
    /// Creates an empty set for a container with the given inner dimensions.
    pub fn new(container: Vector3<f64>, epsilon: f64) -> Self {
        Self {
            container,
            placed: Vec::new(),
            epsilon,
        }
    }

    /// Returns the candidate positions for a box of `size`.
    ///
    /// The origin comes first, followed by the seven far-face points of every
    /// placed box. Duplicates keep their first occurrence, positions where the
    /// box would leave the container are dropped, and the rest are sorted by
    /// (z, y, x). Candidates may still overlap placed boxes; see [`Self::is_free`].
    pub fn candidates(&self, size: &Vector3<f64>) -> Vec<Vector3<f64>> {
        let mut points: Vec<Vector3<f64>> = Vec::with_capacity(1 + 7 * self.placed.len());
        points.push(Vector3::zeros());

        for b in &self.placed {
            let (lo, hi) = (b.min, b.max);
            points.extend_from_slice(&[
                Vector3::new(hi.x, lo.y, lo.z),
                Vector3::new(lo.x, hi.y, lo.z),
                Vector3::new(lo.x, lo.y, hi.z),
                Vector3::new(hi.x, hi.y, lo.z),
                Vector3::new(hi.x, lo.y, hi.z),
                Vector3::new(lo.x, hi.y, hi.z),
                Vector3::new(hi.x, hi.y, hi.z),
            ]);
        }

        let mut seen: HashSet<[u64; 3]> = HashSet::with_capacity(points.len());
        let mut candidates: Vec<Vector3<f64>> = points
            .into_iter()
            .filter(|p| seen.insert([p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]))
            .filter(|p| self.in_bounds(p, size))
            .collect();

        candidates.sort_by(|a, b| {
            a.z.total_cmp(&b.z)
                .then(a.y.total_cmp(&b.y))
                .then(a.x.total_cmp(&b.x))
        });
        candidates
    }

    /// Checks whether a box at `position` stays inside the container.
    fn in_bounds(&self, position: &Vector3<f64>, size: &Vector3<f64>) -> bool {
        AABB3D::from_position_size(*position, *size).within(&self.container, self.epsilon)
    }

    /// Checks that a box at `position` overlaps no placed box.
    pub fn is_free(&self, position: &Vector3<f64>, size: &Vector3<f64>) -> bool {
        let candidate = AABB3D::from_position_size(*position, *size);
        !self
            .placed
            .iter()
            .any(|b| b.intersects(&candidate, self.epsilon))
    }

    /// Returns the area of the box's faces touching the container walls
    /// (floor included) or faces of placed boxes.
    pub fn contact_area(&self, aabb: &AABB3D) -> f64 {
        let walls = aabb.wall_contact_area(&self.container, self.epsilon);
        let neighbours: f64 = self
            .placed
            .iter()
            .map(|b| b.contact_area(aabb, self.epsilon))
            .sum();
        walls + neighbours
    }

    /// Records a placed box.
    pub fn insert(&mut self, placed: AABB3D) {
        debug_assert!(
            placed.within(&self.container, self.epsilon),
            "placed box leaves the container"
        );
        debug_assert!(
            self.is_free(&placed.min, &placed.size()),
            "placed box overlaps an existing box"
        );
        self.placed.push(placed);
    }
}
