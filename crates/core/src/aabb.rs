//! Axis-aligned bounding boxes for placed items.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3D axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB3D {
    /// Minimum corner.
    pub min: Vector3<f64>,
    /// Maximum corner.
    pub max: Vector3<f64>,
}

impl AABB3D {
    /// Creates a new AABB from min/max corners.
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from a minimum corner and a size.
    pub fn from_position_size(position: Vector3<f64>, size: Vector3<f64>) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Returns the total surface area.
    pub fn surface_area(&self) -> f64 {
        let s = self.size();
        2.0 * (s.x * s.y + s.x * s.z + s.y * s.z)
    }

    /// Checks whether the interiors of two boxes intersect.
    ///
    /// Boxes that only share a face, edge or corner do not intersect.
    pub fn intersects(&self, other: &AABB3D, epsilon: f64) -> bool {
        (0..3).all(|k| {
            self.min[k] < other.max[k] - epsilon && other.min[k] < self.max[k] - epsilon
        })
    }

    /// Checks whether this box lies inside a container of the given inner
    /// dimensions anchored at the origin.
    pub fn within(&self, container: &Vector3<f64>, epsilon: f64) -> bool {
        (0..3).all(|k| self.min[k] >= -epsilon && self.max[k] <= container[k] + epsilon)
    }

    /// Returns the area of faces this box shares with `other`.
    pub fn contact_area(&self, other: &AABB3D, epsilon: f64) -> f64 {
        let mut area = 0.0;
        for k in 0..3 {
            let touching = (self.max[k] - other.min[k]).abs() <= epsilon
                || (other.max[k] - self.min[k]).abs() <= epsilon;
            if touching {
                let (a, b) = ((k + 1) % 3, (k + 2) % 3);
                area += overlap_1d(self.min[a], self.max[a], other.min[a], other.max[a])
                    * overlap_1d(self.min[b], self.max[b], other.min[b], other.max[b]);
            }
        }
        area
    }

    /// Returns the area of faces lying on the walls (floor included) of a
    /// container anchored at the origin.
    pub fn wall_contact_area(&self, container: &Vector3<f64>, epsilon: f64) -> f64 {
        let s = self.size();
        let mut area = 0.0;
        for k in 0..3 {
            let face = s[(k + 1) % 3] * s[(k + 2) % 3];
            if self.min[k].abs() <= epsilon {
                area += face;
            }
            if (self.max[k] - container[k]).abs() <= epsilon {
                area += face;
            }
        }
        area
    }
}

/// Length of the overlap of two closed intervals.
fn overlap_1d(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    (a_max.min(b_max) - a_min.max(b_min)).max(0.0)
}

/// Checks whether a box of `size` fits inside `container` without rotation.
pub fn fits_within(size: &Vector3<f64>, container: &Vector3<f64>, epsilon: f64) -> bool {
    (0..3).all(|k| size[k] <= container[k] + epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn aabb(p: (f64, f64, f64), s: (f64, f64, f64)) -> AABB3D {
        AABB3D::from_position_size(Vector3::new(p.0, p.1, p.2), Vector3::new(s.0, s.1, s.2))
    }

    #[test]
    fn test_volume_and_surface() {
        let a = aabb((0.0, 0.0, 0.0), (10.0, 20.0, 30.0));
        assert_relative_eq!(a.volume(), 6000.0);
        assert_relative_eq!(a.surface_area(), 2200.0);
    }

    #[test]
    fn test_intersects_interior_only() {
        let a = aabb((0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let overlapping = aabb((5.0, 5.0, 5.0), (10.0, 10.0, 10.0));
        let touching = aabb((10.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let apart = aabb((20.0, 0.0, 0.0), (10.0, 10.0, 10.0));

        assert!(a.intersects(&overlapping, 1e-9));
        assert!(!a.intersects(&touching, 1e-9));
        assert!(!a.intersects(&apart, 1e-9));
    }

    #[test]
    fn test_within() {
        let container = Vector3::new(100.0, 100.0, 50.0);
        assert!(aabb((0.0, 0.0, 0.0), (100.0, 100.0, 50.0)).within(&container, 1e-9));
        assert!(!aabb((0.0, 0.0, 10.0), (100.0, 100.0, 50.0)).within(&container, 1e-9));
    }

    #[test]
    fn test_contact_area() {
        let a = aabb((0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let stacked = aabb((5.0, 0.0, 10.0), (10.0, 10.0, 10.0));
        let apart = aabb((0.0, 0.0, 20.0), (10.0, 10.0, 10.0));
        assert_relative_eq!(a.contact_area(&stacked, 1e-9), 50.0);
        assert_relative_eq!(a.contact_area(&apart, 1e-9), 0.0);
    }

    #[test]
    fn test_wall_contact_area() {
        let container = Vector3::new(20.0, 10.0, 30.0);
        let corner = aabb((0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        // floor + x=0 wall + y=0 wall + y=10 wall
        assert_relative_eq!(corner.wall_contact_area(&container, 1e-9), 400.0);
    }

    #[test]
    fn test_fits_within() {
        let container = Vector3::new(200.0, 200.0, 100.0);
        assert!(fits_within(&Vector3::new(100.0, 100.0, 50.0), &container, 1e-9));
        assert!(!fits_within(&Vector3::new(300.0, 300.0, 300.0), &container, 1e-9));
    }
}
