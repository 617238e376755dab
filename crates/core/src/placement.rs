//! Placement representation for positioned items.

use crate::aabb::AABB3D;
use crate::geometry::{ItemId, Orientation3D};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One item bound to one container instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Index of the item in the input slice handed to the packer or strategy.
    pub item_index: usize,

    /// The ID of the placed item.
    pub item_id: ItemId,

    /// Minimum corner of the placed box.
    pub position: Vector3<f64>,

    /// Size of the box after the orientation was applied.
    pub size: Vector3<f64>,

    /// Orientation used.
    pub orientation: Orientation3D,

    /// Weight of the placed item.
    pub weight: f64,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(
        item_index: usize,
        item_id: ItemId,
        position: Vector3<f64>,
        size: Vector3<f64>,
        orientation: Orientation3D,
        weight: f64,
    ) -> Self {
        Self {
            item_index,
            item_id,
            position,
            size,
            orientation,
            weight,
        }
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Returns the z coordinate.
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Returns the maximum corner.
    pub fn max_corner(&self) -> Vector3<f64> {
        self.position + self.size
    }

    /// Returns the occupied bounding box.
    pub fn aabb(&self) -> AABB3D {
        AABB3D::from_position_size(self.position, self.size)
    }

    /// Returns the occupied volume.
    pub fn volume(&self) -> f64 {
        self.size.x * self.size.y * self.size.z
    }
}
