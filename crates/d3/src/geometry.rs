//! Items to be packed.

use nalgebra::Vector3;
use u_cartonize_core::geometry::{Geometry, ItemId, Orientation3D, OrientationConstraint};
use u_cartonize_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One physical unit to place.
///
/// Several units of the same SKU are modeled as separate `Item` values, since
/// each occupies its own volume.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Identifier (typically the SKU).
    id: ItemId,

    /// Dimensions (width, length, height).
    dimensions: Vector3<f64>,

    /// Weight.
    weight: f64,

    /// Whether the item is fragile.
    fragile: bool,

    /// Opaque hazard/packaging tag owned by the compatibility layer.
    tag: Option<String>,

    /// Orientation constraint.
    orientation: OrientationConstraint,
}

impl Item {
    /// Creates a new item with the given ID, dimensions and weight.
    pub fn new(id: impl Into<ItemId>, width: f64, length: f64, height: f64, weight: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Vector3::new(width, length, height),
            weight,
            fragile: false,
            tag: None,
            orientation: OrientationConstraint::default(),
        }
    }

    /// Sets the fragility flag.
    pub fn with_fragile(mut self, fragile: bool) -> Self {
        self.fragile = fragile;
        self
    }

    /// Attaches an opaque tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the orientation constraint.
    pub fn with_orientation(mut self, constraint: OrientationConstraint) -> Self {
        self.orientation = constraint;
        self
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the length.
    pub fn length(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns whether the item is fragile.
    pub fn is_fragile(&self) -> bool {
        self.fragile
    }

    /// Returns the opaque tag.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the distinct orientations allowed for this item with their sizes.
    pub fn orientations(&self) -> Vec<(Orientation3D, Vector3<f64>)> {
        Orientation3D::enumerate(&self.dimensions, self.orientation)
    }
}

impl Geometry for Item {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn dimensions(&self) -> Vector3<f64> {
        self.dimensions
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn orientation_constraint(&self) -> OrientationConstraint {
        self.orientation
    }

    fn validate(&self) -> Result<()> {
        if self.dimensions.iter().any(|d| !(*d > 0.0) || !d.is_finite()) {
            return Err(Error::InvalidDimension(format!(
                "All dimensions for item '{}' must be positive, got {}x{}x{}",
                self.id, self.dimensions.x, self.dimensions.y, self.dimensions.z
            )));
        }

        if !(self.weight > 0.0) || !self.weight.is_finite() {
            return Err(Error::InvalidDimension(format!(
                "Weight for item '{}' must be positive, got {}",
                self.id, self.weight
            )));
        }

        Ok(())
    }
}
