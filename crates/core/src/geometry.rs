//! Core geometry traits and orientation handling.

use crate::Result;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for an item (typically its SKU).
pub type ItemId = String;

/// The six axis permutations in canonical (lexicographic) order.
///
/// Entry `[a, b, c]` places source axis `a` along x, `b` along y and `c` along z.
pub const AXIS_PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Restricts which orientations an item may be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationConstraint {
    /// Any of the 6 axis-aligned orientations.
    #[default]
    Any,
    /// Height stays vertical; width and length may swap.
    Upright,
    /// Original orientation only.
    Fixed,
}

impl OrientationConstraint {
    /// Returns the permutations allowed by this constraint, in canonical order.
    pub fn permutations(&self) -> &'static [[usize; 3]] {
        match self {
            Self::Any => &AXIS_PERMUTATIONS,
            Self::Upright => &UPRIGHT_PERMUTATIONS,
            Self::Fixed => &AXIS_PERMUTATIONS[..1],
        }
    }
}

const UPRIGHT_PERMUTATIONS: [[usize; 3]; 2] = [[0, 1, 2], [1, 0, 2]];

/// An axis-aligned orientation: a permutation of an item's (w, l, h) onto the
/// container's (x, y, z) axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation3D {
    axes: [usize; 3],
}

impl Orientation3D {
    /// The unrotated orientation.
    pub const IDENTITY: Self = Self { axes: [0, 1, 2] };

    /// Creates an orientation from an axis permutation.
    ///
    /// Returns `None` if `axes` is not a permutation of `[0, 1, 2]`.
    pub fn new(axes: [usize; 3]) -> Option<Self> {
        AXIS_PERMUTATIONS
            .contains(&axes)
            .then_some(Self { axes })
    }

    /// Returns the axis permutation.
    pub fn axes(&self) -> [usize; 3] {
        self.axes
    }

    /// Returns the canonical index (0..6) of this orientation.
    pub fn index(&self) -> usize {
        AXIS_PERMUTATIONS
            .iter()
            .position(|p| *p == self.axes)
            .unwrap_or(0)
    }

    /// Returns true if this is the unrotated orientation.
    pub fn is_identity(&self) -> bool {
        self.axes == Self::IDENTITY.axes
    }

    /// Applies the orientation to a (w, l, h) size.
    pub fn apply(&self, dims: &Vector3<f64>) -> Vector3<f64> {
        Vector3::new(dims[self.axes[0]], dims[self.axes[1]], dims[self.axes[2]])
    }

    /// Enumerates the distinct orientations of a box.
    ///
    /// Permutations are visited in canonical order; one that yields a size
    /// already produced by an earlier permutation is skipped, so a cube has a
    /// single orientation and a box with two equal sides has three.
    pub fn enumerate(
        dims: &Vector3<f64>,
        constraint: OrientationConstraint,
    ) -> Vec<(Orientation3D, Vector3<f64>)> {
        let mut result: Vec<(Orientation3D, Vector3<f64>)> = Vec::with_capacity(6);
        for axes in constraint.permutations() {
            let orientation = Orientation3D { axes: *axes };
            let size = orientation.apply(dims);
            if result.iter().all(|(_, seen)| *seen != size) {
                result.push((orientation, size));
            }
        }
        result
    }

    /// Returns true if `size` is a permutation of `dims` reachable under `constraint`.
    pub fn is_valid_size(
        dims: &Vector3<f64>,
        size: &Vector3<f64>,
        constraint: OrientationConstraint,
        epsilon: f64,
    ) -> bool {
        Self::enumerate(dims, constraint)
            .iter()
            .any(|(_, s)| (s - size).abs().max() <= epsilon)
    }
}

impl Default for Orientation3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Trait for items that can be packed.
pub trait Geometry: Clone + Send + Sync {
    /// Returns the identifier of this item.
    fn id(&self) -> &ItemId;

    /// Returns the (width, length, height) dimensions.
    fn dimensions(&self) -> Vector3<f64>;

    /// Returns the weight.
    fn weight(&self) -> f64;

    /// Returns the volume.
    fn measure(&self) -> f64 {
        let d = self.dimensions();
        d.x * d.y * d.z
    }

    /// Returns the allowed orientations.
    fn orientation_constraint(&self) -> OrientationConstraint {
        OrientationConstraint::Any
    }

    /// Validates the item and returns an error if invalid.
    fn validate(&self) -> Result<()>;
}

/// Trait for container templates that hold items.
pub trait Boundary: Clone + Send + Sync {
    /// Returns the identifier of this container type.
    fn id(&self) -> &str;

    /// Returns the inner (width, length, height) dimensions.
    fn dimensions(&self) -> Vector3<f64>;

    /// Returns the maximum total weight of placed items.
    fn max_weight(&self) -> f64;

    /// Returns the price of one container instance.
    fn price(&self) -> f64;

    /// Returns the inner volume.
    fn measure(&self) -> f64 {
        let d = self.dimensions();
        d.x * d.y * d.z
    }

    /// Validates the container type and returns an error if invalid.
    fn validate(&self) -> Result<()>;
}
