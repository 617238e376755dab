//! Container types.

use nalgebra::Vector3;
use u_cartonize_core::geometry::Boundary;
use u_cartonize_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A container template: fixed interior size, weight limit and price.
///
/// Strategies instantiate zero or more containers of each type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerType {
    /// Identifier.
    id: String,

    /// Inner dimensions (width, length, height).
    dimensions: Vector3<f64>,

    /// Maximum total weight of placed items.
    max_weight: f64,

    /// Price of one instance.
    price: f64,

    /// Instances available; `None` means unlimited.
    stock: Option<usize>,
}

impl ContainerType {
    /// Creates a new container type with an unconstrained weight limit and zero price.
    pub fn new(id: impl Into<String>, width: f64, length: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            dimensions: Vector3::new(width, length, height),
            max_weight: f64::INFINITY,
            price: 0.0,
            stock: None,
        }
    }

    /// Sets the maximum placed weight.
    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Sets the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Limits the number of instances a strategy may use.
    pub fn with_stock(mut self, stock: usize) -> Self {
        self.stock = Some(stock);
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

    /// Returns the stock, if limited.
    pub fn stock(&self) -> Option<usize> {
        self.stock
    }

    /// Returns price per unit of volume; infinite for a degenerate container.
    pub fn price_per_volume(&self) -> f64 {
        let volume = self.measure();
        if volume > 0.0 {
            self.price / volume
        } else {
            f64::INFINITY
        }
    }
}

impl Boundary for ContainerType {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimensions(&self) -> Vector3<f64> {
        self.dimensions
    }

    fn max_weight(&self) -> f64 {
        self.max_weight
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn validate(&self) -> Result<()> {
        if self.dimensions.iter().any(|d| !(*d > 0.0) || !d.is_finite()) {
            return Err(Error::InvalidDimension(format!(
                "All dimensions for container '{}' must be positive",
                self.id
            )));
        }

        if !(self.max_weight > 0.0) {
            return Err(Error::InvalidDimension(format!(
                "Maximum weight for container '{}' must be positive",
                self.id
            )));
        }

        if !(self.price >= 0.0) || !self.price.is_finite() {
            return Err(Error::InvalidDimension(format!(
                "Price for container '{}' cannot be negative",
                self.id
            )));
        }

        Ok(())
    }
}
