//! Axis-order conversion between the core frame and an external frame.
//!
//! The core always works in `(x, y, z)` with `z` up. Simulators that use a
//! `y`-up convention report points as `(x, z, y)`. [`AxisOrder`] is the one
//! place where that permutation lives: points coming from an external source go
//! through [`AxisOrder::to_core`] and points leaving the crate go through
//! [`AxisOrder::to_external`].

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::SamplerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[usize; 3]", into = "[usize; 3]")]
pub struct AxisOrder([usize; 3]);

impl AxisOrder {
    /// External frame equals the core frame.
    pub const IDENTITY: Self = Self([0, 1, 2]);
    /// External frame is `(x, z, y)`.
    pub const Y_UP: Self = Self([0, 2, 1]);

    /// Creates a permutation where external axis `i` holds core axis `order[i]`.
    pub fn new(order: [usize; 3]) -> Result<Self, SamplerError> {
        let mut seen = [false; 3];
        for &axis in order.iter() {
            if axis > 2 || seen[axis] {
                return Err(SamplerError::InvalidConfig(format!(
                    "Axis order must be a permutation of [0, 1, 2], got {:?}",
                    order
                )));
            }
            seen[axis] = true;
        }
        Ok(Self(order))
    }

    pub fn as_array(&self) -> [usize; 3] {
        self.0
    }

    /// Returns the permutation undoing `self`.
    pub fn inverse(&self) -> Self {
        let mut inv = [0; 3];
        for (i, &axis) in self.0.iter().enumerate() {
            inv[axis] = i;
        }
        Self(inv)
    }

    /// Converts a core-frame point into the external frame.
    pub fn to_external(&self, pt: Point) -> Point {
        Point::from_array(self.permute(pt.to_array()))
    }

    /// Converts an external-frame point into the core frame.
    pub fn to_core(&self, pt: Point) -> Point {
        Point::from_array(self.inverse().permute(pt.to_array()))
    }

    fn permute(&self, arr: [f64; 3]) -> [f64; 3] {
        [arr[self.0[0]], arr[self.0[1]], arr[self.0[2]]]
    }
}

impl Default for AxisOrder {
    fn default() -> Self {
        Self::Y_UP
    }
}

impl TryFrom<[usize; 3]> for AxisOrder {
    type Error = SamplerError;

    fn try_from(value: [usize; 3]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AxisOrder> for [usize; 3] {
    fn from(value: AxisOrder) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_up_swaps_y_and_z() {
        let p = Point::new(1., 2., 3.);
        assert_eq!(AxisOrder::Y_UP.to_external(p), Point::new(1., 3., 2.));
        assert_eq!(AxisOrder::Y_UP.to_core(Point::new(1., 3., 2.)), p);
    }

    #[test]
    fn test_identity() {
        let p = Point::new(1., 2., 3.);
        assert_eq!(AxisOrder::IDENTITY.to_external(p), p);
        assert_eq!(AxisOrder::IDENTITY.to_core(p), p);
    }

    #[test]
    fn test_non_involutive_permutation_is_inverted() {
        // Cyclic shift is not its own inverse
        let order = AxisOrder::new([1, 2, 0]).unwrap();
        let p = Point::new(1., 2., 3.);
        let ext = order.to_external(p);
        assert_eq!(ext, Point::new(2., 3., 1.));
        assert_eq!(order.to_core(ext), p);
        assert_eq!(order.inverse().inverse(), order);
    }

    #[test]
    fn test_invalid_permutation() {
        assert!(AxisOrder::new([0, 0, 1]).is_err());
        assert!(AxisOrder::new([0, 1, 3]).is_err());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&AxisOrder::Y_UP).unwrap();
        assert_eq!(json, "[0,2,1]");
        let order: AxisOrder = serde_json::from_str("[2,0,1]").unwrap();
        assert_eq!(order.as_array(), [2, 0, 1]);
        assert!(serde_json::from_str::<AxisOrder>("[1,1,1]").is_err());
    }
}
