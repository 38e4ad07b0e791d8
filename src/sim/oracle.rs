//! Navigable-point source supplied by the surrounding simulator.

use rand::{Rng, RngCore};

use crate::Point;
use crate::geom::axes::AxisOrder;
use crate::sim::index::GeometryIndex;

/// Source of random walkable points for one building.
///
/// Points are reported in the simulator's axis order. The samplers convert them
/// into the core frame with the configured [`AxisOrder`]. Implementations may
/// return corridor points as well as room interior points.
pub trait NavigabilityOracle {
    fn random_navigable_point(&mut self, rng: &mut dyn RngCore) -> Point;
}

impl<F> NavigabilityOracle for F
where
    F: FnMut(&mut dyn RngCore) -> Point,
{
    fn random_navigable_point(&mut self, rng: &mut dyn RngCore) -> Point {
        self(rng)
    }
}

/// Stand-in oracle for runs without a simulator.
///
/// Draws floor-level points uniformly over the horizontal extent of a building's
/// rooms, grown by `margin` on every side so that corridor points show up too.
#[derive(Debug, Clone)]
pub struct FootprintOracle {
    min: Point,
    max: Point,
    margin: f64,
    axes: AxisOrder,
}

impl FootprintOracle {
    /// Half-width of the square used when a building has no room geometry.
    pub const DEFAULT_HALF_EXTENT: f64 = 5.0;
    pub const DEFAULT_MARGIN: f64 = 0.5;

    pub fn new(index: &GeometryIndex, axes: AxisOrder) -> Self {
        let h = Self::DEFAULT_HALF_EXTENT;
        let (min, max) = index
            .extent()
            .unwrap_or((Point::new(-h, -h, 0.), Point::new(h, h, 0.)));
        Self::from_extent(min, max, axes)
    }

    pub fn from_extent(min: Point, max: Point, axes: AxisOrder) -> Self {
        Self {
            min,
            max,
            margin: Self::DEFAULT_MARGIN,
            axes,
        }
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin.max(0.);
        self
    }
}

impl NavigabilityOracle for FootprintOracle {
    fn random_navigable_point(&mut self, rng: &mut dyn RngCore) -> Point {
        let x = rng.gen_range((self.min.x - self.margin)..=(self.max.x + self.margin));
        let y = rng.gen_range((self.min.y - self.margin)..=(self.max.y + self.margin));
        self.axes.to_external(Point::new(x, y, self.min.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::room::{Room, RoomId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_footprint_oracle_stays_in_extent() {
        let room = Room::new(
            RoomId(0),
            "living",
            Point::new(1., 2., 0.5),
            Point::new(4., 6., 0.5),
            2.5,
        )
        .unwrap();
        let index = GeometryIndex::new(vec![room]).unwrap();
        let mut oracle = FootprintOracle::new(&index, AxisOrder::Y_UP).with_margin(1.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            // Simulator order is (x, z, y)
            let p = AxisOrder::Y_UP.to_core(oracle.random_navigable_point(&mut rng));
            assert!(p.x >= 0. && p.x <= 5.);
            assert!(p.y >= 1. && p.y <= 7.);
            assert_eq!(p.z, 0.5);
        }
    }

    #[test]
    fn test_empty_index_uses_default_extent() {
        let mut oracle = FootprintOracle::new(&GeometryIndex::empty(), AxisOrder::IDENTITY);
        let mut rng = StdRng::seed_from_u64(2);
        let p = oracle.random_navigable_point(&mut rng);
        let bound = FootprintOracle::DEFAULT_HALF_EXTENT + FootprintOracle::DEFAULT_MARGIN;
        assert!(p.x.abs() <= bound && p.y.abs() <= bound);
        assert_eq!(p.z, 0.);
    }

    #[test]
    fn test_closure_oracle() {
        let mut calls = 0;
        let mut oracle = |_: &mut dyn RngCore| {
            calls += 1;
            Point::new(1., 2., 3.)
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(oracle.random_navigable_point(&mut rng), Point::new(1., 2., 3.));
        assert_eq!(calls, 1);
    }
}
