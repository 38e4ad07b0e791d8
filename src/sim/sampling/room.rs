use rand::Rng;

use crate::Point;
use crate::geom::room::Room;

/// Draws points uniformly over a room's footprint, just above its floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomSampler {
    /// Lift above the floor plane.
    pub floor_offset: f64,
}

impl RoomSampler {
    pub const DEFAULT_FLOOR_OFFSET: f64 = 0.05;

    pub fn new(floor_offset: f64) -> Self {
        Self { floor_offset }
    }

    /// Returns a point with `x` and `y` uniform within the room's footprint
    /// (edges included) and `z` at `floor + floor_offset`.
    pub fn sample(&self, room: &Room, rng: &mut impl Rng) -> Point {
        let (min, max) = (room.min(), room.max());
        let x = rng.gen_range(min.x..=max.x);
        let y = rng.gen_range(min.y..=max.y);
        Point::new(x, y, room.floor() + self.floor_offset)
    }
}

impl Default for RoomSampler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FLOOR_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::room::{RoomId, RoomSlot};
    use crate::sim::index::GeometryIndex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn room(id: usize, label: &str, min: [f64; 3], max: [f64; 3], height: f64) -> Room {
        let (min, max) = (Point::from_array(min), Point::from_array(max));
        Room::new(RoomId(id), label, min, max, height).unwrap()
    }

    fn rooms() -> Vec<Room> {
        vec![
            room(0, "bedroom", [0., 0., 0.], [2., 2., 0.], 2.5),
            room(1, "office", [3., -1., 0.2], [6., 1., 0.2], 2.8),
            room(2, "hall", [-4., 3., 3.1], [-1., 8., 3.1], 2.4),
        ]
    }

    #[test]
    fn test_sampled_points_locate_back_to_room() {
        let index = GeometryIndex::new(rooms()).unwrap();
        let sampler = RoomSampler::default();
        let mut rng = StdRng::seed_from_u64(11);
        for room in index.rooms() {
            for _ in 0..300 {
                let p = sampler.sample(room, &mut rng);
                assert_eq!(index.locate(p).slot, RoomSlot::Room(room.id()));
                assert!((p.z - (room.floor() + 0.05)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_degenerate_footprint() {
        let p = Point::new(1., 1., 0.);
        let room = Room::new(RoomId(0), "shaft", p, p, 3.).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let s = RoomSampler::new(0.).sample(&room, &mut rng);
        assert_eq!(s, p);
    }
}
