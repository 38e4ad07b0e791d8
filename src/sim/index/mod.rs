//! Per-building room lookup.
//!
//! A [`GeometryIndex`] is built once per building and is read-only afterwards.
//! Switching buildings means building a new index, never mutating an old one.
//!
//! Two lookups are provided and they fail differently:
//! - [`GeometryIndex::locate`] is point-based and total: a point outside every
//!   room is in the corridor.
//! - [`GeometryIndex::room`] is id-based and returns [`SamplerError::UnknownRoom`]
//!   for ids the index does not hold.

use std::collections::HashMap;

use crate::Point;
use crate::error::{SamplerError, SamplerResult};
use crate::geom::bboxes::bounding_box;
use crate::geom::room::{Room, RoomId, RoomSlot};

/// Result of a point-based lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub slot: RoomSlot,
    /// Room height, `None` in the corridor.
    pub height: Option<f64>,
}

impl Location {
    pub fn corridor() -> Self {
        Self {
            slot: RoomSlot::Corridor,
            height: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeometryIndex {
    /// Rooms in the order they were supplied. Lookups scan in this order.
    rooms: Vec<Room>,
    id_to_position: HashMap<RoomId, usize>,
}

impl GeometryIndex {
    /// Builds the index. Room ids must be unique.
    ///
    /// Overlapping footprints are accepted; [`Self::locate`] resolves them to the
    /// room supplied first.
    pub fn new(rooms: Vec<Room>) -> SamplerResult<Self> {
        let mut id_to_position = HashMap::with_capacity(rooms.len());
        for (i, room) in rooms.iter().enumerate() {
            if id_to_position.insert(room.id(), i).is_some() {
                return Err(SamplerError::DuplicateRoom(room.id()));
            }
        }
        tracing::debug!(rooms = rooms.len(), "Built geometry index");
        Ok(Self {
            rooms,
            id_to_position,
        })
    }

    /// Index without rooms; every point is in the corridor.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns rooms in index order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Returns room ids in index order.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|r| r.id()).collect()
    }

    /// Looks a room up by id.
    pub fn room(&self, id: RoomId) -> SamplerResult<&Room> {
        self.id_to_position
            .get(&id)
            .map(|&i| &self.rooms[i])
            .ok_or(SamplerError::UnknownRoom(id))
    }

    /// Finds the first room whose footprint contains `pt`.
    ///
    /// Only `x` and `y` are considered, edges included. Linear in the number of
    /// rooms, which stays in the tens for a single building.
    pub fn locate(&self, pt: Point) -> Location {
        self.rooms
            .iter()
            .find(|r| r.contains_footprint(pt))
            .map(|r| Location {
                slot: RoomSlot::Room(r.id()),
                height: Some(r.height()),
            })
            .unwrap_or_else(Location::corridor)
    }

    /// Returns the (min, max) corners enclosing all rooms, or `None` without rooms.
    pub fn extent(&self) -> Option<(Point, Point)> {
        let corners: Vec<Point> = self.rooms.iter().flat_map(|r| [r.min(), r.max()]).collect();
        bounding_box(&corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: usize, min: (f64, f64), max: (f64, f64), height: f64) -> Room {
        Room::new(
            RoomId(id),
            "room",
            Point::new(min.0, min.1, 0.),
            Point::new(max.0, max.1, 0.),
            height,
        )
        .unwrap()
    }

    #[test]
    fn test_locate_inside_room() -> SamplerResult<()> {
        let index = GeometryIndex::new(vec![
            room(0, (0., 0.), (2., 2.), 2.5),
            room(1, (3., 0.), (5., 2.), 3.0),
        ])?;
        let loc = index.locate(Point::new(4., 1., 0.3));
        assert_eq!(loc.slot, RoomSlot::Room(RoomId(1)));
        assert_eq!(loc.height, Some(3.0));
        Ok(())
    }

    #[test]
    fn test_locate_edges_inclusive() -> SamplerResult<()> {
        let index = GeometryIndex::new(vec![room(0, (0., 0.), (2., 2.), 2.5)])?;
        assert_eq!(index.locate(Point::new(0., 0., 0.)).slot, RoomSlot::Room(RoomId(0)));
        assert_eq!(index.locate(Point::new(2., 2., 0.)).slot, RoomSlot::Room(RoomId(0)));
        Ok(())
    }

    #[test]
    fn test_locate_corridor() -> SamplerResult<()> {
        let index = GeometryIndex::new(vec![room(0, (0., 0.), (2., 2.), 2.5)])?;
        let loc = index.locate(Point::new(2.5, 1., 0.));
        assert_eq!(loc, Location::corridor());
        assert!(GeometryIndex::empty().locate(Point::new(0., 0., 0.)).slot.is_corridor());
        Ok(())
    }

    #[test]
    fn test_overlap_first_match_wins() -> SamplerResult<()> {
        let index = GeometryIndex::new(vec![
            room(7, (0., 0.), (2., 2.), 2.5),
            room(3, (1., 1.), (4., 4.), 3.5),
        ])?;
        let loc = index.locate(Point::new(1.5, 1.5, 0.));
        assert_eq!(loc.slot, RoomSlot::Room(RoomId(7)));
        assert_eq!(loc.height, Some(2.5));
        let loc = index.locate(Point::new(3., 3., 0.));
        assert_eq!(loc.slot, RoomSlot::Room(RoomId(3)));
        Ok(())
    }

    #[test]
    fn test_room_by_id() -> SamplerResult<()> {
        let index = GeometryIndex::new(vec![room(5, (0., 0.), (1., 1.), 2.)])?;
        assert_eq!(index.room(RoomId(5))?.height(), 2.);
        assert_eq!(index.room(RoomId(6)), Err(SamplerError::UnknownRoom(RoomId(6))));
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = GeometryIndex::new(vec![
            room(1, (0., 0.), (1., 1.), 2.),
            room(1, (2., 2.), (3., 3.), 2.),
        ]);
        assert_eq!(result.err(), Some(SamplerError::DuplicateRoom(RoomId(1))));
    }

    #[test]
    fn test_room_ids_keep_order() -> SamplerResult<()> {
        let index = GeometryIndex::new(vec![
            room(9, (0., 0.), (1., 1.), 2.),
            room(2, (2., 2.), (3., 3.), 2.),
        ])?;
        assert_eq!(index.room_ids(), vec![RoomId(9), RoomId(2)]);
        assert_eq!(index.len(), 2);
        Ok(())
    }

    #[test]
    fn test_extent() -> SamplerResult<()> {
        let index = GeometryIndex::new(vec![
            room(0, (0., 0.), (1., 1.), 2.),
            room(1, (-2., 3.), (3., 5.), 2.),
        ])?;
        let (pmin, pmax) = index.extent().unwrap();
        assert!(pmin.is_close(&Point::new(-2., 0., 0.)));
        assert!(pmax.is_close(&Point::new(3., 5., 0.)));
        assert!(GeometryIndex::empty().extent().is_none());
        Ok(())
    }
}
