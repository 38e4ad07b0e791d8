//! Rooms: labeled axis-aligned footprints with a ceiling height.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::Point;
use crate::error::{SamplerError, SamplerResult};
use crate::geom::bboxes::{is_bbox_ordered, is_point_inside_footprint};

/// Room identifier, unique within one building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a point sits: in a labeled room or in the corridor.
///
/// Serialized as the room number or as the string `"corridor"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomSlot {
    Room(RoomId),
    Corridor,
}

impl RoomSlot {
    pub const CORRIDOR_TAG: &'static str = "corridor";

    pub fn room_id(&self) -> Option<RoomId> {
        match self {
            RoomSlot::Room(id) => Some(*id),
            RoomSlot::Corridor => None,
        }
    }

    pub fn is_corridor(&self) -> bool {
        matches!(self, RoomSlot::Corridor)
    }
}

impl fmt::Display for RoomSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomSlot::Room(id) => write!(f, "{}", id),
            RoomSlot::Corridor => write!(f, "{}", Self::CORRIDOR_TAG),
        }
    }
}

impl Serialize for RoomSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RoomSlot::Room(id) => serializer.serialize_u64(id.0 as u64),
            RoomSlot::Corridor => serializer.serialize_str(Self::CORRIDOR_TAG),
        }
    }
}

struct RoomSlotVisitor;

impl Visitor<'_> for RoomSlotVisitor {
    type Value = RoomSlot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a room number or \"{}\"", RoomSlot::CORRIDOR_TAG)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RoomSlot, E> {
        usize::try_from(v)
            .map(|id| RoomSlot::Room(RoomId(id)))
            .map_err(|_| E::custom(format!("room number out of range: {}", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RoomSlot, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("negative room number: {}", v)))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RoomSlot, E> {
        if v == RoomSlot::CORRIDOR_TAG {
            Ok(RoomSlot::Corridor)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for RoomSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RoomSlotVisitor)
    }
}

/// A labeled room.
///
/// The footprint is the horizontal extent of `min..=max`; `min.z` is the floor
/// elevation. Fields are private so the invariants checked by [`Room::new`]
/// hold for the lifetime of the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    id: RoomId,
    label: String,
    min: Point,
    max: Point,
    height: f64,
}

impl Room {
    /// Creates a room, rejecting inverted corners and non-positive heights.
    pub fn new(
        id: RoomId,
        label: &str,
        min: Point,
        max: Point,
        height: f64,
    ) -> SamplerResult<Self> {
        let corners = [min.to_array(), max.to_array()];
        if corners.iter().flatten().any(|c| !c.is_finite()) {
            return Err(SamplerError::MalformedRoom {
                room_id: id,
                reason: format!("non-finite corner {} / {}", min, max),
            });
        }
        if !is_bbox_ordered(min, max) {
            return Err(SamplerError::MalformedRoom {
                room_id: id,
                reason: format!("min corner {} exceeds max corner {}", min, max),
            });
        }
        if !height.is_finite() || height <= 0. {
            return Err(SamplerError::MalformedRoom {
                room_id: id,
                reason: format!("height must be positive, got {}", height),
            });
        }
        Ok(Self {
            id,
            label: label.to_string(),
            min,
            max,
            height,
        })
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Floor elevation.
    pub fn floor(&self) -> f64 {
        self.min.z
    }

    /// Checks if the horizontal position of `pt` falls within the footprint (edges included).
    pub fn contains_footprint(&self, pt: Point) -> bool {
        is_point_inside_footprint(pt, self.min, self.max)
    }
}
