use crate::Point;
use crate::geom::room::RoomSlot;
use crate::sim::direction::Direction;

/// One accepted listener/source placement, in the core frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Agent position on the floor.
    pub listener: Point,
    /// Listener raised by the sensor height.
    pub sensor: Point,
    pub source: Point,
    /// Direction of the source as seen from the sensor.
    pub direction: Direction,
    /// Sensor-to-source distance.
    pub distance: f64,
    /// `None` when the building has no room geometry.
    pub listener_room: Option<RoomSlot>,
    pub source_room: Option<RoomSlot>,
}

/// Caller intent for one draw.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DrawRequest {
    /// Place the source in the listener's room (room-aware placement only).
    pub same_room: bool,
    /// Place a fresh listener anywhere navigable instead of inside a room.
    pub allow_corridor: bool,
    /// Listener position carried over from an earlier sample (core frame).
    pub previous_listener: Option<Point>,
}

impl DrawRequest {
    pub fn new(same_room: bool, allow_corridor: bool) -> Self {
        Self {
            same_room,
            allow_corridor,
            previous_listener: None,
        }
    }

    pub fn with_previous_listener(mut self, listener: Point) -> Self {
        self.previous_listener = Some(listener);
        self
    }
}
