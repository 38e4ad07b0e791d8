//! Error types for geometry indexing and pair sampling.

use thiserror::Error;

use crate::geom::room::RoomId;

/// Result type for sampling operations
pub type SamplerResult<T> = Result<T, SamplerError>;

/// Errors raised by the geometry index and the samplers.
///
/// A single rejected draw is not an error; see [`crate::sim::sampling::PairSampler::generate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    /// Room violates `min <= max` or has a non-positive height
    #[error("Malformed room {room_id}: {reason}")]
    MalformedRoom { room_id: RoomId, reason: String },

    /// Two rooms share the same id
    #[error("Room is already present in the geometry index: {0}")]
    DuplicateRoom(RoomId),

    /// Id-based lookup against an index that does not hold the room
    #[error("Unknown room id: {0}")]
    UnknownRoom(RoomId),

    /// Room-aware placement needs at least one room
    #[error("Geometry index has no rooms")]
    EmptyGeometry,

    /// Room-only listener placement cannot succeed
    #[error("No room reaches the minimum listener room height of {min_height}")]
    NoEligibleListenerRoom { min_height: f64 },

    /// The source retry loop hit its attempt cap
    #[error("Source placement gave up after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },

    /// Every whole draw in a bounded batch was rejected
    #[error("No valid listener/source pair found in {draws} draws")]
    DrawsExhausted { draws: usize },

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
