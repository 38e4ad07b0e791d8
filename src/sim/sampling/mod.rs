//! Listener and source placement.

pub mod config;
pub mod pair;
pub mod room;
pub mod sample;

pub use config::PairConfig;
pub use pair::{PairSampler, PlacementPolicy};
pub use room::RoomSampler;
pub use sample::{DrawRequest, Sample};
