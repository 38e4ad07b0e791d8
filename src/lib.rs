pub mod error;
pub mod geom;
pub mod io;
pub mod sim;

// Prelude
pub use error::{SamplerError, SamplerResult};
pub use geom::axes::AxisOrder;
pub use geom::point::Point;
pub use geom::room::{Room, RoomId, RoomSlot};
pub use geom::vector::Vector;
pub use sim::direction::{AxisLabel, Classification, Direction, classify};
pub use sim::generator::{
    DatasetSamples, FailedHouse, GeneratorConfig, HouseSamples, generate_dataset, generate_house,
};
pub use sim::index::{GeometryIndex, Location};
pub use sim::oracle::{FootprintOracle, NavigabilityOracle};
pub use sim::sampling::{
    DrawRequest, PairConfig, PairSampler, PlacementPolicy, RoomSampler, Sample,
};
