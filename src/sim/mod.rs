//! Spatial sampling of listener/source pairs.

pub mod direction;
pub mod generator;
pub mod index;
pub mod oracle;
pub mod sampling;
