//! File I/O for dataset descriptors, configuration and generated samples.

pub mod config;
pub mod descriptor;
pub mod samples;

pub use config::read_config;
pub use descriptor::{DatasetKind, HouseDescriptor, from_dataset_str, read_dataset};
pub use samples::{read_samples, write_samples};
