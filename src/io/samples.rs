//! Sample export.
//!
//! Records are written in the simulator's axis order so downstream rendering
//! can consume them as-is.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::Point;
use crate::geom::axes::AxisOrder;
use crate::geom::room::RoomSlot;
use crate::sim::direction::Direction;
use crate::sim::generator::HouseSamples;
use crate::sim::sampling::Sample;

/// Export form of a [`Sample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub agent_coordinate: [f64; 3],
    pub sensor_coordinate: [f64; 3],
    pub soundsource_coordinate: [f64; 3],
    pub direction: Direction,
    pub distance: f64,
    pub sensor_room_id: Option<RoomSlot>,
    pub soundsource_room_id: Option<RoomSlot>,
}

impl SampleRecord {
    pub fn from_sample(sample: &Sample, axes: AxisOrder) -> Self {
        Self {
            agent_coordinate: axes.to_external(sample.listener).to_array(),
            sensor_coordinate: axes.to_external(sample.sensor).to_array(),
            soundsource_coordinate: axes.to_external(sample.source).to_array(),
            direction: sample.direction,
            distance: sample.distance,
            sensor_room_id: sample.listener_room,
            soundsource_room_id: sample.source_room,
        }
    }

    /// Converts the record back into the core frame.
    pub fn to_sample(&self, axes: AxisOrder) -> Sample {
        let core = |arr: [f64; 3]| axes.to_core(Point::from_array(arr));
        Sample {
            listener: core(self.agent_coordinate),
            sensor: core(self.sensor_coordinate),
            source: core(self.soundsource_coordinate),
            direction: self.direction,
            distance: self.distance,
            listener_room: self.sensor_room_id,
            source_room: self.soundsource_room_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseRecords {
    pub house_id: String,
    pub samples: Vec<SampleRecord>,
}

impl HouseRecords {
    pub fn from_house_samples(house: &HouseSamples, axes: AxisOrder) -> Self {
        Self {
            house_id: house.house_id.clone(),
            samples: house
                .samples
                .iter()
                .map(|s| SampleRecord::from_sample(s, axes))
                .collect(),
        }
    }
}

fn to_records(houses: &[HouseSamples], axes: AxisOrder) -> Vec<HouseRecords> {
    houses
        .iter()
        .map(|h| HouseRecords::from_house_samples(h, axes))
        .collect()
}

/// Writes samples of all buildings to a JSON file.
pub fn write_samples(path: &Path, houses: &[HouseSamples], axes: AxisOrder) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &to_records(houses, axes))
        .with_context(|| format!("Failed to serialize samples to: {}", path.display()))?;

    Ok(())
}

/// Reads sample records from a JSON file.
pub fn read_samples(path: &Path) -> Result<Vec<HouseRecords>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let records: Vec<HouseRecords> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize samples from: {}", path.display()))?;

    Ok(records)
}

pub fn to_samples_string(houses: &[HouseSamples], axes: AxisOrder) -> Result<String> {
    serde_json::to_string_pretty(&to_records(houses, axes))
        .context("Failed to serialize samples to string")
}

pub fn from_samples_string(json: &str) -> Result<Vec<HouseRecords>> {
    serde_json::from_str(json).context("Failed to deserialize samples from string")
}
