//! Building dataset descriptors.
//!
//! Two JSON layouts are supported:
//! - MP3D: an array of houses, each listing rooms with axis-aligned corners,
//!   a label and a ceiling height. Corners are stored in the core `(x, y, z)` order.
//! - Gibson: an array of houses with a room count only. These buildings have no
//!   room geometry and are sampled without room constraints.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::Point;
use crate::error::SamplerResult;
use crate::geom::room::{Room, RoomId, RoomSlot};
use crate::sim::index::GeometryIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Mp3d,
    Gibson,
}

impl FromStr for DatasetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mp3d" => Ok(DatasetKind::Mp3d),
            "gibson" => Ok(DatasetKind::Gibson),
            other => Err(anyhow!("Unknown dataset kind: {} (expected mp3d or gibson)", other)),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Mp3d => write!(f, "mp3d"),
            DatasetKind::Gibson => write!(f, "gibson"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vertex> for Point {
    fn from(v: Vertex) -> Self {
        Point::new(v.x, v.y, v.z)
    }
}

/// One room entry of an MP3D house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDescriptor {
    pub region_index: usize,
    pub label: String,
    pub left_bottom_vertex: Vertex,
    pub right_top_vertex: Vertex,
    pub height: f64,
}

impl RoomDescriptor {
    pub fn to_room(&self) -> SamplerResult<Room> {
        Room::new(
            RoomId(self.region_index),
            &self.label,
            self.left_bottom_vertex.into(),
            self.right_top_vertex.into(),
            self.height,
        )
    }
}

#[derive(Deserialize)]
struct Mp3dHouse {
    house_id: String,
    rooms: Vec<RoomDescriptor>,
}

#[derive(Default, Deserialize)]
struct GibsonStats {
    #[serde(default)]
    room: usize,
}

#[derive(Deserialize)]
struct GibsonHouse {
    id: String,
    #[serde(default)]
    stats: GibsonStats,
}

/// Dataset-independent view of one building.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseDescriptor {
    pub house_id: String,
    /// Room geometry, empty for datasets without it.
    pub rooms: Vec<RoomDescriptor>,
    /// Room count reported by datasets that carry no geometry.
    pub declared_room_count: usize,
}

impl HouseDescriptor {
    /// Number of rooms, geometric or declared.
    pub fn room_count(&self) -> usize {
        if self.rooms.is_empty() {
            self.declared_room_count
        } else {
            self.rooms.len()
        }
    }

    /// Builds the lookup index for this building, validating every room.
    pub fn geometry_index(&self) -> SamplerResult<GeometryIndex> {
        let rooms = self
            .rooms
            .iter()
            .map(|r| r.to_room())
            .collect::<SamplerResult<Vec<Room>>>()?;
        GeometryIndex::new(rooms)
    }

    /// Human-readable summary of one room.
    pub fn room_info(&self, id: RoomId) -> Option<String> {
        self.rooms
            .iter()
            .find(|r| r.region_index == id.0)
            .map(|r| {
                format!(
                    "region_index: {}; room_type: {}; height: {}.",
                    r.region_index, r.label, r.height
                )
            })
    }

    /// Summary of a sample's room assignment, for logs.
    pub fn slot_info(&self, slot: Option<RoomSlot>) -> String {
        match slot {
            Some(RoomSlot::Room(id)) => self
                .room_info(id)
                .unwrap_or_else(|| format!("region_index: {}.", id)),
            Some(RoomSlot::Corridor) => RoomSlot::CORRIDOR_TAG.to_string(),
            None => "unassigned".to_string(),
        }
    }
}

/// Parses a dataset descriptor from a JSON string.
pub fn from_dataset_str(json: &str, kind: DatasetKind) -> Result<Vec<HouseDescriptor>> {
    let houses = match kind {
        DatasetKind::Mp3d => {
            let houses: Vec<Mp3dHouse> =
                serde_json::from_str(json).context("Failed to deserialize MP3D descriptor")?;
            houses
                .into_iter()
                .map(|h| HouseDescriptor {
                    house_id: h.house_id,
                    declared_room_count: h.rooms.len(),
                    rooms: h.rooms,
                })
                .collect()
        }
        DatasetKind::Gibson => {
            let houses: Vec<GibsonHouse> =
                serde_json::from_str(json).context("Failed to deserialize Gibson descriptor")?;
            houses
                .into_iter()
                .map(|h| HouseDescriptor {
                    house_id: h.id,
                    rooms: Vec::new(),
                    declared_room_count: h.stats.room,
                })
                .collect()
        }
    };
    Ok(houses)
}

/// Reads a dataset descriptor file.
pub fn read_dataset(path: &Path, kind: DatasetKind) -> Result<Vec<HouseDescriptor>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let houses = from_dataset_str(&json, kind)
        .with_context(|| format!("Invalid {} descriptor: {}", kind, path.display()))?;
    tracing::info!(
        houses = houses.len(),
        %kind,
        path = %path.display(),
        "Loaded dataset descriptor"
    );
    Ok(houses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SamplerError;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const MP3D: &str = r#"[
        {
            "house_id": "17DRP5sb8fy",
            "rooms": [
                {
                    "region_index": 0,
                    "label": "bedroom",
                    "left_bottom_vertex": {"x": 0.0, "y": 0.0, "z": 0.1},
                    "right_top_vertex": {"x": 3.0, "y": 4.0, "z": 0.1},
                    "height": 2.6
                },
                {
                    "region_index": 4,
                    "label": "bathroom",
                    "left_bottom_vertex": {"x": 3.5, "y": 0.0, "z": 0.1},
                    "right_top_vertex": {"x": 5.0, "y": 2.0, "z": 0.1},
                    "height": 2.4
                }
            ]
        }
    ]"#;

    const GIBSON: &str = r#"[
        {"id": "Allensville", "stats": {"room": 6, "floor": 1}},
        {"id": "Beechwood"}
    ]"#;

    #[test]
    fn test_parse_mp3d() -> anyhow::Result<()> {
        let houses = from_dataset_str(MP3D, DatasetKind::Mp3d)?;
        assert_eq!(houses.len(), 1);
        let house = &houses[0];
        assert_eq!(house.house_id, "17DRP5sb8fy");
        assert_eq!(house.room_count(), 2);

        let index = house.geometry_index()?;
        assert_eq!(index.room_ids(), vec![RoomId(0), RoomId(4)]);
        assert_eq!(index.locate(Point::new(4., 1., 0.)).slot, RoomSlot::Room(RoomId(4)));
        assert_eq!(index.room(RoomId(0))?.floor(), 0.1);
        Ok(())
    }

    #[test]
    fn test_parse_gibson() -> anyhow::Result<()> {
        let houses = from_dataset_str(GIBSON, DatasetKind::Gibson)?;
        assert_eq!(houses.len(), 2);
        assert_eq!(houses[0].room_count(), 6);
        assert_eq!(houses[1].room_count(), 0);
        assert!(houses[0].geometry_index()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_room_info() -> anyhow::Result<()> {
        let houses = from_dataset_str(MP3D, DatasetKind::Mp3d)?;
        assert_eq!(
            houses[0].room_info(RoomId(4)).as_deref(),
            Some("region_index: 4; room_type: bathroom; height: 2.4.")
        );
        assert!(houses[0].room_info(RoomId(1)).is_none());
        Ok(())
    }

    #[test]
    fn test_slot_info() -> anyhow::Result<()> {
        let houses = from_dataset_str(MP3D, DatasetKind::Mp3d)?;
        let house = &houses[0];
        assert_eq!(
            house.slot_info(Some(RoomSlot::Room(RoomId(0)))),
            "region_index: 0; room_type: bedroom; height: 2.6."
        );
        assert_eq!(house.slot_info(Some(RoomSlot::Room(RoomId(9)))), "region_index: 9.");
        assert_eq!(house.slot_info(Some(RoomSlot::Corridor)), "corridor");
        assert_eq!(house.slot_info(None), "unassigned");
        Ok(())
    }

    #[test]
    fn test_malformed_room_rejected_at_build() -> anyhow::Result<()> {
        let json = MP3D.replace("\"height\": 2.4", "\"height\": 0.0");
        let houses = from_dataset_str(&json, DatasetKind::Mp3d)?;
        let result = houses[0].geometry_index();
        assert!(matches!(
            result,
            Err(SamplerError::MalformedRoom { room_id: RoomId(4), .. })
        ));
        Ok(())
    }

    #[test]
    fn test_read_dataset_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mp3d.json");
        File::create(&path)?.write_all(MP3D.as_bytes())?;
        let houses = read_dataset(&path, DatasetKind::Mp3d)?;
        assert_eq!(houses[0].rooms.len(), 2);
        Ok(())
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_dataset(Path::new("/nonexistent/path/mp3d.json"), DatasetKind::Mp3d);
        assert!(result.is_err());
    }

    #[test]
    fn test_dataset_kind_from_str() {
        assert_eq!("MP3D".parse::<DatasetKind>().unwrap(), DatasetKind::Mp3d);
        assert_eq!("gibson".parse::<DatasetKind>().unwrap(), DatasetKind::Gibson);
        assert!("replica".parse::<DatasetKind>().is_err());
    }
}
