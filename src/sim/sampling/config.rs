use serde::{Deserialize, Serialize};

use crate::error::{SamplerError, SamplerResult};
use crate::geom::axes::AxisOrder;

/// Placement constants for a single listener/source draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairConfig {
    /// Height of the sensor (ears) above the listener's feet.
    pub sensor_height: f64,
    /// Lift applied to points sampled on a room floor.
    pub floor_offset: f64,
    /// Rooms lower than this are skipped when placing the listener inside a room.
    pub min_listener_room_height: f64,
    /// Vertical jitter range for sources whose room height is unknown.
    pub default_ceiling_height: f64,
    /// Draws with a sensor-to-source distance above this are rejected.
    pub max_distance: f64,
    /// Attempt cap of the source placement loop.
    pub max_source_attempts: usize,
    /// Axis order of points reported by the navigability oracle.
    pub simulator_axes: AxisOrder,
}

impl PairConfig {
    pub fn new() -> Self {
        Self {
            sensor_height: 1.5,
            floor_offset: 0.05,
            min_listener_room_height: 1.5,
            default_ceiling_height: 3.0,
            max_distance: 10.0,
            max_source_attempts: 1000,
            simulator_axes: AxisOrder::Y_UP,
        }
    }

    pub fn validate(&self) -> SamplerResult<()> {
        let non_negative = [
            ("sensor_height", self.sensor_height),
            ("floor_offset", self.floor_offset),
            ("min_listener_room_height", self.min_listener_room_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0. {
                return Err(SamplerError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        let positive = [
            ("default_ceiling_height", self.default_ceiling_height),
            ("max_distance", self.max_distance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0. {
                return Err(SamplerError::InvalidConfig(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        if self.max_source_attempts == 0 {
            return Err(SamplerError::InvalidConfig(
                "max_source_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PairConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PairConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sensor_height, 1.5);
        assert_eq!(config.max_distance, 10.0);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = PairConfig::new();
        config.max_distance = 0.;
        assert!(config.validate().is_err());

        let mut config = PairConfig::new();
        config.sensor_height = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = PairConfig::new();
        config.max_source_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PairConfig = serde_json::from_str(r#"{"max_distance": 4.0}"#).unwrap();
        assert_eq!(config.max_distance, 4.0);
        assert_eq!(config.floor_offset, 0.05);
        assert_eq!(config.simulator_axes, AxisOrder::Y_UP);
    }
}
