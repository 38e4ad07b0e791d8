//! Distance and qualitative direction between two points.

use serde::{Deserialize, Serialize};

use crate::{Point, Vector};

/// Qualitative label for one axis of a displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisLabel {
    Right,
    Left,
    Front,
    Behind,
    Above,
    Below,
    /// Zero displacement on the axis
    Aligned,
}

impl AxisLabel {
    /// Label for the reversed displacement.
    pub fn opposite(self) -> Self {
        match self {
            AxisLabel::Right => AxisLabel::Left,
            AxisLabel::Left => AxisLabel::Right,
            AxisLabel::Front => AxisLabel::Behind,
            AxisLabel::Behind => AxisLabel::Front,
            AxisLabel::Above => AxisLabel::Below,
            AxisLabel::Below => AxisLabel::Above,
            AxisLabel::Aligned => AxisLabel::Aligned,
        }
    }
}

/// (positive, negative) label per axis: x, y, z.
const AXIS_LABELS: [(AxisLabel, AxisLabel); 3] = [
    (AxisLabel::Right, AxisLabel::Left),
    (AxisLabel::Front, AxisLabel::Behind),
    (AxisLabel::Above, AxisLabel::Below),
];

/// Per-axis labels ordered `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Direction(pub [AxisLabel; 3]);

impl Direction {
    pub fn labels(&self) -> [AxisLabel; 3] {
        self.0
    }

    /// True when no axis is [`AxisLabel::Aligned`].
    pub fn is_resolved(&self) -> bool {
        !self.0.contains(&AxisLabel::Aligned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub distance: f64,
    pub direction: Direction,
}

/// Classifies where `to` lies as seen from `from`.
///
/// Distance is the 3D Euclidean norm of `to - from`. Each axis is labeled by the
/// sign of its delta; a zero delta gives [`AxisLabel::Aligned`].
pub fn classify(from: Point, to: Point) -> Classification {
    let delta = Vector::from_points(from, to);
    let mut labels = [AxisLabel::Aligned; 3];
    for (i, d) in delta.components().into_iter().enumerate() {
        let (positive, negative) = AXIS_LABELS[i];
        labels[i] = if d > 0. {
            positive
        } else if d < 0. {
            negative
        } else {
            AxisLabel::Aligned
        };
    }
    Classification {
        distance: delta.length(),
        direction: Direction(labels),
    }
}
