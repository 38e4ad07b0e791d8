pub mod axes;
pub mod bboxes;
pub mod point;
pub mod room;
pub mod vector;

/// Geometric precision
const EPS: f64 = 1e-13;
