use crate::geom::point::Point;

/// Checks whether a point lies within the horizontal footprint of a bounding box.
///
/// Only `x` and `y` are tested. Both ends are inclusive, so points lying on the
/// footprint edge count as inside.
pub fn is_point_inside_footprint(ptest: Point, pmin: Point, pmax: Point) -> bool {
    pmin.x <= ptest.x && ptest.x <= pmax.x && pmin.y <= ptest.y && ptest.y <= pmax.y
}

/// Checks whether `pmin <= pmax` on every axis.
pub fn is_bbox_ordered(pmin: Point, pmax: Point) -> bool {
    pmin.x <= pmax.x && pmin.y <= pmax.y && pmin.z <= pmax.z
}

/// Returns the (min, max) corners of the box holding all points `pts`.
///
/// Returns `None` for an empty slice.
pub fn bounding_box(pts: &[Point]) -> Option<(Point, Point)> {
    let first = *pts.first()?;
    let (pmin, pmax) = pts.iter().skip(1).fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
        )
    });
    Some((pmin, pmax))
}
