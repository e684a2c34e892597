//! Simple 2D coordinate geometry algorithms.

use bevy_math::Vec2;

use crate::{Length, Position};

#[cfg(test)]
mod tests;

/// Checks whether `point` lies inside the polygon described by `vertices` (in order,
/// implicitly closed), using the even-odd crossing rule.
///
/// Points exactly on an edge may fall on either side; airspace polygons are large
/// enough that this never matters in practice.
#[must_use]
pub fn polygon_contains(vertices: &[Position<Vec2>], point: Position<Vec2>) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let p = point.get();
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let a = vertices[i].get();
        let b = vertices[j].get();
        if (a.y > p.y) != (b.y > p.y) {
            let x_at_y = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_at_y {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns the point at `offset` along the segment from `start` towards `end`.
///
/// `offset` may exceed the segment length, in which case the point is extrapolated
/// along the same bearing.
#[must_use]
pub fn point_along(start: Position<Vec2>, end: Position<Vec2>, offset: Length<f32>) -> Position<Vec2> {
    let heading = start.heading_towards(end);
    start + offset.with_heading(heading)
}
