use super::{Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;
use itertools::Itertools;

/// Returns true if the two points have exactly the same coordinates.
#[inline]
pub fn points_equal(a: Point2d, b: Point2d) -> bool {
    a.x == b.x && a.y == b.y
}

/// Determines whether `point` lies on the axis-aligned segment from `p1` to `p2`.
///
/// A vertical segment contains the point if their x coordinates match exactly
/// and the point's y is within the segment's y range (inclusive); likewise for
/// horizontal segments with the axes swapped. Diagonal segments never contain
/// anything, since planned routes only move along grid lines.
pub fn segment_contains_point(p1: Point2d, p2: Point2d, point: Point2d) -> bool {
    let vertical = p1.x == p2.x && point.x == p1.x;
    let horizontal = p1.y == p2.y && point.y == p1.y;
    (vertical && Interval::spanning(p1.y, p2.y).contains(&point.y))
        || (horizontal && Interval::spanning(p1.x, p2.x).contains(&point.x))
}

/// The straight line distance between two points.
#[inline]
pub fn euclidean_distance(a: Point2d, b: Point2d) -> f64 {
    a.distance(b)
}

/// Finds the point on the segment from `p1` to `p2` closest to `point`.
pub fn closest_point_on_segment(p1: Point2d, p2: Point2d, point: Point2d) -> Point2d {
    let dir: Vector2d = p2 - p1;
    let len2 = dir.magnitude2();
    if len2 == 0.0 {
        return p1;
    }
    let t = ((point - p1).dot(dir) / len2).clamp(0.0, 1.0);
    p1 + dir * t
}

/// Computes the shortest distance from `point` to the polyline through `points`.
///
/// Returns `None` for an empty polyline. Only used to report how far a
/// vehicle has drifted from its planned path.
pub fn distance_to_polyline(points: &[Point2d], point: Point2d) -> Option<f64> {
    match points {
        [] => None,
        [single] => Some(euclidean_distance(*single, point)),
        _ => points
            .iter()
            .tuple_windows()
            .map(|(a, b)| euclidean_distance(closest_point_on_segment(*a, *b, point), point))
            .reduce(f64::min),
    }
}

/// Computes the total length of the polyline through `points`.
pub fn polyline_length(points: &[Point2d]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| euclidean_distance(*a, *b))
        .sum()
}
