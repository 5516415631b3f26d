//! Planned routes and the trimming of already-travelled path.

use crate::debug::{debug_off_path, debug_segment};
use crate::math::{distance_to_polyline, points_equal, segment_contains_point, Point2d};
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One planned sub-route between two consecutive stops.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    /// The grid points along the leg, from its origin stop to its destination stop.
    pub points: Vec<Point2d>,
    /// Whether the truck has already reached the leg's destination stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub arrived: bool,
}

/// A truck's planned route, as an ordered list of legs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlannedRoute {
    pub legs: Vec<Leg>,
}

/// The points of a set of legs joined end to end, plus where
/// the first searchable leg begins within them.
struct Joined<'a> {
    points: Vec<Point2d>,
    /// The first leg with at least two points, and the index of its first point in `points`.
    search: Option<(usize, &'a [Point2d])>,
}

impl Leg {
    /// Creates a leg the truck has not yet completed.
    pub fn new(points: Vec<Point2d>) -> Self {
        Self {
            points,
            arrived: false,
        }
    }

    /// Creates a leg the truck has already completed.
    pub fn arrived(points: Vec<Point2d>) -> Self {
        Self {
            points,
            arrived: true,
        }
    }
}

impl PlannedRoute {
    /// Creates a route from its legs, in travel order.
    pub fn new(legs: Vec<Leg>) -> Self {
        Self { legs }
    }

    /// The arrival flag of each leg, in order.
    pub fn arrival_flags(&self) -> impl Iterator<Item = bool> + '_ {
        self.legs.iter().map(|leg| leg.arrived)
    }

    /// The whole route, with points shared between consecutive legs included once.
    pub fn full_path(&self) -> Vec<Point2d> {
        join_legs(self.legs.iter().map(|leg| leg.points.as_slice())).points
    }

    /// The legs not yet completed, joined like [full_path](Self::full_path).
    pub fn remaining_path(&self) -> Vec<Point2d> {
        self.pending().points
    }

    /// Computes the path still ahead of a truck at `position`.
    ///
    /// Completed legs are skipped. The truck is located on the first
    /// axis-aligned segment of the first pending leg that contains it, and
    /// the result is `position` followed by every point after that segment's
    /// start. If the truck is not on that leg, the whole remaining path is
    /// kept. The result always starts with `position`.
    pub fn trim(&self, position: Point2d) -> Vec<Point2d> {
        self.trim_labelled("", position)
    }

    /// Like [trim](Self::trim), tagging any diagnostics with `label`.
    pub(crate) fn trim_labelled(&self, label: &str, position: Point2d) -> Vec<Point2d> {
        let joined = self.pending();
        let offset = joined.search.and_then(|(start, leg)| {
            let segment = locate(leg, position)?;
            debug_segment(label, leg[segment], leg[segment + 1]);
            trace!("truck {label:?} located on segment {segment} of its current leg");
            Some(start + segment + 1)
        });
        let offset = offset.unwrap_or_else(|| {
            let drift = distance_to_polyline(&joined.points, position);
            debug!(
                "truck {label:?} at ({}, {}) is off its planned path (drift {drift:?}); keeping full remaining path",
                position.x, position.y
            );
            debug_off_path(label, position, drift);
            0
        });
        ahead_of(position, &joined.points[offset..])
    }

    fn pending(&self) -> Joined<'_> {
        join_legs(
            self.legs
                .iter()
                .filter(|leg| !leg.arrived)
                .map(|leg| leg.points.as_slice()),
        )
    }
}

impl From<Vec<Leg>> for PlannedRoute {
    fn from(legs: Vec<Leg>) -> Self {
        Self::new(legs)
    }
}

/// Computes the path still ahead of a vehicle at `position`,
/// treating `points` as a single leg not yet completed.
///
/// See [PlannedRoute::trim] for the rules.
pub fn trim_path(points: &[Point2d], position: Point2d) -> Vec<Point2d> {
    let offset = if points.len() >= 2 {
        locate(points, position).map(|segment| segment + 1)
    } else {
        None
    };
    ahead_of(position, &points[offset.unwrap_or(0)..])
}

/// Finds the index of the first segment of `points` that contains `position`.
fn locate(points: &[Point2d], position: Point2d) -> Option<usize> {
    points
        .windows(2)
        .position(|w| segment_contains_point(w[0], w[1], position))
}

/// Prepends `position` to `rest`, dropping any leading points equal to it.
fn ahead_of(position: Point2d, rest: &[Point2d]) -> Vec<Point2d> {
    std::iter::once(position)
        .chain(
            rest.iter()
                .skip_while(|p| points_equal(**p, position))
                .copied(),
        )
        .collect()
}

/// Joins legs end to end, dropping a leg's first point when it repeats the previous point.
fn join_legs<'a>(legs: impl Iterator<Item = &'a [Point2d]>) -> Joined<'a> {
    let mut points: Vec<Point2d> = vec![];
    let mut search = None;
    for leg in legs {
        let shared = match (points.last(), leg.first()) {
            (Some(last), Some(first)) => points_equal(*last, *first),
            _ => false,
        };
        if search.is_none() && leg.len() >= 2 {
            let start = if shared { points.len() - 1 } else { points.len() };
            search = Some((start, leg));
        }
        let skip = if shared { 1 } else { 0 };
        points.extend(leg.iter().skip(skip).copied());
    }
    Joined { points, search }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2d> {
        coords.iter().map(|&(x, y)| Point2d::new(x, y)).collect()
    }

    fn two_leg_route(first_arrived: bool) -> PlannedRoute {
        let leg_a = pts(&[(0.0, 0.0), (0.0, 5.0), (0.0, 10.0)]);
        let leg_b = pts(&[(0.0, 10.0), (5.0, 10.0)]);
        PlannedRoute::new(vec![
            Leg {
                points: leg_a,
                arrived: first_arrived,
            },
            Leg::new(leg_b),
        ])
    }

    #[test]
    fn full_path_shares_leg_boundaries() {
        let route = two_leg_route(false);
        assert_eq!(
            route.full_path(),
            pts(&[(0.0, 0.0), (0.0, 5.0), (0.0, 10.0), (5.0, 10.0)])
        );
        assert_eq!(route.arrival_flags().collect::<Vec<_>>(), [false, false]);
    }

    #[test]
    fn remaining_path_drops_arrived_legs() {
        let route = two_leg_route(true);
        assert_eq!(route.remaining_path(), pts(&[(0.0, 10.0), (5.0, 10.0)]));
        assert_eq!(route.full_path().len(), 4);
    }

    #[test]
    fn trims_at_vertex() {
        let route = two_leg_route(false);
        assert_eq!(
            route.trim(Point2d::new(0.0, 5.0)),
            pts(&[(0.0, 5.0), (0.0, 10.0), (5.0, 10.0)])
        );
    }

    #[test]
    fn trims_mid_segment() {
        let route = two_leg_route(false);
        assert_eq!(
            route.trim(Point2d::new(0.0, 7.5)),
            pts(&[(0.0, 7.5), (0.0, 10.0), (5.0, 10.0)])
        );
    }

    #[test]
    fn off_path_keeps_remaining_path() {
        let route = two_leg_route(false);
        assert_eq!(
            route.trim(Point2d::new(3.0, 3.0)),
            pts(&[(3.0, 3.0), (0.0, 0.0), (0.0, 5.0), (0.0, 10.0), (5.0, 10.0)])
        );
    }

    #[test]
    fn searches_first_pending_leg_only() {
        // The truck is on leg B's geometry, but leg A is still pending.
        let route = two_leg_route(false);
        assert_eq!(
            route.trim(Point2d::new(2.0, 10.0)),
            pts(&[(2.0, 10.0), (0.0, 0.0), (0.0, 5.0), (0.0, 10.0), (5.0, 10.0)])
        );
    }

    #[test]
    fn arrived_leg_is_skipped() {
        let route = two_leg_route(true);
        assert_eq!(
            route.trim(Point2d::new(2.0, 10.0)),
            pts(&[(2.0, 10.0), (5.0, 10.0)])
        );
    }

    #[test]
    fn all_legs_arrived_yields_position() {
        let route = PlannedRoute::new(vec![
            Leg::arrived(pts(&[(0.0, 0.0), (0.0, 5.0)])),
            Leg::arrived(pts(&[(0.0, 5.0), (3.0, 5.0)])),
        ]);
        assert_eq!(route.trim(Point2d::new(3.0, 5.0)), pts(&[(3.0, 5.0)]));
        assert_eq!(PlannedRoute::default().trim(Point2d::new(1.0, 1.0)), pts(&[(1.0, 1.0)]));
    }

    #[test]
    fn short_legs_are_not_searched() {
        let route = PlannedRoute::new(vec![
            Leg::new(pts(&[(0.0, 0.0)])),
            Leg::new(vec![]),
            Leg::new(pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)])),
        ]);
        assert_eq!(
            route.trim(Point2d::new(4.0, 1.0)),
            pts(&[(4.0, 1.0), (4.0, 4.0)])
        );
    }

    #[test]
    fn separate_legs_without_shared_boundary() {
        let route = PlannedRoute::new(vec![
            Leg::new(pts(&[(0.0, 0.0), (2.0, 0.0)])),
            Leg::new(pts(&[(3.0, 0.0), (3.0, 2.0)])),
        ]);
        assert_eq!(route.full_path().len(), 4);
        assert_eq!(
            route.trim(Point2d::new(1.0, 0.0)),
            pts(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (3.0, 2.0)])
        );
    }

    #[test]
    fn flat_path_trimming() {
        let path = pts(&[(0.0, 0.0), (0.0, 5.0), (0.0, 10.0), (5.0, 10.0)]);
        assert_eq!(
            trim_path(&path, Point2d::new(0.0, 5.0)),
            pts(&[(0.0, 5.0), (0.0, 10.0), (5.0, 10.0)])
        );
        assert_eq!(
            trim_path(&path, Point2d::new(5.0, 10.0)),
            pts(&[(5.0, 10.0)])
        );
        assert_eq!(trim_path(&[], Point2d::new(1.0, 2.0)), pts(&[(1.0, 2.0)]));
        assert_eq!(
            trim_path(&path[..1], Point2d::new(1.0, 2.0)),
            pts(&[(1.0, 2.0), (0.0, 0.0)])
        );
    }
}
