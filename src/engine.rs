#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::blockage::{visible_blockages, Blockage, Timestamp};
#[cfg(feature = "serde")]
use crate::error::Result;
use crate::math::{polyline_length, Point2d};
use crate::route::PlannedRoute;
use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The live state of one truck, as reported by telemetry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruckState {
    /// The truck's identifier.
    pub id: String,
    /// The truck's current grid position.
    pub position: Point2d,
    /// The truck's planned route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub route: PlannedRoute,
}

/// Everything the engine needs for one refresh of the map.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FleetSnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub trucks: Vec<TruckState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub blockages: Vec<Blockage>,
    /// The current simulation time, if the simulation has started.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clock: Option<Timestamp>,
}

/// The path still ahead of a truck.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TrimmedPath {
    pub truck_id: String,
    /// The truck's position followed by the points it has yet to reach.
    pub points: Vec<Point2d>,
}

/// What the renderer should draw for one refresh.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// One trimmed path per truck, in snapshot order.
    pub paths: Vec<TrimmedPath>,
    /// The blockages active at the snapshot's clock.
    pub blockages: Vec<Blockage>,
}

/// Computes the remaining routes and visible blockages of a fleet.
///
/// The engine holds no state between calls: the same snapshot always produces
/// the same frame, and trucks are evaluated independently of one another.
#[derive(Default)]
pub struct RouteVisibilityEngine {
    /// Debugging information from the previously evaluated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl TrimmedPath {
    /// The length of the remaining path, in grid units.
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }
}

#[cfg(feature = "serde")]
impl FleetSnapshot {
    /// Parses a snapshot from JSON, validating every blockage.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a snapshot from a JSON file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl RouteVisibilityEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Default::default()
    }

    /// Evaluates a snapshot, producing the paths and blockages to draw.
    pub fn evaluate(&mut self, snapshot: &FleetSnapshot) -> Frame {
        let paths = snapshot
            .trucks
            .iter()
            .map(|truck| self.trim_truck(truck))
            .collect::<Vec<_>>();
        let blockages = self
            .visible_blockages(snapshot)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        trace!(
            "evaluated {} trucks, {} visible blockages",
            paths.len(),
            blockages.len()
        );

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }

        Frame { paths, blockages }
    }

    /// Computes the path still ahead of a single truck.
    pub fn trim_truck(&self, truck: &TruckState) -> TrimmedPath {
        TrimmedPath {
            truck_id: truck.id.clone(),
            points: truck.route.trim_labelled(&truck.id, truck.position),
        }
    }

    /// Selects the blockages active at the snapshot's clock.
    pub fn visible_blockages<'a>(&self, snapshot: &'a FleetSnapshot) -> Vec<&'a Blockage> {
        visible_blockages(&snapshot.blockages, snapshot.clock)
    }

    /// Gets the debugging information for the previously evaluated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&self) -> serde_json::Value {
        self.debug.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::route::Leg;
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDate;

    fn truck(id: &str, x: f64, y: f64) -> TruckState {
        TruckState {
            id: id.to_owned(),
            position: Point2d::new(x, y),
            route: PlannedRoute::new(vec![Leg::new(vec![
                Point2d::new(0.0, 0.0),
                Point2d::new(10.0, 0.0),
                Point2d::new(10.0, 10.0),
            ])]),
        }
    }

    #[test]
    fn trucks_are_trimmed_in_order() {
        let snapshot = FleetSnapshot {
            trucks: vec![truck("TA01", 4.0, 0.0), truck("TB02", 10.0, 3.0)],
            ..Default::default()
        };
        let frame = RouteVisibilityEngine::new().evaluate(&snapshot);
        let ids = frame.paths.iter().map(|p| p.truck_id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["TA01", "TB02"]);
        assert_eq!(frame.paths[0].points.len(), 3);
        assert_approx_eq!(frame.paths[0].length(), 16.0);
        assert_approx_eq!(frame.paths[1].length(), 7.0);
        assert!(frame.blockages.is_empty());
    }

    #[test]
    fn blockages_follow_clock() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let at = |h| day.and_hms_opt(h, 0, 0).unwrap();
        let blockage = Blockage::new(at(6), at(8), [Point2d::new(5.0, 0.0)]).unwrap();
        let mut snapshot = FleetSnapshot {
            blockages: vec![blockage.clone()],
            ..Default::default()
        };
        let mut engine = RouteVisibilityEngine::new();

        assert!(engine.evaluate(&snapshot).blockages.is_empty());
        snapshot.clock = Some(at(7));
        assert_eq!(engine.evaluate(&snapshot).blockages, vec![blockage]);
        snapshot.clock = Some(at(9));
        assert!(engine.evaluate(&snapshot).blockages.is_empty());
    }
}
