//! Time-bounded road blockages and their visibility.

use crate::error::{Error, Result};
use crate::math::Point2d;
use crate::util::Interval;
use log::trace;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in simulated time, as sent by the planning backend.
pub type Timestamp = chrono::NaiveDateTime;

/// A set of grid nodes that are impassable during a window of time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBlockage", into = "RawBlockage"))]
pub struct Blockage {
    /// The closed window during which the blockage applies.
    window: Interval<Timestamp>,
    /// The blocked nodes, in order along the road.
    nodes: SmallVec<[Point2d; 4]>,
}

/// A blockage as it appears on the wire, before validation.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlockage {
    start: Timestamp,
    end: Timestamp,
    blocked_nodes: Vec<Point2d>,
}

impl Blockage {
    /// Creates a blockage active from `start` to `end` inclusive.
    ///
    /// Fails if the window ends before it starts.
    pub fn new(
        start: Timestamp,
        end: Timestamp,
        nodes: impl IntoIterator<Item = Point2d>,
    ) -> Result<Self> {
        let window = Interval::new(start, end);
        if !window.is_ordered() {
            return Err(Error::InvalidWindow { start, end });
        }
        Ok(Self {
            window,
            nodes: nodes.into_iter().collect(),
        })
    }

    /// The instant the blockage becomes active.
    pub fn start(&self) -> Timestamp {
        self.window.min
    }

    /// The last instant the blockage is active.
    pub fn end(&self) -> Timestamp {
        self.window.max
    }

    pub fn window(&self) -> Interval<Timestamp> {
        self.window
    }

    /// The blocked nodes.
    pub fn nodes(&self) -> &[Point2d] {
        &self.nodes
    }

    /// Whether the blockage applies at `now`. Both ends of the window are inclusive.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.window.contains(&now)
    }

    /// The consecutive pairs of blocked nodes, as line segments for drawing.
    pub fn segments(&self) -> impl Iterator<Item = [Point2d; 2]> + '_ {
        self.nodes.windows(2).map(|w| [w[0], w[1]])
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawBlockage> for Blockage {
    type Error = Error;

    fn try_from(raw: RawBlockage) -> Result<Self> {
        Self::new(raw.start, raw.end, raw.blocked_nodes)
    }
}

#[cfg(feature = "serde")]
impl From<Blockage> for RawBlockage {
    fn from(blockage: Blockage) -> Self {
        Self {
            start: blockage.start(),
            end: blockage.end(),
            blocked_nodes: blockage.nodes.into_vec(),
        }
    }
}

/// Selects the blockages active at `now`.
///
/// Without a clock nothing is visible. The input order is preserved,
/// but callers should not rely on any particular order.
pub fn visible_blockages(blockages: &[Blockage], now: Option<Timestamp>) -> Vec<&Blockage> {
    let Some(now) = now else {
        trace!("no simulation clock; hiding {} blockages", blockages.len());
        return vec![];
    };
    let visible = blockages
        .iter()
        .filter(|blockage| blockage.is_active(now))
        .collect::<Vec<_>>();
    trace!("{} of {} blockages active at {now}", visible.len(), blockages.len());
    visible
}
