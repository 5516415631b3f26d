//! Route trimming and road blockage visibility for the HyperLogix fleet map.
//!
//! Given the live position of each truck and its planned route, the engine
//! works out which part of the route is still ahead of the truck. Given the
//! road blockages and the simulation clock, it works out which blockages are
//! in force right now. Both are pure computations over inputs owned by the
//! caller.

pub use blockage::{visible_blockages, Blockage, Timestamp};
pub use cgmath;
pub use chrono;
#[cfg(feature = "debug")]
pub use debug::take_debug_frame;
pub use engine::{FleetSnapshot, Frame, RouteVisibilityEngine, TrimmedPath, TruckState};
pub use error::{Error, Result};
pub use route::{trim_path, Leg, PlannedRoute};
pub use util::Interval;

mod blockage;
mod debug;
mod engine;
mod error;
pub mod math;
mod route;
mod util;
