use crate::math::Point2d;
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

/// Records the segment a vehicle was located on.
#[allow(unused)]
pub fn debug_segment(truck_id: &str, p1: Point2d, p2: Point2d) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "segment",
            "truck": truck_id,
            "p1": [p1.x, p1.y],
            "p2": [p2.x, p2.y],
        }))
    })
}

/// Records a vehicle that could not be located on its path.
#[allow(unused)]
pub fn debug_off_path(truck_id: &str, pos: Point2d, drift: Option<f64>) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "off_path",
            "truck": truck_id,
            "pos": [pos.x, pos.y],
            "drift": drift,
        }))
    })
}

/// Takes everything recorded on this thread since the last call, as a JSON array.
#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
