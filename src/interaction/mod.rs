pub mod hit_test;

pub use hit_test::{HitMargins, hit_test};

use serde::{Deserialize, Serialize};

/// Pointer gesture the viewport is currently servicing.
///
/// Orthogonal to the zoom level: any mode can occur at any tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    Pinching,
}

/// One touch contact in viewport-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Requested discrete zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Turns continuous pinch motion into discrete zoom steps.
///
/// A step fires only once the inter-finger distance has moved more than the
/// minimum pinch distance away from the baseline; the baseline then resets to
/// the current distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinchTracker {
    baseline_distance: Option<f64>,
}

impl PinchTracker {
    pub fn begin(&mut self, distance: f64) {
        self.baseline_distance = Some(distance);
    }

    pub fn end(&mut self) {
        self.baseline_distance = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.baseline_distance.is_some()
    }

    /// Feeds a new inter-finger distance sample.
    ///
    /// Returns the zoom direction when the accumulated change crosses
    /// `min_step_px`, re-baselining in that case.
    pub fn update(&mut self, distance: f64, min_step_px: f64) -> Option<ZoomDirection> {
        let baseline = match self.baseline_distance {
            Some(baseline) => baseline,
            None => {
                self.baseline_distance = Some(distance);
                return None;
            }
        };

        if (distance - baseline).abs() <= min_step_px {
            return None;
        }

        self.baseline_distance = Some(distance);
        Some(if distance > baseline {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        })
    }
}

/// Transient pointer/touch state.
///
/// Hovered and selected events are weak references: indices into the current
/// event collection, cleared whenever the collection is replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    last_x: f64,
    last_y: f64,
    hover_x: Option<f64>,
    pinch: PinchTracker,
    hovered_event: Option<usize>,
    selected_event: Option<usize>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.mode == InteractionMode::Dragging
    }

    #[must_use]
    pub fn last_pointer(self) -> (f64, f64) {
        (self.last_x, self.last_y)
    }

    #[must_use]
    pub fn hover_x(self) -> Option<f64> {
        self.hover_x
    }

    #[must_use]
    pub fn hovered_event(self) -> Option<usize> {
        self.hovered_event
    }

    #[must_use]
    pub fn selected_event(self) -> Option<usize> {
        self.selected_event
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.mode = InteractionMode::Dragging;
        self.last_x = x;
        self.last_y = y;
    }

    /// Advances the drag anchor and returns the pointer delta x.
    pub fn drag_to(&mut self, x: f64, y: f64) -> f64 {
        let delta_x = x - self.last_x;
        self.last_x = x;
        self.last_y = y;
        delta_x
    }

    pub fn end_drag(&mut self) {
        if self.mode == InteractionMode::Dragging {
            self.mode = InteractionMode::Idle;
        }
    }

    pub fn begin_pinch(&mut self, distance: f64) {
        self.mode = InteractionMode::Pinching;
        self.pinch.begin(distance);
    }

    pub fn pinch_update(&mut self, distance: f64, min_step_px: f64) -> Option<ZoomDirection> {
        self.pinch.update(distance, min_step_px)
    }

    pub fn end_gesture(&mut self) {
        self.mode = InteractionMode::Idle;
        self.pinch.end();
    }

    pub fn set_hover_point(&mut self, x: f64, y: f64) {
        self.hover_x = Some(x);
        self.last_x = x;
        self.last_y = y;
    }

    pub fn clear_hover_point(&mut self) {
        self.hover_x = None;
    }

    pub fn set_hovered_event(&mut self, event_index: Option<usize>) {
        self.hovered_event = event_index;
    }

    pub fn set_selected_event(&mut self, event_index: Option<usize>) {
        self.selected_event = event_index;
    }

    /// Drops event references after the collection was replaced wholesale.
    pub fn invalidate_event_refs(&mut self) {
        self.hovered_event = None;
        self.selected_event = None;
    }
}
