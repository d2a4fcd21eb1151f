//! Column resizing by pointer drag.
//!
//! A drag is `idle → dragging → idle`. While a [`DragSession`] exists the owning view routes
//! every drag/up mouse event to it, wherever the pointer is, so there is one capture for the
//! whole table regardless of row count. The session is released by taking it out of the
//! controller on pointer-up, on cancel, or when the controller itself is dropped.

/// Clamps `proposed` into `[min, max]` as `max(min, min(max, proposed))`.
///
/// An inverted range (`min > max`) deterministically yields `min`.
pub fn clamp_width(proposed: i32, min: u16, max: u16) -> u16 {
    let upper = proposed.min(max as i32);
    upper.max(min as i32).clamp(0, u16::MAX as i32) as u16
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub column_id: String,
    pub start_x: i32,
    pub last_x: i32,
}

impl DragSession {
    /// Net pointer travel since the drag began.
    pub fn net_delta(&self) -> i32 {
        self.last_x - self.start_x
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResizeController {
    session: Option<DragSession>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_column(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.column_id.as_str())
    }

    /// Starts a drag on `column_id`. A drag already in progress is replaced.
    pub fn begin(&mut self, column_id: impl Into<String>, x: i32) {
        let column_id = column_id.into();
        tracing::debug!(column = %column_id, x, "column resize drag started");
        self.session = Some(DragSession {
            column_id,
            start_x: x,
            last_x: x,
        });
    }

    /// Applies pointer movement to `x` and returns the clamped width for the active column.
    ///
    /// The delta is measured from the previous pointer position, not the drag start, and the
    /// result is re-clamped on every step. Returns `None` when idle or when the pointer has
    /// not moved.
    pub fn drag_to(&mut self, x: i32, current_width: u16, bounds: (u16, u16)) -> Option<u16> {
        let session = self.session.as_mut()?;
        let delta = x - session.last_x;
        session.last_x = x;
        if delta == 0 {
            return None;
        }
        let (min, max) = bounds;
        Some(clamp_width(current_width as i32 + delta, min, max))
    }

    /// Ends the drag, releasing the capture.
    pub fn end(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if let Some(s) = &session {
            tracing::debug!(
                column = %s.column_id,
                net_delta = s.net_delta(),
                "column resize drag finished"
            );
        }
        session
    }

    pub fn cancel(&mut self) {
        if let Some(s) = self.session.take() {
            tracing::debug!(column = %s.column_id, "column resize drag cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(deltas: &[i32], start_width: u16, bounds: (u16, u16)) -> u16 {
        let mut c = ResizeController::new();
        let mut width = start_width;
        let mut x = 1000;
        c.begin("col", x);
        for d in deltas {
            x += d;
            if let Some(w) = c.drag_to(x, width, bounds) {
                width = w;
            }
        }
        c.end();
        width
    }

    #[test]
    fn large_positive_travel_pins_to_max() {
        let deltas: Vec<i32> = std::iter::repeat_n(100, 100).collect();
        assert_eq!(run(&deltas, 150, (50, 500)), 500);
        assert_eq!(run(&[10_000], 150, (50, 500)), 500);
        assert_eq!(run(&[3_000, -1, 7_001], 150, (50, 500)), 500);
    }

    #[test]
    fn large_negative_travel_pins_to_min() {
        let deltas: Vec<i32> = std::iter::repeat_n(-50, 200).collect();
        assert_eq!(run(&deltas, 150, (50, 500)), 50);
        assert_eq!(run(&[-10_000], 150, (50, 500)), 50);
    }

    #[test]
    fn width_never_leaves_bounds_mid_drag() {
        let mut c = ResizeController::new();
        let mut width = 20u16;
        let mut x = 0;
        c.begin("col", x);
        for d in [7, -30, 90, -2, 55, -400, 3] {
            x += d;
            if let Some(w) = c.drag_to(x, width, (10, 40)) {
                width = w;
            }
            assert!((10..=40).contains(&width));
        }
    }

    #[test]
    fn inverted_bounds_yield_min() {
        assert_eq!(clamp_width(30, 40, 20), 40);
        assert_eq!(clamp_width(5, 40, 20), 40);
    }

    #[test]
    fn zero_delta_is_noop_and_end_releases() {
        let mut c = ResizeController::new();
        c.begin("col", 5);
        assert_eq!(c.drag_to(5, 12, (4, 64)), None);
        let session = c.end().expect("session");
        assert_eq!(session.net_delta(), 0);
        assert!(!c.is_dragging());
        assert_eq!(c.drag_to(9, 12, (4, 64)), None);
    }

    #[test]
    fn cancel_releases_capture() {
        let mut c = ResizeController::new();
        c.begin("col", 5);
        assert_eq!(c.active_column(), Some("col"));
        c.cancel();
        assert_eq!(c.active_column(), None);
    }
}
