//! Raw input mapping
//!
//! Turns key codes and pointer gestures into simulation commands. Kept free of
//! `web_sys` so it can be tested natively; the browser glue only forwards
//! event fields here.

use crate::consts::NUDGE_DISTANCE;
use crate::sim::{Side, TickInput};

/// Half-width of the neutral zone around the play area's centre (px)
pub const DRAG_DEAD_ZONE: f32 = 24.0;

/// Minimum horizontal travel for a swipe (px)
pub const SWIPE_MIN_DX: f32 = 40.0;
/// Maximum vertical travel for a swipe (px)
pub const SWIPE_MAX_DY: f32 = 80.0;
/// Minimum horizontal speed for a swipe (px per ms)
pub const SWIPE_MIN_SPEED: f32 = 0.5;

/// What a keyboard key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Side),
    Start,
}

impl KeyAction {
    /// Map a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(KeyAction::Move(Side::Left)),
            "ArrowRight" => Some(KeyAction::Move(Side::Right)),
            "Space" => Some(KeyAction::Start),
            _ => None,
        }
    }
}

/// Direction flags for a pointer held at `local_x` inside an area `width` wide.
///
/// Left of the dead zone moves left, right of it moves right, inside it stops.
pub fn drag_direction(local_x: f32, width: f32) -> TickInput {
    let center = width / 2.0;
    TickInput {
        left: local_x < center - DRAG_DEAD_ZONE,
        right: local_x > center + DRAG_DEAD_ZONE,
    }
}

/// Pointer-down sample used for swipe detection
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub time_ms: f64,
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(time_ms: f64, x: f32, y: f32) -> Self {
        Self { time_ms, x, y }
    }

    /// Nudge distance if the gesture ending at `end` was a quick horizontal swipe
    pub fn swipe_to(&self, end: &PointerSample) -> Option<f32> {
        let dt = (end.time_ms - self.time_ms) as f32;
        let dx = end.x - self.x;
        let dy = end.y - self.y;
        let speed = dx.abs() / dt.max(1.0);

        if dx.abs() > SWIPE_MIN_DX && dy.abs() < SWIPE_MAX_DY && speed > SWIPE_MIN_SPEED {
            Some(if dx > 0.0 {
                NUDGE_DISTANCE
            } else {
                -NUDGE_DISTANCE
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(
            KeyAction::from_code("ArrowLeft"),
            Some(KeyAction::Move(Side::Left))
        );
        assert_eq!(
            KeyAction::from_code("ArrowRight"),
            Some(KeyAction::Move(Side::Right))
        );
        assert_eq!(KeyAction::from_code("Space"), Some(KeyAction::Start));
        assert_eq!(KeyAction::from_code("KeyA"), None);
    }

    #[test]
    fn test_drag_zones() {
        let width = 800.0;
        assert_eq!(
            drag_direction(100.0, width),
            TickInput {
                left: true,
                right: false
            }
        );
        assert_eq!(
            drag_direction(700.0, width),
            TickInput {
                left: false,
                right: true
            }
        );
        assert_eq!(drag_direction(400.0, width), TickInput::default());
        // Dead zone edges are neutral
        assert_eq!(drag_direction(376.0, width), TickInput::default());
        assert_eq!(drag_direction(424.0, width), TickInput::default());
        assert!(drag_direction(375.9, width).left);
    }

    #[test]
    fn test_quick_swipe_nudges() {
        let start = PointerSample::new(1000.0, 300.0, 200.0);
        let right = PointerSample::new(1100.0, 400.0, 210.0);
        assert_eq!(start.swipe_to(&right), Some(NUDGE_DISTANCE));

        let left = PointerSample::new(1050.0, 200.0, 190.0);
        assert_eq!(start.swipe_to(&left), Some(-NUDGE_DISTANCE));
    }

    #[test]
    fn test_rejected_swipes() {
        let start = PointerSample::new(0.0, 300.0, 200.0);
        // Too short
        assert_eq!(start.swipe_to(&PointerSample::new(10.0, 330.0, 200.0)), None);
        // Too vertical
        assert_eq!(start.swipe_to(&PointerSample::new(10.0, 400.0, 300.0)), None);
        // Too slow: 100px over 1s
        assert_eq!(start.swipe_to(&PointerSample::new(1000.0, 400.0, 200.0)), None);
    }

    #[test]
    fn test_instant_swipe_uses_min_duration() {
        let start = PointerSample::new(500.0, 0.0, 0.0);
        let end = PointerSample::new(500.0, 50.0, 0.0);
        assert_eq!(start.swipe_to(&end), Some(NUDGE_DISTANCE));
    }
}
