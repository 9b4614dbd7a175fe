//! Translation of raw input events into directions.

use crate::direction::Direction;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default swipe threshold in pixels.
pub const SWIPE_THRESHOLD: f64 = 30.0;

/// Maps a browser-style key name (`ArrowUp`, ...) to a direction.
pub fn direction_for_key(name: &str) -> Option<Direction> {
    match name {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Displacement between the start and end of a touch or drag.
///
/// Screen coordinates: `dx > 0` is rightward, `dy > 0` is downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    /// Horizontal displacement.
    pub dx: f64,
    /// Vertical displacement.
    pub dy: f64,
}

impl Swipe {
    /// Creates a swipe from its displacement.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Creates a swipe from start and end points.
    pub fn between(start: (f64, f64), end: (f64, f64)) -> Self {
        Self::new(end.0 - start.0, end.1 - start.1)
    }

    /// Direction of the swipe, or `None` if it is too short.
    ///
    /// The dominant axis decides horizontal vs vertical; ties go vertical.
    /// Only the dominant axis is compared with `threshold`.
    pub fn direction(&self, threshold: f64) -> Option<Direction> {
        let dir = if self.dx.abs() > self.dy.abs() {
            if self.dx > threshold {
                Some(Direction::Right)
            } else if self.dx < -threshold {
                Some(Direction::Left)
            } else {
                None
            }
        } else if self.dy > threshold {
            Some(Direction::Down)
        } else if self.dy < -threshold {
            Some(Direction::Up)
        } else {
            None
        };
        trace!(dx = self.dx, dy = self.dy, ?dir, "Classified swipe");
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(direction_for_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(direction_for_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(direction_for_key("Enter"), None);
    }

    #[test]
    fn test_dominant_axis_wins() {
        assert_eq!(Swipe::new(80.0, 40.0).direction(SWIPE_THRESHOLD), Some(Direction::Right));
        assert_eq!(Swipe::new(-10.0, -50.0).direction(SWIPE_THRESHOLD), Some(Direction::Up));
        assert_eq!(Swipe::new(31.0, -31.0).direction(SWIPE_THRESHOLD), Some(Direction::Up));
    }

    #[test]
    fn test_short_swipes_are_ignored() {
        assert_eq!(Swipe::new(30.0, 0.0).direction(SWIPE_THRESHOLD), None);
        assert_eq!(Swipe::new(0.0, -29.5).direction(SWIPE_THRESHOLD), None);
        // Long minor axis does not rescue a short dominant axis.
        assert_eq!(Swipe::new(-25.0, 20.0).direction(SWIPE_THRESHOLD), None);
    }

    #[test]
    fn test_between_points() {
        let swipe = Swipe::between((100.0, 100.0), (100.0, 160.0));
        assert_eq!(swipe.direction(SWIPE_THRESHOLD), Some(Direction::Down));
    }
}
