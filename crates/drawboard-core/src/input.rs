//! Pointer, touch and wheel events.
//!
//! Positions are in screen coordinates relative to the drawing surface.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, modifiers: Modifiers },
    Move { position: Point },
    Up { position: Point },
    /// Pointer left the surface; treated as a release.
    Leave { position: Point },
    /// Wheel scroll; negative `delta_y` scrolls up.
    Wheel { position: Point, delta_y: f64 },
}

/// A single active touch point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub id: u64,
    pub position: Point,
}

/// Touch event carrying every active touch.
///
/// Only the first touch drives the board; multi-touch gestures are not
/// interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    Start(Vec<Touch>),
    Move(Vec<Touch>),
    /// Touches that ended. May be empty.
    End(Vec<Touch>),
}

impl TouchEvent {
    /// Map to the equivalent pointer event using the first touch.
    ///
    /// `last_position` is used when a touch end carries no points.
    pub fn to_pointer_event(&self, last_position: Point) -> Option<PointerEvent> {
        match self {
            TouchEvent::Start(touches) => touches.first().map(|t| PointerEvent::Down {
                position: t.position,
                modifiers: Modifiers::NONE,
            }),
            TouchEvent::Move(touches) => touches
                .first()
                .map(|t| PointerEvent::Move { position: t.position }),
            TouchEvent::End(touches) => Some(PointerEvent::Up {
                position: touches.first().map_or(last_position, |t| t.position),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u64, x: f64, y: f64) -> Touch {
        Touch {
            id,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_first_touch_only() {
        let event = TouchEvent::Start(vec![touch(1, 10.0, 20.0), touch(2, 99.0, 99.0)]);
        assert_eq!(
            event.to_pointer_event(Point::ZERO),
            Some(PointerEvent::Down {
                position: Point::new(10.0, 20.0),
                modifiers: Modifiers::NONE,
            })
        );
    }

    #[test]
    fn test_empty_touch_start_ignored() {
        assert_eq!(TouchEvent::Start(Vec::new()).to_pointer_event(Point::ZERO), None);
        assert_eq!(TouchEvent::Move(Vec::new()).to_pointer_event(Point::ZERO), None);
    }

    #[test]
    fn test_touch_end_uses_last_position() {
        let last = Point::new(4.0, 5.0);
        assert_eq!(
            TouchEvent::End(Vec::new()).to_pointer_event(last),
            Some(PointerEvent::Up { position: last })
        );
    }
}
