//! Input model: mouse buttons and the gesture state machine.
//!
//! `InputState` is the single active gesture tracked between pointer-down and
//! pointer-up. Holding it as one tagged value makes "at most one gesture"
//! structural: a new pointer-down is only honored from `Idle`.
//!
//! Drag offsets are captured once, at pointer-down, in the editor's logical
//! space and reused unchanged for every move of the gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::{CoordinateSpace, Point};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState<Id> {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an entity.
    Dragging {
        /// Id of the entity being dragged.
        id: Id,
        /// Pointer minus entity position at gesture start, in logical units.
        offset: Point,
        /// Entity position at gesture start.
        origin: Point,
    },
    /// The user is dragging an entity's resize handle.
    Resizing {
        /// Id of the entity being resized.
        id: Id,
    },
}

impl<Id> InputState<Id> {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Id of the entity the active gesture targets.
    #[must_use]
    pub fn target(&self) -> Option<&Id> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id } => Some(id),
        }
    }
}

/// Pointer-to-entity offset captured at drag start.
#[must_use]
pub fn grab_offset(space: &impl CoordinateSpace, pointer_screen: Point, entity_pos: Point) -> Point {
    space.to_logical(pointer_screen).sub(entity_pos)
}

/// New entity position for the pointer at `pointer_screen`, snapped to the
/// space's native unit.
#[must_use]
pub fn drag_target(space: &impl CoordinateSpace, pointer_screen: Point, offset: Point) -> Point {
    space.snap(space.to_logical(pointer_screen).sub(offset))
}

/// New `(width, height)` when the resize handle is at `pointer`; each axis is
/// floored at `min_size` independently.
#[must_use]
pub fn resize_target(pointer: Point, origin: Point, min_size: f64) -> (f64, f64) {
    let d = pointer.sub(origin);
    (d.x.max(min_size), d.y.max(min_size))
}
