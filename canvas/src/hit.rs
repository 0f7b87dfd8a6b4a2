//! Hit-testing: which entity, and which part of it, lies under the pointer.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{CoordinateSpace, GridScale, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::EntityStore;
use crate::floor::Rack;
use crate::wall::{ImageId, WallImage};

/// Which part of an entity was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<Id> {
    pub id: Id,
    pub part: HitPart,
}

/// Topmost rack under a screen-space point.
#[must_use]
pub fn hit_test_racks(screen: Point, racks: &EntityStore<Rack>, scale: &GridScale) -> Option<Hit<String>> {
    let cell = scale.to_logical(screen);
    racks
        .iter()
        .rev()
        .find(|rack| rack.contains(cell))
        .map(|rack| Hit { id: rack.id.clone(), part: HitPart::Body })
}

/// Image part under a point on the wall.
///
/// The selected image is raised above the others, so its resize handle and
/// body are tested first; the rest are tested topmost-first. Rotation is not
/// taken into account.
#[must_use]
pub fn hit_test_images(p: Point, images: &EntityStore<WallImage>) -> Option<Hit<ImageId>> {
    if let Some(selected) = images.selected_entity() {
        if on_handle(p, selected) {
            return Some(Hit { id: selected.id, part: HitPart::ResizeHandle });
        }
        if selected.contains(p) {
            return Some(Hit { id: selected.id, part: HitPart::Body });
        }
    }
    images
        .iter()
        .rev()
        .find(|img| img.contains(p))
        .map(|img| Hit { id: img.id, part: HitPart::Body })
}

fn on_handle(p: Point, img: &WallImage) -> bool {
    let d = p.sub(img.handle_point());
    d.x.hypot(d.y) <= HANDLE_RADIUS_PX
}
