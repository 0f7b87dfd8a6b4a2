//! Image wall editor core.
//!
//! Holds the image collection, the edit gate, and the drag/resize gesture.
//! Every mutation is refused unless the gate is open; every committed
//! mutation returns exactly one [`WallAction::Persist`] with the full
//! collection.

#[cfg(test)]
#[path = "wall_engine_test.rs"]
mod wall_engine_test;

use crate::camera::{FreeSpace, Point};
use crate::consts::{MIN_IMAGE_SIZE, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::doc::{Entity, EntityStore};
use crate::engine::WallAction;
use crate::hit::{self, HitPart};
use crate::input::{self, Button, InputState};
use crate::wall::{EditGate, GateError, ImageId, ImagePatch, Shape, WallImage, WallMode};

pub struct WallEngine {
    pub images: EntityStore<WallImage>,
    pub input: InputState<ImageId>,
    gate: EditGate,
}

/// Direction of a scale step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zoom {
    In,
    Out,
}

impl Zoom {
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::In => ZOOM_IN_FACTOR,
            Self::Out => ZOOM_OUT_FACTOR,
        }
    }
}

impl WallEngine {
    #[must_use]
    pub fn new(mode: WallMode) -> Self {
        Self { images: EntityStore::new(), input: InputState::Idle, gate: EditGate::new(mode) }
    }

    // --- Gate ---

    #[must_use]
    pub fn gate(&self) -> &EditGate {
        &self.gate
    }

    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.gate.can_edit()
    }

    /// Try the shared secret.
    ///
    /// # Errors
    ///
    /// See [`EditGate::unlock`].
    pub fn unlock(&mut self, attempt: &str, key: &str) -> Result<Vec<WallAction>, GateError> {
        self.gate.unlock(attempt, key)?;
        Ok(vec![WallAction::RenderNeeded])
    }

    // --- Data inputs ---

    /// Hydrate from the endpoint. Colliding ids are bumped, not dropped.
    pub fn load(&mut self, images: Vec<WallImage>) -> Vec<WallAction> {
        let mut unique: Vec<WallImage> = Vec::with_capacity(images.len());
        for mut image in images {
            let id = image.unique_id(&|candidate| unique.iter().any(|i| i.id == *candidate));
            image.set_id(id);
            unique.push(image);
        }
        self.images.replace_all(unique);
        self.input = InputState::Idle;
        vec![WallAction::RenderNeeded]
    }

    // --- Commands ---

    /// Append an uploaded image at `at`. `now_ms` proposes its id.
    pub fn upload(&mut self, src: impl Into<String>, at: Point, now_ms: f64) -> Vec<WallAction> {
        if !self.can_edit() {
            return Vec::new();
        }
        self.images.add(WallImage::upload(ImageId(now_ms), src, at));
        self.committed()
    }

    /// Rotate by one step clockwise.
    pub fn rotate(&mut self, id: ImageId) -> Vec<WallAction> {
        let Some(rotation) = self.editable(id).map(WallImage::next_rotation) else {
            return Vec::new();
        };
        self.images.update(&id, &ImagePatch { rotation: Some(rotation), ..Default::default() });
        self.committed()
    }

    /// Scale both axes by `factor`; each axis is floored at the minimum size.
    pub fn scale(&mut self, id: ImageId, factor: f64) -> Vec<WallAction> {
        if !factor.is_finite() || factor <= 0.0 {
            return Vec::new();
        }
        let Some(image) = self.editable(id) else {
            return Vec::new();
        };
        let patch = ImagePatch {
            width: Some(image.width * factor),
            height: Some(image.height * factor),
            ..Default::default()
        };
        self.images.update(&id, &patch);
        self.committed()
    }

    pub fn zoom(&mut self, id: ImageId, zoom: Zoom) -> Vec<WallAction> {
        self.scale(id, zoom.factor())
    }

    pub fn set_shape(&mut self, id: ImageId, shape: Shape) -> Vec<WallAction> {
        if self.editable(id).is_none() {
            return Vec::new();
        }
        self.images.update(&id, &ImagePatch { shape: Some(shape), ..Default::default() });
        self.committed()
    }

    /// Remove an image. The selection is cleared whichever image it was on.
    pub fn delete(&mut self, id: ImageId) -> Vec<WallAction> {
        if self.editable(id).is_none() {
            return Vec::new();
        }
        self.images.remove(&id);
        self.images.clear_selection();
        if self.input.target() == Some(&id) {
            self.input = InputState::Idle;
        }
        self.committed()
    }

    fn editable(&self, id: ImageId) -> Option<&WallImage> {
        if self.can_edit() { self.images.get(&id) } else { None }
    }

    fn committed(&self) -> Vec<WallAction> {
        vec![WallAction::RenderNeeded, WallAction::Persist(self.images.snapshot())]
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, p: Point, button: Button) -> Vec<WallAction> {
        if !self.can_edit() || !self.input.is_idle() || button != Button::Primary {
            return Vec::new();
        }
        let Some(hit) = hit::hit_test_images(p, &self.images) else {
            if self.images.selected().is_none() {
                return Vec::new();
            }
            self.images.clear_selection();
            return vec![WallAction::RenderNeeded];
        };
        self.images.select(&hit.id);
        match hit.part {
            HitPart::ResizeHandle => {
                self.input = InputState::Resizing { id: hit.id };
                vec![WallAction::RenderNeeded, WallAction::SetCursor("nwse-resize")]
            }
            HitPart::Body => {
                let Some(image) = self.images.get(&hit.id) else {
                    return Vec::new();
                };
                let origin = image.position();
                let offset = input::grab_offset(&FreeSpace, p, origin);
                self.input = InputState::Dragging { id: hit.id, offset, origin };
                vec![WallAction::RenderNeeded, WallAction::SetCursor("grabbing")]
            }
        }
    }

    pub fn on_pointer_move(&mut self, p: Point) -> Vec<WallAction> {
        let patch = match &self.input {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { offset, .. } => {
                let to = input::drag_target(&FreeSpace, p, *offset);
                ImagePatch { x: Some(to.x), y: Some(to.y), ..Default::default() }
            }
            InputState::Resizing { id } => {
                let Some(image) = self.images.get(id) else {
                    return Vec::new();
                };
                let (width, height) = input::resize_target(p, image.position(), MIN_IMAGE_SIZE);
                ImagePatch { width: Some(width), height: Some(height), ..Default::default() }
            }
        };
        let Some(&id) = self.input.target() else {
            return Vec::new();
        };
        if self.images.update(&id, &patch) { vec![WallAction::RenderNeeded] } else { Vec::new() }
    }

    pub fn on_pointer_up(&mut self, _p: Point, button: Button) -> Vec<WallAction> {
        if button != Button::Primary || self.input.is_idle() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![WallAction::Persist(self.images.snapshot()), WallAction::SetCursor("default")]
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ImageId> {
        self.images.selected().copied()
    }
}
