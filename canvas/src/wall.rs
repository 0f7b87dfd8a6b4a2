//! Image wall entities, clip shapes, and the edit-mode gate.
//!
//! Wall images live in free pixel space. Their id is a JSON number proposed
//! from the host clock and bumped until it is unique in the store.
//!
//! The edit gate is a UI gate only: it hides mutation controls until the
//! shared key has been entered. The images endpoint itself accepts writes
//! from anyone.

#[cfg(test)]
#[path = "wall_test.rs"]
mod wall_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::camera::Point;
use crate::consts::{
    DEFAULT_IMAGE_SIZE, EDIT_PATH_SEGMENT, MIN_IMAGE_SIZE, ROTATE_STEP_DEG, ROUNDED_CORNER_PX, SCATTER_ORIGIN,
    SCATTER_SPAN_X, SCATTER_SPAN_Y,
};
use crate::doc::Entity;

/// Wall image identifier. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub f64);

/// Clip shape applied to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rectangle,
    Rounded,
    Circle,
    Hexagon,
    Triangle,
    Star,
}

const HEXAGON: [(f64, f64); 6] = [(0.5, 0.0), (1.0, 0.25), (1.0, 0.75), (0.5, 1.0), (0.0, 0.75), (0.0, 0.25)];

const TRIANGLE: [(f64, f64); 3] = [(0.5, 0.0), (0.0, 1.0), (1.0, 1.0)];

const STAR: [(f64, f64); 10] = [
    (0.50, 0.00),
    (0.61, 0.35),
    (0.98, 0.35),
    (0.68, 0.57),
    (0.79, 0.91),
    (0.50, 0.70),
    (0.21, 0.91),
    (0.32, 0.57),
    (0.02, 0.35),
    (0.39, 0.35),
];

impl Shape {
    pub const ALL: [Shape; 6] =
        [Self::Rectangle, Self::Rounded, Self::Circle, Self::Hexagon, Self::Triangle, Self::Star];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Rounded => "rounded",
            Self::Circle => "circle",
            Self::Hexagon => "hexagon",
            Self::Triangle => "triangle",
            Self::Star => "star",
        }
    }

    /// Parse a lowercase shape name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// CSS `clip-path` value for DOM hosts.
    #[must_use]
    pub fn clip_path(self) -> &'static str {
        match self {
            Self::Rectangle => "none",
            Self::Rounded => "inset(0 round 20px)",
            Self::Circle => "circle(50%)",
            Self::Hexagon => "polygon(50% 0%, 100% 25%, 100% 75%, 50% 100%, 0% 75%, 0% 25%)",
            Self::Triangle => "polygon(50% 0%, 0% 100%, 100% 100%)",
            Self::Star => {
                "polygon(50% 0%, 61% 35%, 98% 35%, 68% 57%, 79% 91%, 50% 70%, 21% 91%, 32% 57%, 2% 35%, 39% 35%)"
            }
        }
    }

    /// Polygon vertices normalized to the unit box, for polygonal shapes.
    #[must_use]
    pub fn polygon(self) -> Option<&'static [(f64, f64)]> {
        match self {
            Self::Hexagon => Some(&HEXAGON),
            Self::Triangle => Some(&TRIANGLE),
            Self::Star => Some(&STAR),
            Self::Rectangle | Self::Rounded | Self::Circle => None,
        }
    }

    /// Corner radius in pixels (non-zero only for `rounded`).
    #[must_use]
    pub fn corner_radius(self) -> f64 {
        if self == Self::Rounded { ROUNDED_CORNER_PX } else { 0.0 }
    }
}

/// An uploaded image placed on the wall. Geometry is in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallImage {
    pub id: ImageId,
    /// Image payload as a `data:` URI.
    pub src: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in whole degrees, `0..360`.
    #[serde(default, deserialize_with = "de_degrees")]
    pub rotation: i32,
    #[serde(default)]
    pub shape: Shape,
    /// Keys this version does not model, kept so a save round-trips them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WallImage {
    /// A fresh upload: 200x200, unrotated, rectangular.
    #[must_use]
    pub fn upload(id: ImageId, src: impl Into<String>, at: Point) -> Self {
        Self {
            id,
            src: src.into(),
            x: at.x,
            y: at.y,
            width: DEFAULT_IMAGE_SIZE,
            height: DEFAULT_IMAGE_SIZE,
            rotation: 0,
            shape: Shape::Rectangle,
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom-right corner, where the resize handle sits.
    #[must_use]
    pub fn handle_point(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Whether `p` lies inside the unrotated bounding box.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Rotation after one more rotate step.
    #[must_use]
    pub fn next_rotation(&self) -> i32 {
        normalize_degrees(self.rotation + ROTATE_STEP_DEG)
    }
}

/// Sparse wall image update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<i32>,
    pub shape: Option<Shape>,
}

impl Entity for WallImage {
    type Id = ImageId;
    type Patch = ImagePatch;

    fn id(&self) -> &ImageId {
        &self.id
    }

    fn set_id(&mut self, id: ImageId) {
        self.id = id;
    }

    fn unique_id(&self, taken: &dyn Fn(&ImageId) -> bool) -> ImageId {
        let mut candidate = if self.id.0.is_finite() { self.id } else { ImageId(0.0) };
        while taken(&candidate) {
            let next = candidate.0.floor() + 1.0;
            // Past 2^53 adding one no longer changes the value.
            let up = candidate.0.next_up();
            candidate = if next > candidate.0 {
                ImageId(next)
            } else if up.is_finite() {
                ImageId(up)
            } else {
                ImageId(0.0)
            };
        }
        candidate
    }

    fn apply(&mut self, patch: &ImagePatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = w.max(MIN_IMAGE_SIZE);
        }
        if let Some(h) = patch.height {
            self.height = h.max(MIN_IMAGE_SIZE);
        }
        if let Some(r) = patch.rotation {
            self.rotation = normalize_degrees(r);
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
        }
    }
}

/// Wrap degrees into `0..360`.
#[must_use]
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

#[allow(clippy::cast_possible_truncation)]
fn de_degrees<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Ok(0);
    }
    Ok(normalize_degrees((raw.round() % 360.0) as i32))
}

/// Upload placement from two uniform samples in `[0, 1)`.
#[must_use]
pub fn scatter_position(u: f64, v: f64) -> Point {
    Point::new(SCATTER_ORIGIN + u * SCATTER_SPAN_X, SCATTER_ORIGIN + v * SCATTER_SPAN_Y)
}

// =============================================================================
// EDIT GATE
// =============================================================================

/// Whether the wall was opened for viewing or editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallMode {
    View,
    Edit,
}

impl WallMode {
    /// Any route containing `/edit` opens the editor; everything else views.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains(EDIT_PATH_SEGMENT) { Self::Edit } else { Self::View }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("incorrect password")]
    IncorrectKey,
    #[error("wall is open in view mode")]
    ViewOnly,
}

/// Client-side gate in front of the wall's mutation controls.
#[derive(Debug, Clone)]
pub struct EditGate {
    mode: WallMode,
    unlocked: bool,
}

impl EditGate {
    #[must_use]
    pub fn new(mode: WallMode) -> Self {
        Self { mode, unlocked: false }
    }

    #[must_use]
    pub fn mode(&self) -> WallMode {
        self.mode
    }

    /// Edit mode still waiting for the key (host shows the prompt).
    #[must_use]
    pub fn needs_key(&self) -> bool {
        self.mode == WallMode::Edit && !self.unlocked
    }

    /// Compare `attempt` against the shared `key`.
    ///
    /// # Errors
    ///
    /// [`GateError::ViewOnly`] in view mode, [`GateError::IncorrectKey`] on
    /// a mismatch. The gate stays locked on error.
    pub fn unlock(&mut self, attempt: &str, key: &str) -> Result<(), GateError> {
        if self.mode == WallMode::View {
            return Err(GateError::ViewOnly);
        }
        if attempt != key {
            return Err(GateError::IncorrectKey);
        }
        self.unlocked = true;
        Ok(())
    }

    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.mode == WallMode::Edit && self.unlocked
    }
}
