//! Floor-plan entities: the store area, its grid, and racks.
//!
//! A rack's footprint is never edited directly. It is derived from the
//! rack's orientation and column count every time the meta changes, and only
//! falls back to a recorded size for imported racks whose meta carries no
//! orientation or column count.

#[cfg(test)]
#[path = "floor_test.rs"]
mod floor_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{
    DEFAULT_LENGTH_FT, DEFAULT_WIDTH_FT, FEET_PER_CELL, IMPORT_DEFAULT_H, IMPORT_DEFAULT_W, MIN_AREA_FT,
    RACK_DEPTH_CELLS,
};
use crate::doc::Entity;
use crate::error::ValidationError;

/// Grid dimensions in cells. `columns` runs along the store length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

/// Physical store footprint in feet. Both sides are at least [`MIN_AREA_FT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorArea {
    length_ft: f64,
    width_ft: f64,
}

impl FloorArea {
    /// Validate and build an area.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AreaTooSmall`] if either side is below the
    /// minimum or not a finite number.
    pub fn new(length_ft: f64, width_ft: f64) -> Result<Self, ValidationError> {
        let ok = |ft: f64| ft.is_finite() && ft >= MIN_AREA_FT;
        if !ok(length_ft) || !ok(width_ft) {
            return Err(ValidationError::AreaTooSmall { length_ft, width_ft, min: MIN_AREA_FT });
        }
        Ok(Self { length_ft, width_ft })
    }

    #[must_use]
    pub fn length_ft(&self) -> f64 {
        self.length_ft
    }

    #[must_use]
    pub fn width_ft(&self) -> f64 {
        self.width_ft
    }

    /// `ceil(length / 3) x ceil(width / 3)` cells.
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        GridSize { columns: cells(self.length_ft), rows: cells(self.width_ft) }
    }
}

impl Default for FloorArea {
    fn default() -> Self {
        Self { length_ft: DEFAULT_LENGTH_FT, width_ft: DEFAULT_WIDTH_FT }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells(feet: f64) -> u32 {
    (feet / FEET_PER_CELL).ceil() as u32
}

/// Which way a rack's columns run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Column numbering scheme printed on a rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingType {
    #[default]
    Odd,
    Even,
}

/// Footprint in cells for a rack with the given orientation and columns.
///
/// Horizontal racks are `columns x 1`, vertical racks `1 x columns`.
#[must_use]
pub fn rack_size(orientation: Orientation, total_columns: u32) -> (i32, i32) {
    let long = i32::try_from(total_columns).unwrap_or(i32::MAX);
    match orientation {
        Orientation::Horizontal => (long, RACK_DEPTH_CELLS),
        Orientation::Vertical => (RACK_DEPTH_CELLS, long),
    }
}

/// Rack attributes edited through the attribute editor.
///
/// Every key is optional so a document carrying `"meta": {}` round-trips as
/// written; keys this editor does not know are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RackMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering_type: Option<NumberingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RackMeta {
    /// Keys with a typed field; anything else lives in `extra`.
    pub const FIELDS: [&'static str; 5] = ["total_columns", "orientation", "numbering_type", "category", "color"];

    /// `extra` without entries that shadow a typed field. Import parks
    /// unreadable typed values there; an edit replaces them.
    #[must_use]
    pub fn unmodeled(&self) -> serde_json::Map<String, serde_json::Value> {
        self.extra
            .iter()
            .filter(|(key, _)| !Self::FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Derived footprint, when both orientation and column count are known.
    #[must_use]
    pub fn footprint(&self) -> Option<(i32, i32)> {
        Some(rack_size(self.orientation?, self.total_columns?))
    }
}

/// A rack placed on the floor grid. Position and size are in cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Rack {
    pub id: String,
    pub name: String,
    pub x: i32,
    pub y: i32,
    w: i32,
    h: i32,
    meta: RackMeta,
}

impl Rack {
    /// A rack at the origin with a size derived from `meta`.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, meta: RackMeta) -> Self {
        Self::restore(id, name, 0, 0, (IMPORT_DEFAULT_W, IMPORT_DEFAULT_H), meta)
    }

    /// Rebuild a rack from stored fields. `recorded` is only used when the
    /// meta cannot derive a footprint.
    #[must_use]
    pub fn restore(
        id: impl Into<String>,
        name: impl Into<String>,
        x: i32,
        y: i32,
        recorded: (i32, i32),
        meta: RackMeta,
    ) -> Self {
        let (w, h) = meta.footprint().unwrap_or(recorded);
        Self { id: id.into(), name: name.into(), x, y, w, h, meta }
    }

    /// `(width, height)` in cells.
    #[must_use]
    pub fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    #[must_use]
    pub fn meta(&self) -> &RackMeta {
        &self.meta
    }

    /// Replace the meta and recompute the footprint from it.
    pub fn set_meta(&mut self, meta: RackMeta) {
        if let Some((w, h)) = meta.footprint() {
            self.w = w;
            self.h = h;
        }
        self.meta = meta;
    }

    /// Whether a cell-space point lies inside this rack.
    #[must_use]
    pub fn contains(&self, cell: Point) -> bool {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        cell.x >= x && cell.x < x + f64::from(self.w) && cell.y >= y && cell.y < y + f64::from(self.h)
    }
}

/// Sparse rack update. Size follows `meta`; see [`Rack::set_meta`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RackPatch {
    pub name: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub meta: Option<RackMeta>,
}

impl Entity for Rack {
    type Id = String;
    type Patch = RackPatch;

    fn id(&self) -> &String {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn unique_id(&self, taken: &dyn Fn(&String) -> bool) -> String {
        if !self.id.is_empty() && !taken(&self.id) {
            return self.id.clone();
        }
        loop {
            let candidate = new_rack_id();
            if !taken(&candidate) {
                return candidate;
            }
        }
    }

    fn apply(&mut self, patch: &RackPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(meta) = &patch.meta {
            self.set_meta(meta.clone());
        }
    }
}

/// Fresh rack id: `rack-` followed by eight hex characters.
#[must_use]
pub fn new_rack_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("rack-{}", &hex[..8])
}
