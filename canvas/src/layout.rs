//! Layout documents: the floor editor's file format.
//!
//! Export writes the whole floor (area + racks) with a small envelope. Import
//! is lenient per rack, the way hand-edited layout files need it to be: only
//! `floor_area` and `racks` are required, every rack field has a default, and
//! duplicate or missing rack ids are replaced with fresh ones.
//!
//! ```json
//! {
//!   "store_id": "STORE001",
//!   "floor_area": { "length_ft": 75, "width_ft": 60, "feet_per_cell": 3 },
//!   "racks": [ { "rack_id": "rack-1a2b3c4d", "name": "Rack 1",
//!                "x": 0, "y": 0, "w": 10, "h": 1, "meta": { ... } } ],
//!   "last_updated": "2026-01-01T00:00:00Z"
//! }
//! ```

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::consts::{DEFAULT_LENGTH_FT, DEFAULT_WIDTH_FT, FEET_PER_CELL, IMPORT_DEFAULT_H, IMPORT_DEFAULT_W};
use crate::doc::Entity;
use crate::error::{EditorError, ValidationError};
use crate::floor::{FloorArea, Rack, RackMeta};

/// A complete exported layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutDocument {
    pub store_id: String,
    pub floor_area: FloorAreaRecord,
    pub racks: Vec<RackRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloorAreaRecord {
    pub length_ft: f64,
    pub width_ft: f64,
    pub feet_per_cell: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RackRecord {
    pub rack_id: String,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub meta: RackMeta,
}

impl LayoutDocument {
    /// Snapshot an area and its racks into an exportable document.
    pub fn build<'a>(
        store_id: &str,
        area: &FloorArea,
        racks: impl IntoIterator<Item = &'a Rack>,
        last_updated: OffsetDateTime,
    ) -> Self {
        let racks = racks
            .into_iter()
            .map(|rack| {
                let (w, h) = rack.size();
                RackRecord {
                    rack_id: rack.id.clone(),
                    name: rack.name.clone(),
                    x: rack.x,
                    y: rack.y,
                    w,
                    h,
                    meta: rack.meta().clone(),
                }
            })
            .collect();
        Self {
            store_id: store_id.to_owned(),
            floor_area: FloorAreaRecord {
                length_ft: area.length_ft(),
                width_ft: area.width_ft(),
                feet_per_cell: FEET_PER_CELL,
            },
            racks,
            last_updated,
        }
    }

    /// Pretty-printed JSON, as written to `store-layout.json`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Parse`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of a successful import, ready to replace the editor's state.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedLayout {
    pub store_id: Option<String>,
    pub area: FloorArea,
    pub racks: Vec<Rack>,
    /// Envelope timestamp as written in the file, if any.
    pub last_updated: Option<String>,
}

/// Parse a layout document.
///
/// # Errors
///
/// - [`EditorError::Parse`] for malformed JSON, a non-array `racks`, a
///   non-object rack, or a rack `meta` that is not an object.
/// - [`EditorError::Validation`] when `floor_area` or `racks` is missing or
///   the area is below the minimum.
pub fn parse_layout(text: &str) -> Result<ImportedLayout, EditorError> {
    let value: Value = serde_json::from_str(text)?;
    let floor_area = present(&value, "floor_area").ok_or(ValidationError::MissingKey("floor_area"))?;
    let racks_value = present(&value, "racks").ok_or(ValidationError::MissingKey("racks"))?;

    let length_ft = floor_area.get("length_ft").and_then(Value::as_f64).unwrap_or(DEFAULT_LENGTH_FT);
    let width_ft = floor_area.get("width_ft").and_then(Value::as_f64).unwrap_or(DEFAULT_WIDTH_FT);
    let area = FloorArea::new(length_ft, width_ft)?;

    let raw_racks: Vec<serde_json::Map<String, Value>> = serde_json::from_value(racks_value.clone())?;
    let mut racks: Vec<Rack> = Vec::with_capacity(raw_racks.len());
    for raw in &raw_racks {
        let mut rack = parse_rack(raw)?;
        let id = rack.unique_id(&|candidate| racks.iter().any(|r| &r.id == candidate));
        if rack.name.is_empty() {
            rack.name.clone_from(&id);
        }
        rack.set_id(id);
        racks.push(rack);
    }

    Ok(ImportedLayout {
        store_id: value.get("store_id").and_then(Value::as_str).map(str::to_owned),
        area,
        racks,
        last_updated: value.get("last_updated").and_then(Value::as_str).map(str::to_owned),
    })
}

/// A top-level key that is present and not `null`.
fn present<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn parse_rack(map: &serde_json::Map<String, Value>) -> Result<Rack, EditorError> {
    let id = map.get("rack_id").and_then(Value::as_str).unwrap_or_default();
    let name = map.get("name").and_then(Value::as_str).unwrap_or_default();
    let int = |key: &str, default: i32| map.get(key).and_then(as_cell).unwrap_or(default);
    let meta = match map.get("meta") {
        None | Some(Value::Null) => RackMeta::default(),
        Some(raw) => parse_meta(&serde_json::from_value(raw.clone())?),
    };
    Ok(Rack::restore(
        id,
        name,
        int("x", 0),
        int("y", 0),
        (int("w", IMPORT_DEFAULT_W), int("h", IMPORT_DEFAULT_H)),
        meta,
    ))
}

/// Decode `meta` key by key, as leniently as the rack's cell fields. A value
/// that does not fit its field (`"orientation": "diagonal"`) is kept verbatim
/// in `extra` so it still round-trips; `null` counts as absent.
fn parse_meta(raw: &serde_json::Map<String, Value>) -> RackMeta {
    let mut meta = RackMeta::default();
    for (key, value) in raw {
        if value.is_null() {
            continue;
        }
        let fitted = match key.as_str() {
            "total_columns" => as_columns(value).map(|c| meta.total_columns = Some(c)).is_some(),
            "orientation" => decode(value).map(|o| meta.orientation = Some(o)).is_some(),
            "numbering_type" => decode(value).map(|n| meta.numbering_type = Some(n)).is_some(),
            "category" => value.as_str().map(|c| meta.category = Some(c.to_owned())).is_some(),
            "color" => value.as_str().map(|c| meta.color = Some(c.to_owned())).is_some(),
            _ => false,
        };
        if !fitted {
            meta.extra.insert(key.clone(), value.clone());
        }
    }
    meta
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(_) => None,
    }
}

/// Column count, accepting whole-valued floats such as `10.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_columns(value: &Value) -> Option<u32> {
    let wide = match value.as_u64() {
        Some(n) => n,
        None => {
            let whole = value.as_f64().filter(|f| f.fract().abs() < f64::EPSILON)?;
            if !(0.0..=f64::from(u32::MAX)).contains(&whole) {
                return None;
            }
            whole as u64
        }
    };
    match u32::try_from(wide) {
        Ok(columns) => Some(columns),
        Err(_) => None,
    }
}

/// Integer cell value, accepting whole-valued floats such as `4.0`.
#[allow(clippy::cast_possible_truncation)]
fn as_cell(value: &Value) -> Option<i32> {
    let wide = value.as_i64().or_else(|| value.as_f64().map(|f| f.round() as i64))?;
    match i32::try_from(wide) {
        Ok(cell) => Some(cell),
        Err(_) => None,
    }
}
