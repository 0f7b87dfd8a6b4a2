//! Attribute editor for a single rack.
//!
//! A [`RackForm`] is opened from a rack, edited freely by the host UI, and
//! validated on commit. Validation either yields the full attribute set for
//! the engine to merge or names the one constraint that failed; the form is
//! never partially applied.
//!
//! Deleting goes through a two-step handshake: [`RackForm::request_delete`]
//! yields a [`DeleteRequest`] that the host must [`DeleteRequest::confirm`]
//! before the engine will accept it.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use crate::consts::{DEFAULT_RACK_COLOR, DEFAULT_RACK_COLUMNS, MAX_RACK_COLUMNS, MIN_RACK_COLUMNS};
use crate::error::ValidationError;
use crate::floor::{NumberingType, Orientation, Rack, RackMeta, RackPatch};

/// Editable copy of a rack's attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RackForm {
    pub rack_id: String,
    pub name: String,
    /// Raw column input; range-checked on validate.
    pub total_columns: i64,
    pub orientation: Orientation,
    pub numbering_type: NumberingType,
    pub category: String,
    pub color: String,
    extra: serde_json::Map<String, serde_json::Value>,
}

/// Validated rack attributes, ready to merge into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RackAttributes {
    pub rack_id: String,
    pub name: String,
    pub meta: RackMeta,
}

impl RackAttributes {
    /// Store patch carrying the name and meta; the rack's size follows.
    #[must_use]
    pub fn into_patch(self) -> RackPatch {
        RackPatch { name: Some(self.name), meta: Some(self.meta), ..Default::default() }
    }
}

impl RackForm {
    /// Open the form on `rack`, filling absent meta keys with defaults.
    #[must_use]
    pub fn for_rack(rack: &Rack) -> Self {
        let meta = rack.meta();
        Self {
            rack_id: rack.id.clone(),
            name: rack.name.clone(),
            total_columns: i64::from(meta.total_columns.unwrap_or(DEFAULT_RACK_COLUMNS)),
            orientation: meta.orientation.unwrap_or_default(),
            numbering_type: meta.numbering_type.unwrap_or_default(),
            category: meta.category.clone().unwrap_or_default(),
            color: meta.color.clone().unwrap_or_else(|| DEFAULT_RACK_COLOR.to_owned()),
            extra: meta.unmodeled(),
        }
    }

    /// Check the form and produce the attribute set to commit.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyName`] for a blank name,
    /// [`ValidationError::ColumnsOutOfRange`] for a column count outside
    /// `1..=100`.
    pub fn validate(&self) -> Result<RackAttributes, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let columns = match u32::try_from(self.total_columns) {
            Ok(c) if (MIN_RACK_COLUMNS..=MAX_RACK_COLUMNS).contains(&c) => c,
            _ => {
                return Err(ValidationError::ColumnsOutOfRange {
                    got: self.total_columns,
                    min: MIN_RACK_COLUMNS,
                    max: MAX_RACK_COLUMNS,
                });
            }
        };
        Ok(RackAttributes {
            rack_id: self.rack_id.clone(),
            name: name.to_owned(),
            meta: RackMeta {
                total_columns: Some(columns),
                orientation: Some(self.orientation),
                numbering_type: Some(self.numbering_type),
                category: Some(self.category.clone()),
                color: Some(self.color.clone()),
                extra: self.extra.clone(),
            },
        })
    }

    /// First step of deleting the rack this form is bound to.
    #[must_use]
    pub fn request_delete(&self) -> DeleteRequest {
        DeleteRequest { rack_id: self.rack_id.clone() }
    }
}

/// A pending delete awaiting the user's confirmation.
#[derive(Debug)]
#[must_use]
pub struct DeleteRequest {
    rack_id: String,
}

impl DeleteRequest {
    #[must_use]
    pub fn rack_id(&self) -> &str {
        &self.rack_id
    }

    /// The user confirmed; the result is what the engine deletes with.
    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete { rack_id: self.rack_id }
    }

    /// The user declined; nothing happens.
    pub fn cancel(self) {}
}

/// Proof that a delete was confirmed. Only [`DeleteRequest::confirm`] makes one.
#[derive(Debug)]
pub struct ConfirmedDelete {
    rack_id: String,
}

impl ConfirmedDelete {
    #[must_use]
    pub fn rack_id(&self) -> &str {
        &self.rack_id
    }
}
