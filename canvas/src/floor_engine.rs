//! Floor plan editor core: area, grid scale, racks, and the drag gesture.
//!
//! Everything here is host-agnostic and synchronous. Handlers return
//! [`FloorAction`]s; the host renders, persists, or opens the attribute editor
//! in response.

#[cfg(test)]
#[path = "floor_engine_test.rs"]
mod floor_engine_test;

use time::OffsetDateTime;

use crate::camera::{GridScale, Point};
use crate::consts::{DEFAULT_RACK_COLOR, DEFAULT_RACK_COLUMNS, DEFAULT_STORE_ID};
use crate::doc::EntityStore;
use crate::editor::{ConfirmedDelete, RackAttributes, RackForm};
use crate::engine::FloorAction;
use crate::error::{EditorError, ValidationError};
use crate::floor::{FloorArea, GridSize, NumberingType, Orientation, Rack, RackMeta, RackPatch};
use crate::hit;
use crate::input::{self, Button, InputState};
use crate::layout::{self, LayoutDocument};

/// Core floor editor state. Owns no browser handles, so it is fully testable.
pub struct FloorEngine {
    pub racks: EntityStore<Rack>,
    pub input: InputState<String>,
    area: FloorArea,
    scale: Option<GridScale>,
    viewport_width: f64,
    store_id: String,
}

impl Default for FloorEngine {
    fn default() -> Self {
        Self {
            racks: EntityStore::new(),
            input: InputState::Idle,
            area: FloorArea::default(),
            scale: None,
            viewport_width: 0.0,
            store_id: DEFAULT_STORE_ID.to_owned(),
        }
    }
}

impl FloorEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    #[must_use]
    pub fn area(&self) -> FloorArea {
        self.area
    }

    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        self.area.grid_size()
    }

    /// Current cell scale; `None` until a usable viewport width is known.
    #[must_use]
    pub fn scale(&self) -> Option<GridScale> {
        self.scale
    }

    #[must_use]
    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    // --- Area and viewport ---

    /// Record the viewport width and refit the grid to it.
    pub fn set_viewport(&mut self, width: f64) -> Vec<FloorAction> {
        self.viewport_width = width;
        if self.refit() { vec![FloorAction::RenderNeeded] } else { Vec::new() }
    }

    /// Resize the floor. The scale is refit before this returns.
    ///
    /// # Errors
    ///
    /// [`ValidationError::AreaTooSmall`] if either side is under the minimum;
    /// the previous area stays in effect.
    pub fn apply_area(&mut self, length_ft: f64, width_ft: f64) -> Result<Vec<FloorAction>, ValidationError> {
        self.area = FloorArea::new(length_ft, width_ft)?;
        self.refit();
        Ok(vec![FloorAction::RenderNeeded])
    }

    fn refit(&mut self) -> bool {
        match GridScale::fit(self.area.grid_size(), self.viewport_width) {
            Some(scale) => {
                self.scale = Some(scale);
                true
            }
            None => false,
        }
    }

    // --- Racks ---

    /// Add a default rack at the origin and ask the host to edit it.
    pub fn create_rack(&mut self) -> Vec<FloorAction> {
        let name = format!("Rack {}", self.racks.len() + 1);
        let id = self.racks.add(Rack::new(String::new(), name, default_meta()));
        self.racks.select(&id);
        vec![
            FloorAction::RenderNeeded,
            FloorAction::Persist(self.racks.snapshot()),
            FloorAction::EditRequested(id),
        ]
    }

    /// Open the attribute editor on a rack.
    #[must_use]
    pub fn open_editor(&self, rack_id: &str) -> Option<RackForm> {
        self.racks.get(&rack_id.to_owned()).map(RackForm::for_rack)
    }

    /// Merge validated attributes into their rack.
    pub fn commit_attributes(&mut self, attrs: RackAttributes) -> Vec<FloorAction> {
        let id = attrs.rack_id.clone();
        if self.racks.update(&id, &attrs.into_patch()) {
            vec![FloorAction::RenderNeeded, FloorAction::Persist(self.racks.snapshot())]
        } else {
            Vec::new()
        }
    }

    /// Place a rack at a cell, kept inside the grid. Used by hosts that place
/// racks by coordinates; pointer drags are not clamped.
    pub fn move_rack(&mut self, rack_id: &str, x: i32, y: i32) -> Vec<FloorAction> {
        let id = rack_id.to_owned();
        let Some(rack) = self.racks.get(&id) else {
            return Vec::new();
        };
        let (w, h) = rack.size();
        let grid = self.area.grid_size();
        let patch = RackPatch {
            x: Some(clamp_cell(x, grid.columns, w)),
            y: Some(clamp_cell(y, grid.rows, h)),
            ..Default::default()
        };
        self.racks.update(&id, &patch);
        vec![FloorAction::RenderNeeded, FloorAction::Persist(self.racks.snapshot())]
    }

    /// Remove a rack whose deletion the user confirmed.
    pub fn delete_rack(&mut self, confirmed: &ConfirmedDelete) -> Vec<FloorAction> {
        if self.input.target().is_some_and(|id| id == confirmed.rack_id()) {
            self.input = InputState::Idle;
        }
        match self.racks.remove(&confirmed.rack_id().to_owned()) {
            Some(_) => vec![FloorAction::RenderNeeded, FloorAction::Persist(self.racks.snapshot())],
            None => Vec::new(),
        }
    }

    // --- File transport ---

    /// Snapshot the floor as a layout document stamped with `now`.
    #[must_use]
    pub fn export_layout(&self, now: OffsetDateTime) -> LayoutDocument {
        LayoutDocument::build(&self.store_id, &self.area, self.racks.iter(), now)
    }

    /// Replace the area and racks from a layout document.
    ///
    /// # Errors
    ///
    /// Any [`EditorError`] from parsing; the editor is left untouched.
    pub fn import_layout(&mut self, text: &str) -> Result<Vec<FloorAction>, EditorError> {
        let imported = layout::parse_layout(text)?;
        self.area = imported.area;
        self.refit();
        self.racks.replace_all(imported.racks);
        self.racks.clear_selection();
        self.input = InputState::Idle;
        if let Some(store_id) = imported.store_id {
            self.store_id = store_id;
        }
        Ok(vec![FloorAction::RenderNeeded])
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<FloorAction> {
        if !self.input.is_idle() || button != Button::Primary {
            return Vec::new();
        }
        let Some(scale) = self.scale else {
            return Vec::new();
        };
        let Some(hit) = hit::hit_test_racks(screen, &self.racks, &scale) else {
            return Vec::new();
        };
        let Some(rack) = self.racks.get(&hit.id) else {
            return Vec::new();
        };
        let origin = Point::new(f64::from(rack.x), f64::from(rack.y));
        let offset = input::grab_offset(&scale, screen, origin);
        self.racks.select(&hit.id);
        self.input = InputState::Dragging { id: hit.id, offset, origin };
        vec![FloorAction::RenderNeeded, FloorAction::SetCursor("grabbing")]
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<FloorAction> {
        let (InputState::Dragging { id, offset, .. }, Some(scale)) = (&self.input, self.scale) else {
            return Vec::new();
        };
        let Some(rack) = self.racks.get(id) else {
            return Vec::new();
        };
        // Unbounded: the rack follows the pointer delta even past the grid edge.
        let target = input::drag_target(&scale, screen, *offset);
        let (x, y) = (target.x as i32, target.y as i32);
        if (x, y) == (rack.x, rack.y) {
            return Vec::new();
        }
        let id = id.clone();
        self.racks.update(&id, &RackPatch { x: Some(x), y: Some(y), ..Default::default() });
        vec![FloorAction::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, _screen: Point, button: Button) -> Vec<FloorAction> {
        if button != Button::Primary {
            return Vec::new();
        }
        let InputState::Dragging { id, origin, .. } = std::mem::replace(&mut self.input, InputState::Idle) else {
            return Vec::new();
        };
        let mut actions = vec![FloorAction::Persist(self.racks.snapshot()), FloorAction::SetCursor("grab")];
        let unmoved = self
            .racks
            .get(&id)
            .is_some_and(|rack| Point::new(f64::from(rack.x), f64::from(rack.y)) == origin);
        if unmoved {
            actions.push(FloorAction::EditRequested(id));
        }
        actions
    }
}

/// Keep a rack of extent `size` inside `0..limit` cells.
fn clamp_cell(value: i32, limit: u32, size: i32) -> i32 {
    let max = i32::try_from(limit).unwrap_or(i32::MAX).saturating_sub(size).max(0);
    value.clamp(0, max)
}

fn default_meta() -> RackMeta {
    RackMeta {
        total_columns: Some(DEFAULT_RACK_COLUMNS),
        orientation: Some(Orientation::Horizontal),
        numbering_type: Some(NumberingType::Odd),
        category: Some(String::new()),
        color: Some(DEFAULT_RACK_COLOR.to_owned()),
        ..Default::default()
    }
}
