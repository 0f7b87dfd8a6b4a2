#![allow(clippy::float_cmp)]

use time::macros::datetime;

use super::*;
use crate::engine::Action;

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Default 75x60 ft floor (25x20 cells) fitted to 1000px: 40px per cell.
fn engine() -> FloorEngine {
    let mut engine = FloorEngine::new();
    engine.set_viewport(1000.0);
    engine
}

fn engine_with_rack() -> (FloorEngine, String) {
    let mut engine = engine();
    engine.create_rack();
    let id = engine.racks.iter().next().map(|r| r.id.clone()).unwrap();
    (engine, id)
}

fn persist_count(actions: &[FloorAction]) -> usize {
    actions.iter().filter(|a| matches!(a, Action::Persist(_))).count()
}

fn edit_requested(actions: &[FloorAction]) -> Option<&String> {
    actions.iter().find_map(|a| match a {
        Action::EditRequested(id) => Some(id),
        _ => None,
    })
}

fn rack_pos(engine: &FloorEngine, id: &str) -> (i32, i32) {
    let rack = engine.racks.get(&id.to_owned()).unwrap();
    (rack.x, rack.y)
}

// =============================================================
// Viewport and area
// =============================================================

#[test]
fn no_scale_until_viewport_known() {
    let mut engine = FloorEngine::new();
    assert!(engine.scale().is_none());
    assert!(engine.set_viewport(0.0).is_empty());
    assert!(engine.scale().is_none());
}

#[test]
fn viewport_fits_grid_width() {
    let engine = engine();
    let scale = engine.scale().unwrap();
    assert_eq!(scale.cell_px, 40.0);
    assert_eq!(scale.canvas_width(), 1000.0);
    assert_eq!(scale.canvas_height(), 800.0);
}

#[test]
fn bad_viewport_keeps_previous_scale() {
    let mut engine = engine();
    assert!(engine.set_viewport(f64::NAN).is_empty());
    assert!(engine.set_viewport(-5.0).is_empty());
    assert_eq!(engine.scale().unwrap().cell_px, 40.0);
}

#[test]
fn apply_area_refits_before_returning() {
    let mut engine = engine();
    let actions = engine.apply_area(30.0, 30.0).unwrap();
    assert!(crate::engine::needs_render(&actions));
    assert_eq!(engine.grid_size(), GridSize { columns: 10, rows: 10 });
    assert_eq!(engine.scale().unwrap().cell_px, 100.0);
}

#[test]
fn apply_area_rejects_small_and_keeps_prior() {
    let mut engine = engine();
    let err = engine.apply_area(14.9, 60.0).unwrap_err();
    assert!(matches!(err, ValidationError::AreaTooSmall { .. }));
    assert_eq!(engine.area(), FloorArea::default());
    assert_eq!(engine.scale().unwrap().cell_px, 40.0);
}

#[test]
fn apply_area_rounds_grid_up() {
    let mut engine = engine();
    engine.apply_area(16.0, 20.0).unwrap();
    assert_eq!(engine.grid_size(), GridSize { columns: 6, rows: 7 });
}

// =============================================================
// Rack lifecycle
// =============================================================

#[test]
fn create_rack_defaults() {
    let mut engine = engine();
    let actions = engine.create_rack();
    let rack = engine.racks.iter().next().unwrap();
    assert!(rack.id.starts_with("rack-"));
    assert_eq!(rack.id.len(), "rack-".len() + 8);
    assert_eq!(rack.name, "Rack 1");
    assert_eq!((rack.x, rack.y), (0, 0));
    assert_eq!(rack.size(), (10, 1));
    assert_eq!(rack.meta().color.as_deref(), Some("#FEE2E2"));
    assert_eq!(edit_requested(&actions), Some(&rack.id));
    assert_eq!(persist_count(&actions), 1);
    assert_eq!(engine.racks.selected(), Some(&rack.id));
}

#[test]
fn create_rack_numbers_by_count() {
    let mut engine = engine();
    engine.create_rack();
    engine.create_rack();
    let names: Vec<&str> = engine.racks.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Rack 1", "Rack 2"]);
}

#[test]
fn commit_attributes_recomputes_size() {
    let (mut engine, id) = engine_with_rack();
    let mut form = engine.open_editor(&id).unwrap();
    form.orientation = Orientation::Vertical;
    form.total_columns = 4;
    form.name = "Produce".into();
    let actions = engine.commit_attributes(form.validate().unwrap());
    assert_eq!(persist_count(&actions), 1);
    let rack = engine.racks.get(&id).unwrap();
    assert_eq!(rack.name, "Produce");
    assert_eq!(rack.size(), (1, 4));
}

#[test]
fn commit_attributes_for_missing_rack_is_noop() {
    let (mut engine, id) = engine_with_rack();
    let mut attrs = engine.open_editor(&id).unwrap().validate().unwrap();
    attrs.rack_id = "rack-gone".into();
    let before = engine.racks.snapshot();
    assert!(engine.commit_attributes(attrs).is_empty());
    assert_eq!(*engine.racks.snapshot(), *before);
}

#[test]
fn delete_requires_confirmation_token() {
    let (mut engine, id) = engine_with_rack();
    let form = engine.open_editor(&id).unwrap();

    form.request_delete().cancel();
    assert_eq!(engine.racks.len(), 1);

    let confirmed = form.request_delete().confirm();
    let actions = engine.delete_rack(&confirmed);
    assert_eq!(persist_count(&actions), 1);
    assert!(engine.racks.is_empty());
    assert!(engine.racks.selected().is_none());
}

#[test]
fn move_rack_places_and_clamps() {
    let (mut engine, id) = engine_with_rack();
    let actions = engine.move_rack(&id, 4, 7);
    assert_eq!(persist_count(&actions), 1);
    assert_eq!(rack_pos(&engine, &id), (4, 7));
    engine.move_rack(&id, 40, -3);
    assert_eq!(rack_pos(&engine, &id), (15, 0));
    assert!(engine.move_rack("rack-nope", 1, 1).is_empty());
}

#[test]
fn open_editor_on_unknown_rack() {
    assert!(engine().open_editor("rack-nope").is_none());
}

// =============================================================
// Drag gesture
// =============================================================

#[test]
fn drag_moves_by_pointer_delta_in_cells() {
    let (mut engine, id) = engine_with_rack();
    let p0 = pt(60.0, 20.0);
    let p1 = pt(260.0, 100.0);

    engine.on_pointer_down(p0, Button::Primary);
    assert!(matches!(engine.input, InputState::Dragging { .. }));
    engine.on_pointer_move(p1);

    // (200, 80) px at 40 px per cell is (5, 2) cells.
    assert_eq!(rack_pos(&engine, &id), (5, 2));
}

#[test]
fn drag_snaps_to_nearest_cell() {
    let (mut engine, id) = engine_with_rack();
    engine.on_pointer_down(pt(60.0, 20.0), Button::Primary);
    engine.on_pointer_move(pt(60.0 + 75.0, 20.0 + 15.0));
    assert_eq!(rack_pos(&engine, &id), (2, 0));
}

#[test]
fn pointer_up_persists_exactly_once() {
    let (mut engine, id) = engine_with_rack();
    engine.on_pointer_down(pt(60.0, 20.0), Button::Primary);
    let mut moves = Vec::new();
    for step in 1..=5 {
        moves.extend(engine.on_pointer_move(pt(60.0 + f64::from(step) * 40.0, 20.0)));
    }
    assert_eq!(persist_count(&moves), 0);

    let up = engine.on_pointer_up(pt(260.0, 20.0), Button::Primary);
    assert_eq!(persist_count(&up), 1);
    assert!(edit_requested(&up).is_none());
    assert!(engine.input.is_idle());
    assert_eq!(rack_pos(&engine, &id), (5, 0));
}

#[test]
fn click_without_move_requests_editor() {
    let (mut engine, id) = engine_with_rack();
    engine.on_pointer_down(pt(60.0, 20.0), Button::Primary);
    engine.on_pointer_move(pt(65.0, 22.0));
    let up = engine.on_pointer_up(pt(65.0, 22.0), Button::Primary);
    assert_eq!(edit_requested(&up), Some(&id));
    assert_eq!(persist_count(&up), 1);
}

#[test]
fn pointer_down_during_gesture_is_ignored() {
    let mut engine = engine();
    engine.create_rack();
    engine.create_rack();
    let ids: Vec<String> = engine.racks.iter().map(|r| r.id.clone()).collect();
    // Both racks start at the origin; move the second one out of the way.
    engine
        .racks
        .update(&ids[1], &RackPatch { y: Some(5), ..Default::default() });

    engine.on_pointer_down(pt(20.0, 20.0), Button::Primary);
    let target = engine.input.target().cloned();
    assert!(engine.on_pointer_down(pt(20.0, 220.0), Button::Primary).is_empty());
    assert_eq!(engine.input.target().cloned(), target);
}

#[test]
fn secondary_button_does_not_start_drag() {
    let (mut engine, _) = engine_with_rack();
    assert!(engine.on_pointer_down(pt(60.0, 20.0), Button::Secondary).is_empty());
    assert!(engine.input.is_idle());
}

#[test]
fn pointer_down_on_empty_floor_does_nothing() {
    let (mut engine, _) = engine_with_rack();
    assert!(engine.on_pointer_down(pt(500.0, 500.0), Button::Primary).is_empty());
    assert!(engine.input.is_idle());
}

#[test]
fn pointer_up_without_gesture_does_not_persist() {
    let (mut engine, _) = engine_with_rack();
    assert!(engine.on_pointer_up(pt(0.0, 0.0), Button::Primary).is_empty());
}

#[test]
fn drag_follows_pointer_past_grid_edge() {
    let (mut engine, id) = engine_with_rack();
    engine.on_pointer_down(pt(60.0, 20.0), Button::Primary);
    // 20 cells right of a 10-wide rack on a 25-column grid.
    engine.on_pointer_move(pt(60.0 + 20.0 * 40.0, 20.0));
    assert_eq!(rack_pos(&engine, &id), (20, 0));
    engine.on_pointer_move(pt(60.0 - 3.0 * 40.0, 20.0 - 2.0 * 40.0));
    assert_eq!(rack_pos(&engine, &id), (-3, -2));

    let up = engine.on_pointer_up(pt(0.0, 0.0), Button::Primary);
    assert_eq!(persist_count(&up), 1);
    assert_eq!(rack_pos(&engine, &id), (-3, -2));
}

#[test]
fn viewport_resize_mid_drag_uses_new_scale() {
    let (mut engine, id) = engine_with_rack();
    engine.on_pointer_down(pt(60.0, 20.0), Button::Primary);
    engine.set_viewport(500.0);
    // 20 px per cell now; the grab offset (1.5, 0.5) cells is unchanged.
    engine.on_pointer_move(pt(130.0, 50.0));
    assert_eq!(rack_pos(&engine, &id), (5, 2));
}

#[test]
fn delete_during_drag_ends_gesture() {
    let (mut engine, id) = engine_with_rack();
    engine.on_pointer_down(pt(60.0, 20.0), Button::Primary);
    let confirmed = engine.open_editor(&id).unwrap().request_delete().confirm();
    engine.delete_rack(&confirmed);
    assert!(engine.input.is_idle());
    assert!(engine.on_pointer_move(pt(200.0, 200.0)).is_empty());
}

// =============================================================
// File transport
// =============================================================

#[test]
fn export_then_import_into_fresh_engine() {
    let (mut engine, id) = engine_with_rack();
    engine.apply_area(90.0, 45.0).unwrap();
    engine.racks.update(&id, &RackPatch { x: Some(3), y: Some(4), ..Default::default() });

    let text = engine.export_layout(datetime!(2026-05-01 09:30 UTC)).to_json_pretty().unwrap();

    let mut fresh = FloorEngine::new();
    fresh.set_viewport(900.0);
    fresh.import_layout(&text).unwrap();
    assert_eq!(*fresh.racks.snapshot(), *engine.racks.snapshot());
    assert_eq!(fresh.area(), engine.area());
    assert_eq!(fresh.scale().unwrap().cell_px, 30.0);
}

#[test]
fn failed_import_leaves_state_untouched() {
    let (mut engine, _) = engine_with_rack();
    let before = engine.racks.snapshot();
    let area = engine.area();

    let err = engine.import_layout(r#"{ "racks": [] }"#).unwrap_err();
    assert_eq!(err.error_code(), "E_VALIDATION");
    let err = engine.import_layout("not json").unwrap_err();
    assert_eq!(err.error_code(), "E_PARSE");

    assert_eq!(*engine.racks.snapshot(), *before);
    assert_eq!(engine.area(), area);
}

#[test]
fn import_adopts_store_id() {
    let mut engine = engine();
    engine.import_layout(r#"{ "store_id": "STORE042", "floor_area": {}, "racks": [] }"#).unwrap();
    assert_eq!(engine.store_id(), "STORE042");
    assert_eq!(engine.export_layout(datetime!(2026-05-01 09:30 UTC)).store_id, "STORE042");
}

#[test]
fn persisted_snapshot_is_not_altered_by_later_moves() {
    let (mut engine, id) = engine_with_rack();
    engine.on_pointer_down(pt(60.0, 20.0), Button::Primary);
    engine.on_pointer_move(pt(100.0, 20.0));
    let up = engine.on_pointer_up(pt(100.0, 20.0), Button::Primary);
    let Some(Action::Persist(saved)) = up.into_iter().find(|a| matches!(a, Action::Persist(_))) else {
        panic!("expected a persist action");
    };

    engine.racks.update(&id, &RackPatch { x: Some(9), ..Default::default() });
    assert_eq!(saved[0].x, 1);
}
