use serde_json::json;

use super::*;

fn rack_with(meta: RackMeta) -> Rack {
    Rack::new("rack-0001", "Rack 1", meta)
}

fn full_meta() -> RackMeta {
    RackMeta {
        total_columns: Some(6),
        orientation: Some(Orientation::Vertical),
        numbering_type: Some(NumberingType::Even),
        category: Some("Dairy".into()),
        color: Some("#00FF00".into()),
        ..Default::default()
    }
}

// =============================================================
// for_rack
// =============================================================

#[test]
fn form_copies_existing_meta() {
    let form = RackForm::for_rack(&rack_with(full_meta()));
    assert_eq!(form.rack_id, "rack-0001");
    assert_eq!(form.name, "Rack 1");
    assert_eq!(form.total_columns, 6);
    assert_eq!(form.orientation, Orientation::Vertical);
    assert_eq!(form.numbering_type, NumberingType::Even);
    assert_eq!(form.category, "Dairy");
    assert_eq!(form.color, "#00FF00");
}

#[test]
fn form_replaces_unreadable_typed_values() {
    let mut meta = RackMeta::default();
    meta.extra.insert("orientation".into(), json!("diagonal"));
    meta.extra.insert("row_number".into(), json!(7));

    let attrs = RackForm::for_rack(&rack_with(meta)).validate().unwrap();

    assert_eq!(attrs.meta.orientation, Some(Orientation::Horizontal));
    assert!(!attrs.meta.extra.contains_key("orientation"));
    assert_eq!(attrs.meta.extra["row_number"], json!(7));
    let written = serde_json::to_value(&attrs.meta).unwrap();
    assert_eq!(written["orientation"], json!("horizontal"));
}

#[test]
fn form_fills_defaults_for_empty_meta() {
    let form = RackForm::for_rack(&rack_with(RackMeta::default()));
    assert_eq!(form.total_columns, 10);
    assert_eq!(form.orientation, Orientation::Horizontal);
    assert_eq!(form.numbering_type, NumberingType::Odd);
    assert_eq!(form.category, "");
    assert_eq!(form.color, "#FEE2E2");
}

// =============================================================
// validate
// =============================================================

#[test]
fn validate_produces_full_attribute_set() {
    let attrs = RackForm::for_rack(&rack_with(full_meta())).validate().unwrap();
    assert_eq!(attrs.rack_id, "rack-0001");
    assert_eq!(attrs.name, "Rack 1");
    assert_eq!(attrs.meta, full_meta());
}

#[test]
fn validate_rejects_empty_name() {
    let mut form = RackForm::for_rack(&rack_with(full_meta()));
    form.name = String::new();
    assert_eq!(form.validate(), Err(ValidationError::EmptyName));
    form.name = "   ".into();
    assert_eq!(form.validate(), Err(ValidationError::EmptyName));
}

#[test]
fn validate_trims_name() {
    let mut form = RackForm::for_rack(&rack_with(full_meta()));
    form.name = "  Aisle 4 ".into();
    assert_eq!(form.validate().unwrap().name, "Aisle 4");
}

#[test]
fn validate_column_bounds() {
    let mut form = RackForm::for_rack(&rack_with(full_meta()));
    for ok in [1, 50, 100] {
        form.total_columns = ok;
        assert!(form.validate().is_ok(), "{ok} columns should pass");
    }
    for bad in [0, 101, -3, i64::from(u32::MAX) + 1] {
        form.total_columns = bad;
        assert!(
            matches!(form.validate(), Err(ValidationError::ColumnsOutOfRange { got, .. }) if got == bad),
            "{bad} columns should fail"
        );
    }
}

#[test]
fn validate_keeps_unknown_meta_keys() {
    let mut meta = full_meta();
    meta.extra.insert("row_number".into(), json!(3));
    let attrs = RackForm::for_rack(&rack_with(meta)).validate().unwrap();
    assert_eq!(attrs.meta.extra.get("row_number"), Some(&json!(3)));
}

#[test]
fn attributes_patch_recomputes_size() {
    let mut rack = rack_with(full_meta());
    let mut form = RackForm::for_rack(&rack);
    form.orientation = Orientation::Horizontal;
    form.total_columns = 12;
    let patch = form.validate().unwrap().into_patch();
    crate::doc::Entity::apply(&mut rack, &patch);
    assert_eq!(rack.size(), (12, 1));
}

// =============================================================
// Delete handshake
// =============================================================

#[test]
fn delete_request_confirms_to_same_rack() {
    let form = RackForm::for_rack(&rack_with(full_meta()));
    let request = form.request_delete();
    assert_eq!(request.rack_id(), "rack-0001");
    let confirmed = request.confirm();
    assert_eq!(confirmed.rack_id(), "rack-0001");
}
