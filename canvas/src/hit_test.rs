#![allow(clippy::float_cmp)]

use super::*;
use crate::floor::{GridSize, Orientation, RackMeta};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn rack_at(id: &str, x: i32, y: i32, columns: u32) -> Rack {
    let meta = RackMeta {
        total_columns: Some(columns),
        orientation: Some(Orientation::Horizontal),
        ..Default::default()
    };
    let mut rack = Rack::new(id, id, meta);
    rack.x = x;
    rack.y = y;
    rack
}

fn image_at(id: f64, x: f64, y: f64) -> WallImage {
    WallImage::upload(ImageId(id), "data:,", pt(x, y))
}

fn scale_20px() -> GridScale {
    GridScale::fit(GridSize { columns: 50, rows: 50 }, 1000.0).unwrap()
}

// =============================================================
// Racks
// =============================================================

#[test]
fn rack_hit_converts_pixels_to_cells() {
    let mut racks = EntityStore::new();
    racks.add(rack_at("a", 2, 3, 4));
    // Cell (5, 3) is inside a 4-wide rack starting at column 2.
    let hit = hit_test_racks(pt(110.0, 70.0), &racks, &scale_20px()).unwrap();
    assert_eq!(hit.id, "a");
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn rack_miss_returns_none() {
    let mut racks = EntityStore::new();
    racks.add(rack_at("a", 2, 3, 4));
    assert!(hit_test_racks(pt(130.0, 70.0), &racks, &scale_20px()).is_none());
}

#[test]
fn rack_overlap_picks_topmost() {
    let mut racks = EntityStore::new();
    racks.add(rack_at("under", 0, 0, 5));
    racks.add(rack_at("over", 2, 0, 5));
    let hit = hit_test_racks(pt(50.0, 10.0), &racks, &scale_20px()).unwrap();
    assert_eq!(hit.id, "over");
}

// =============================================================
// Images
// =============================================================

#[test]
fn image_body_hit() {
    let mut images = EntityStore::new();
    images.add(image_at(1.0, 0.0, 0.0));
    let hit = hit_test_images(pt(100.0, 100.0), &images).unwrap();
    assert_eq!(hit, Hit { id: ImageId(1.0), part: HitPart::Body });
}

#[test]
fn image_handle_only_on_selected() {
    let mut images = EntityStore::new();
    images.add(image_at(1.0, 0.0, 0.0));
    // Just outside the bottom-right corner: inside handle radius.
    let corner = pt(204.0, 204.0);
    assert!(hit_test_images(corner, &images).is_none());

    images.select(&ImageId(1.0));
    let hit = hit_test_images(corner, &images).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle);
}

#[test]
fn image_overlap_picks_last_added() {
    let mut images = EntityStore::new();
    images.add(image_at(1.0, 0.0, 0.0));
    images.add(image_at(2.0, 100.0, 100.0));
    let hit = hit_test_images(pt(150.0, 150.0), &images).unwrap();
    assert_eq!(hit.id, ImageId(2.0));
}

#[test]
fn selected_image_is_raised() {
    let mut images = EntityStore::new();
    images.add(image_at(1.0, 0.0, 0.0));
    images.add(image_at(2.0, 100.0, 100.0));
    images.select(&ImageId(1.0));
    let hit = hit_test_images(pt(150.0, 150.0), &images).unwrap();
    assert_eq!(hit.id, ImageId(1.0));
}

#[test]
fn empty_wall_misses() {
    let images = EntityStore::<WallImage>::new();
    assert!(hit_test_images(pt(0.0, 0.0), &images).is_none());
}
