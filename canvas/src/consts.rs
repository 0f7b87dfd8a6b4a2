//! Shared numeric constants for the canvas crate.

// ── Floor plan ──────────────────────────────────────────────────

/// Real-world footprint of one grid cell, in feet.
pub const FEET_PER_CELL: f64 = 3.0;

/// Smallest accepted store length or width, in feet.
pub const MIN_AREA_FT: f64 = 15.0;

/// Store length used by a fresh floor editor, in feet.
pub const DEFAULT_LENGTH_FT: f64 = 75.0;

/// Store width used by a fresh floor editor, in feet.
pub const DEFAULT_WIDTH_FT: f64 = 60.0;

/// Rack depth in cells; a rack is always one cell thick.
pub const RACK_DEPTH_CELLS: i32 = 1;

/// Column count bounds accepted by the rack editor (inclusive).
pub const MIN_RACK_COLUMNS: u32 = 1;
pub const MAX_RACK_COLUMNS: u32 = 100;

/// Column count given to newly created racks.
pub const DEFAULT_RACK_COLUMNS: u32 = 10;

/// Fill color given to newly created racks.
pub const DEFAULT_RACK_COLOR: &str = "#FEE2E2";

/// Fallback footprint for imported racks that record no size.
pub const IMPORT_DEFAULT_W: i32 = 3;
pub const IMPORT_DEFAULT_H: i32 = 1;

/// Store id written into exported layouts when none was imported.
pub const DEFAULT_STORE_ID: &str = "STORE001";

/// Suggested filename for layout downloads.
pub const LAYOUT_FILENAME: &str = "store-layout.json";

// ── Image wall ──────────────────────────────────────────────────

/// Minimum image width and height in pixels.
pub const MIN_IMAGE_SIZE: f64 = 50.0;

/// Width and height of a freshly uploaded image.
pub const DEFAULT_IMAGE_SIZE: f64 = 200.0;

/// Rotation applied by one rotate action, in degrees.
pub const ROTATE_STEP_DEG: i32 = 45;

/// Scale factors for the zoom-in / zoom-out actions.
pub const ZOOM_IN_FACTOR: f64 = 1.2;
pub const ZOOM_OUT_FACTOR: f64 = 0.8;

/// Upload placement: `origin + sample * span` on each axis.
pub const SCATTER_ORIGIN: f64 = 50.0;
pub const SCATTER_SPAN_X: f64 = 300.0;
pub const SCATTER_SPAN_Y: f64 = 200.0;

/// Corner radius of the `rounded` image shape, in pixels.
pub const ROUNDED_CORNER_PX: f64 = 20.0;

/// Path segment that switches the wall into edit mode.
pub const EDIT_PATH_SEGMENT: &str = "/edit";

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels around the resize handle center.
pub const HANDLE_RADIUS_PX: f64 = 8.0;
