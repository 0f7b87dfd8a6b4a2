//! Editing engine for the store floor plan and the shared image wall.
//!
//! The crate is host-agnostic and keeps to what runs on `wasm32` (no system
//! clock; hosts pass the time in). It owns the editors' state: translating pointer
//! events into entity mutations, fitting the floor grid to the viewport,
//! hit-testing, validating rack attributes, and reading and writing layout
//! documents. Hosts wire input to the engines and act on the returned
//! [`engine::Action`]s (redraw, persist, open the attribute editor).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Actions the engines hand back to their host |
//! | [`floor_engine`] | Floor editor: area, grid scale, racks, drag gesture |
//! | [`wall_engine`] | Image wall: edit gate, commands, drag/resize gesture |
//! | [`doc`] | Generic entity store with copy-on-write snapshots |
//! | [`floor`] | Floor area, grid size, racks and their derived footprint |
//! | [`wall`] | Wall images, clip shapes, and the edit gate |
//! | [`editor`] | Rack attribute form and the delete handshake |
//! | [`layout`] | Layout document export and lenient import |
//! | [`camera`] | Grid scale and the coordinate spaces |
//! | [`input`] | Buttons, the gesture state machine, drag/resize math |
//! | [`hit`] | Hit-testing racks and images |
//! | [`error`] | Validation and editor errors |
//! | [`consts`] | Shared numeric constants (grid unit, minimum sizes, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod editor;
pub mod engine;
pub mod error;
pub mod floor;
pub mod floor_engine;
pub mod hit;
pub mod input;
pub mod layout;
pub mod wall;
pub mod wall_engine;
