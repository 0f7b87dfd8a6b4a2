//! Host actions.
//!
//! Engine handlers never touch the host directly. They return a list of
//! [`Action`]s and the host (browser canvas, CLI) carries them out: redraw,
//! change the cursor, open the attribute editor, or persist the collection.

use crate::doc::{Entity, Snapshot};
use crate::floor::Rack;
use crate::wall::WallImage;

/// Actions returned from engine handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action<E: Entity> {
    RenderNeeded,
    SetCursor(&'static str),
    /// Open the attribute editor for this entity.
    EditRequested(E::Id),
    /// Persist the full collection. Emitted once per committed change.
    Persist(Snapshot<E>),
}

pub type FloorAction = Action<Rack>;
pub type WallAction = Action<WallImage>;

/// Whether any action in `actions` asks for a redraw.
#[must_use]
pub fn needs_render<E: Entity>(actions: &[Action<E>]) -> bool {
    actions.iter().any(|a| matches!(a, Action::RenderNeeded))
}
