//! Category hierarchy: flat parent-referencing rows ⇄ nested forest.
//!
//! Everything here is pure and synchronous. Callers fetch the flat list,
//! build a fresh forest per request and drop it afterwards.

mod builder;
mod locator;
mod node;
mod placement;
mod resolver;
mod visibility;

pub use builder::{build_tree, build_tree_with_diagnostics, TreeDiagnostics};
pub use locator::find_node;
pub use node::{node_count, CategoryNode};
pub use placement::{check_placement, requested_parent_change, PlacementError};
pub use resolver::{
    resolve_selections, resolve_selections_with_outcome, ResolveOutcome, SelectionTriple,
};
pub use visibility::{collect_ids, is_visible, prune_inactive};
