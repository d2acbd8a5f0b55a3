use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::locator::find_node;
use super::node::CategoryNode;
use crate::shared::constants::MAX_SELECTION_DEPTH;

/// Category ids for the three cascading selects of the product form,
/// from the root (`l1`) down to the chosen leaf
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectionTriple {
    pub l1: Option<Uuid>,
    pub l2: Option<Uuid>,
    pub l3: Option<Uuid>,
}

impl SelectionTriple {
    /// Fill slots from a root-first path; extra entries are ignored
    fn from_path(path: &[Uuid]) -> Self {
        Self {
            l1: path.first().copied(),
            l2: path.get(1).copied(),
            l3: path.get(2).copied(),
        }
    }
}

/// How a selection was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResolveOutcome {
    /// No leaf given
    Empty,
    /// Full path from root to leaf
    Exact,
    /// Leaf not in the tree; its id was used as `l1`
    NotFound,
    /// Leaf sits deeper than the form can show; path was truncated
    DepthExceeded,
}

/// Resolve a leaf category into its `(l1, l2, l3)` ancestor path
pub fn resolve_selections(forest: &[CategoryNode], leaf_id: Option<&Uuid>) -> SelectionTriple {
    resolve_selections_with_outcome(forest, leaf_id).0
}

pub fn resolve_selections_with_outcome(
    forest: &[CategoryNode],
    leaf_id: Option<&Uuid>,
) -> (SelectionTriple, ResolveOutcome) {
    let Some(leaf_id) = leaf_id else {
        return (SelectionTriple::default(), ResolveOutcome::Empty);
    };

    let Some(leaf) = find_node(forest, leaf_id) else {
        return (
            SelectionTriple::from_path(&[*leaf_id]),
            ResolveOutcome::NotFound,
        );
    };

    // chain[0] is the leaf, chain[k] its k-th ancestor
    let mut chain: Vec<Uuid> = vec![leaf.id];
    let mut current = leaf;
    while let Some(parent_id) = current.parent_id {
        if chain.len() == MAX_SELECTION_DEPTH {
            return (depth_capped(&chain), ResolveOutcome::DepthExceeded);
        }
        match find_node(forest, &parent_id) {
            Some(parent) => {
                chain.push(parent.id);
                current = parent;
            }
            // Parent not in this forest: the topmost node found acts as root
            None => break,
        }
    }

    chain.reverse();
    (SelectionTriple::from_path(&chain), ResolveOutcome::Exact)
}

/// Over-deep leaf: keep the ancestors directly above it, root-first, and
/// leave the deepest slot empty so the form asks for a fresh choice there.
fn depth_capped(chain: &[Uuid]) -> SelectionTriple {
    let ancestors: Vec<Uuid> = chain[1..].iter().rev().copied().collect();
    SelectionTriple::from_path(&ancestors)
}
