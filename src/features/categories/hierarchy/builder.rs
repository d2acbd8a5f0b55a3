use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::node::CategoryNode;
use crate::features::categories::models::Category;

/// Records that could not be placed in the forest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TreeDiagnostics {
    /// Records whose `parent_id` matches no record
    pub orphans: Vec<Uuid>,
    /// Records whose parent exists but never connects to a root
    /// (descendants of orphans, members of a parent cycle)
    pub unreachable: Vec<Uuid>,
    /// Repeated ids; only the first record with an id is used
    pub duplicates: Vec<Uuid>,
}

impl TreeDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.unreachable.is_empty() && self.duplicates.is_empty()
    }
}

/// Build a forest from a flat, parent-referencing list of categories.
///
/// Roots and siblings keep input order. Children may precede their parent.
/// Records that cannot be attached are dropped silently; use
/// [`build_tree_with_diagnostics`] to find out which.
pub fn build_tree(records: &[Category]) -> Vec<CategoryNode> {
    build_tree_with_diagnostics(records).0
}

pub fn build_tree_with_diagnostics(records: &[Category]) -> (Vec<CategoryNode>, TreeDiagnostics) {
    let mut diagnostics = TreeDiagnostics::default();

    // Pass 1: one arena slot per distinct id
    let mut slot_of: HashMap<Uuid, usize> = HashMap::with_capacity(records.len());
    let mut arena: Vec<&Category> = Vec::with_capacity(records.len());
    for record in records {
        match slot_of.entry(record.id) {
            Entry::Occupied(_) => diagnostics.duplicates.push(record.id),
            Entry::Vacant(entry) => {
                entry.insert(arena.len());
                arena.push(record);
            }
        }
    }

    // Pass 2: attach by parent id, in input order
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (slot, record) in arena.iter().enumerate() {
        match record.parent_id {
            None => roots.push(slot),
            Some(parent_id) => match slot_of.get(&parent_id) {
                Some(&parent) => children[parent].push(slot),
                None => diagnostics.orphans.push(record.id),
            },
        }
    }

    let mut placed = vec![false; arena.len()];
    let forest = roots
        .iter()
        .map(|&root| materialize(root, &arena, &children, &mut placed))
        .collect();

    // A node is reachable only through a chain of parents ending at a root,
    // so cycle members are never placed and materialize always terminates.
    diagnostics.unreachable = arena
        .iter()
        .enumerate()
        .filter(|&(slot, record)| {
            !placed[slot]
                && record
                    .parent_id
                    .is_some_and(|parent_id| slot_of.contains_key(&parent_id))
        })
        .map(|(_, record)| record.id)
        .collect();

    (forest, diagnostics)
}

fn materialize(
    slot: usize,
    arena: &[&Category],
    children: &[Vec<usize>],
    placed: &mut [bool],
) -> CategoryNode {
    placed[slot] = true;
    let mut node = CategoryNode::leaf(arena[slot]);
    node.children = children[slot]
        .iter()
        .map(|&child| materialize(child, arena, children, placed))
        .collect();
    node
}
