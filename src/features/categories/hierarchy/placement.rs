use std::collections::{HashMap, HashSet};

use thiserror::Error;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::categories::models::Category;
use crate::shared::constants::MAX_SELECTION_DEPTH;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Parent category {0} not found")]
    ParentNotFound(Uuid),

    #[error("A category cannot be its own parent")]
    SelfParent,

    #[error("Category {parent} lies under {category}; moving there would create a cycle")]
    Cycle { category: Uuid, parent: Uuid },

    #[error("Categories would be nested {depth} levels deep; at most {max} are supported")]
    TooDeep { depth: usize, max: usize },
}

impl From<PlacementError> for AppError {
    fn from(e: PlacementError) -> Self {
        match e {
            PlacementError::SelfParent | PlacementError::Cycle { .. } => {
                AppError::Conflict(e.to_string())
            }
            PlacementError::ParentNotFound(_) | PlacementError::TooDeep { .. } => {
                AppError::Validation(e.to_string())
            }
        }
    }
}

/// Check that `category_id` (or a new category when `None`) may sit under
/// `new_parent` without breaking the forest shape or the depth limit.
///
/// `records` must be the full table, inactive rows included.
pub fn check_placement(
    records: &[Category],
    category_id: Option<Uuid>,
    new_parent: Option<Uuid>,
) -> Result<(), PlacementError> {
    let by_id: HashMap<Uuid, &Category> = records.iter().map(|c| (c.id, c)).collect();

    let height = match category_id {
        Some(id) => subtree_height(records, id),
        None => 1,
    };

    let parent_depth = match new_parent {
        None => 0,
        Some(parent_id) => {
            if Some(parent_id) == category_id {
                return Err(PlacementError::SelfParent);
            }
            if !by_id.contains_key(&parent_id) {
                return Err(PlacementError::ParentNotFound(parent_id));
            }
            ancestor_depth(&by_id, parent_id, category_id)?
        }
    };

    let depth = parent_depth + height;
    if depth > MAX_SELECTION_DEPTH {
        return Err(PlacementError::TooDeep {
            depth,
            max: MAX_SELECTION_DEPTH,
        });
    }

    Ok(())
}

/// The parent an update moves a category to, or `None` when the stored
/// parent stays.
///
/// `requested` is the update's tri-state field: absent keeps the parent,
/// `Some(None)` asks for a root. Asking for the current parent is no change.
pub fn requested_parent_change(
    requested: Option<Option<Uuid>>,
    current: Option<Uuid>,
) -> Option<Option<Uuid>> {
    requested.filter(|new_parent| *new_parent != current)
}

/// Depth of `start` (a root has depth 1), walking parent links.
///
/// Fails with `Cycle` when the walk meets `moving` or revisits a node.
fn ancestor_depth(
    by_id: &HashMap<Uuid, &Category>,
    start: Uuid,
    moving: Option<Uuid>,
) -> Result<usize, PlacementError> {
    let mut seen = HashSet::new();
    let mut current = Some(start);
    let mut depth = 0;

    while let Some(id) = current {
        if Some(id) == moving || !seen.insert(id) {
            return Err(PlacementError::Cycle {
                category: moving.unwrap_or(id),
                parent: start,
            });
        }
        depth += 1;
        // A dangling parent reference ends the walk like a root would
        current = by_id.get(&id).and_then(|c| c.parent_id);
    }

    Ok(depth)
}

/// Levels in the subtree rooted at `root`, counting `root` itself
fn subtree_height(records: &[Category], root: Uuid) -> usize {
    let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for record in records {
        if let Some(parent_id) = record.parent_id {
            children.entry(parent_id).or_default().push(record.id);
        }
    }

    let mut seen = HashSet::from([root]);
    let mut level = vec![root];
    let mut height = 0;
    while !level.is_empty() {
        height += 1;
        level = level
            .iter()
            .filter_map(|id| children.get(id))
            .flatten()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();
    }
    height
}
