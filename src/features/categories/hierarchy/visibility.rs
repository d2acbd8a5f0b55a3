use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::node::CategoryNode;
use crate::features::categories::models::Category;

/// Drop inactive nodes together with everything beneath them
pub fn prune_inactive(forest: Vec<CategoryNode>) -> Vec<CategoryNode> {
    forest
        .into_iter()
        .filter(|node| node.is_active)
        .map(|mut node| {
            node.children = prune_inactive(node.children);
            node
        })
        .collect()
}

/// Ids of every node in the forest
pub fn collect_ids(forest: &[CategoryNode]) -> HashSet<Uuid> {
    let mut ids = HashSet::new();
    let mut stack: Vec<&CategoryNode> = forest.iter().collect();
    while let Some(node) = stack.pop() {
        ids.insert(node.id);
        stack.extend(node.children.iter());
    }
    ids
}

/// Whether `category` shows on the storefront: it and every ancestor up to
/// a root are active.
///
/// A dangling parent or a parent cycle makes the category invisible, the
/// same as the tree builder dropping it.
pub fn is_visible(records: &[Category], category: &Category) -> bool {
    let by_id: HashMap<Uuid, &Category> = records.iter().map(|c| (c.id, c)).collect();
    let mut seen = HashSet::new();
    let mut current = category;

    loop {
        if !current.is_active || !seen.insert(current.id) {
            return false;
        }
        match current.parent_id {
            None => return true,
            Some(parent_id) => match by_id.get(&parent_id) {
                Some(parent) => current = parent,
                None => return false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::hierarchy::{build_tree, build_tree_with_diagnostics};

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn record(n: u128, parent: Option<u128>, is_active: bool) -> Category {
        Category {
            is_active,
            ..Category::fixture(id(n), parent.map(id))
        }
    }

    /// 1 (active) -> 2 (inactive) -> 3 (active), plus active 1 -> 4
    fn catalog() -> Vec<Category> {
        vec![
            record(1, None, true),
            record(2, Some(1), false),
            record(3, Some(2), true),
            record(4, Some(1), true),
        ]
    }

    #[test]
    fn test_deactivated_branch_is_not_a_data_problem() {
        let (_, diagnostics) = build_tree_with_diagnostics(&catalog());
        assert!(diagnostics.is_clean());
    }

    #[test]
    fn test_prune_drops_inactive_subtree() {
        let forest = prune_inactive(build_tree(&catalog()));

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, id(1));
        let children: Vec<Uuid> = forest[0].children.iter().map(|n| n.id).collect();
        assert_eq!(children, vec![id(4)]);
        assert_eq!(collect_ids(&forest), HashSet::from([id(1), id(4)]));
    }

    #[test]
    fn test_prune_drops_inactive_root() {
        let records = vec![record(1, None, false), record(2, Some(1), true)];
        assert!(prune_inactive(build_tree(&records)).is_empty());
    }

    #[test]
    fn test_visibility_follows_ancestors() {
        let records = catalog();

        assert!(is_visible(&records, &records[0]));
        assert!(!is_visible(&records, &records[1]));
        assert!(!is_visible(&records, &records[2]));
        assert!(is_visible(&records, &records[3]));
    }

    #[test]
    fn test_visibility_matches_pruned_tree() {
        let records = catalog();
        let visible = collect_ids(&prune_inactive(build_tree(&records)));

        for record in &records {
            assert_eq!(is_visible(&records, record), visible.contains(&record.id));
        }
    }

    #[test]
    fn test_orphan_and_cycle_are_invisible() {
        let records = vec![
            record(1, Some(404), true),
            record(2, Some(3), true),
            record(3, Some(2), true),
        ];

        assert!(records.iter().all(|r| !is_visible(&records, r)));
    }
}
