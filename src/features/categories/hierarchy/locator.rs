use uuid::Uuid;

use super::node::CategoryNode;

/// Depth-first, pre-order search for `id` anywhere in the forest
pub fn find_node<'a>(forest: &'a [CategoryNode], id: &Uuid) -> Option<&'a CategoryNode> {
    for node in forest {
        if node.id == *id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}
