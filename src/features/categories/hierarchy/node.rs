use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::categories::models::Category;

/// A category with its children, as projected from the flat table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryNode {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub(super) fn leaf(category: &Category) -> Self {
        Self {
            id: category.id,
            parent_id: category.parent_id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            is_active: category.is_active,
            created_at: category.created_at,
            updated_at: category.updated_at,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Total nodes in a forest, descendants included
pub fn node_count(forest: &[CategoryNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + node_count(&node.children))
        .sum()
}
