use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category
///
/// `parent_id = None` marks a root. Rows are read ordered by
/// `created_at, id`, which is the sibling order of the built tree.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    #[serde(alias = "parentId")]
    pub parent_id: Option<Uuid>,
    #[serde(alias = "category_name")]
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
impl Category {
    /// Minimal record for hierarchy tests
    pub fn fixture(id: Uuid, parent_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id,
            parent_id,
            name: format!("Category {}", id.simple()),
            slug: format!("category-{}", id.simple()),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_accepts_legacy_field_names() {
        let id = Uuid::now_v7();
        let parent = Uuid::now_v7();
        let category: Category = serde_json::from_value(json!({
            "id": id,
            "parentId": parent,
            "category_name": "Shoes",
            "slug": "shoes",
            "description": null,
            "is_active": true,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(category.parent_id, Some(parent));
        assert_eq!(category.name, "Shoes");
    }
}
