use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::hierarchy::{ResolveOutcome, SelectionTriple};
use crate::features::categories::models::Category;
use crate::shared::validation::{validate_not_blank, SLUG_REGEX};

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Query params for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

/// Query params for the admin category listing
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AdminListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,

    /// Include deactivated categories. Default: false
    #[serde(default)]
    pub include_inactive: bool,
}

/// Query params for resolving the cascading selects of the product form
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SelectionQuery {
    /// Category currently assigned to the product; empty means none
    pub leaf_id: Option<String>,
}

impl SelectionQuery {
    /// `None` for a missing or blank `leaf_id`
    pub fn leaf_id(&self) -> Result<Option<Uuid>, uuid::Error> {
        match self.leaf_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Uuid::parse_str(raw).map(Some),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionResponseDto {
    #[serde(flatten)]
    pub selection: SelectionTriple,
    pub outcome: ResolveOutcome,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[serde(alias = "category_name")]
    #[validate(length(min = 1, max = 100), custom(function = validate_not_blank))]
    pub name: String,

    /// Derived from `name` when omitted
    #[validate(length(min = 1, max = 120), regex(path = *SLUG_REGEX, message = "slug must be lowercase letters and digits separated by single hyphens"))]
    pub slug: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Parent category; omit or null for a root category
    #[serde(alias = "parentId")]
    pub parent_id: Option<Uuid>,

    pub is_active: Option<bool>,
}

/// Partial update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[serde(alias = "category_name")]
    #[validate(length(min = 1, max = 100), custom(function = validate_not_blank))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 120), regex(path = *SLUG_REGEX, message = "slug must be lowercase letters and digits separated by single hyphens"))]
    pub slug: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Omit to keep the current parent, `null` to make the category a root
    #[serde(default, alias = "parentId", deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub parent_id: Option<Option<Uuid>>,

    pub is_active: Option<bool>,
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_dto_validation() {
        let dto: CreateCategoryDto =
            serde_json::from_value(json!({ "name": "Shoes", "slug": "mens-shoes" })).unwrap();
        assert!(dto.validate().is_ok());

        let dto: CreateCategoryDto =
            serde_json::from_value(json!({ "name": "", "slug": "Bad Slug" })).unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("slug"));
    }

    #[test]
    fn test_whitespace_only_name_is_rejected() {
        let dto: CreateCategoryDto =
            serde_json::from_value(json!({ "name": "   ", "slug": "shoes" })).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let dto: UpdateCategoryDto = serde_json::from_value(json!({ "name": "\t " })).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let dto: UpdateCategoryDto = serde_json::from_value(json!({ "slug": "shoes" })).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_accepts_legacy_names() {
        let parent = Uuid::now_v7();
        let dto: CreateCategoryDto = serde_json::from_value(json!({
            "category_name": "Sneakers",
            "parentId": parent
        }))
        .unwrap();
        assert_eq!(dto.name, "Sneakers");
        assert_eq!(dto.parent_id, Some(parent));
    }

    #[test]
    fn test_update_dto_parent_tristate() {
        let parent = Uuid::now_v7();

        let absent: UpdateCategoryDto = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert_eq!(absent.parent_id, None);

        let null: UpdateCategoryDto =
            serde_json::from_value(json!({ "parent_id": null })).unwrap();
        assert_eq!(null.parent_id, Some(None));

        let set: UpdateCategoryDto =
            serde_json::from_value(json!({ "parent_id": parent })).unwrap();
        assert_eq!(set.parent_id, Some(Some(parent)));
    }

    #[test]
    fn test_selection_query_leaf_id() {
        let id = Uuid::now_v7();

        assert_eq!(SelectionQuery { leaf_id: None }.leaf_id().unwrap(), None);
        assert_eq!(
            SelectionQuery {
                leaf_id: Some("  ".to_string())
            }
            .leaf_id()
            .unwrap(),
            None
        );
        assert_eq!(
            SelectionQuery {
                leaf_id: Some(id.to_string())
            }
            .leaf_id()
            .unwrap(),
            Some(id)
        );
        assert!(SelectionQuery {
            leaf_id: Some("not-a-uuid".to_string())
        }
        .leaf_id()
        .is_err());
    }

    #[test]
    fn test_selection_response_is_flat() {
        let dto = SelectionResponseDto {
            selection: SelectionTriple::default(),
            outcome: ResolveOutcome::Empty,
        };
        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            json!({ "l1": null, "l2": null, "l3": null, "outcome": "empty" })
        );
    }
}
