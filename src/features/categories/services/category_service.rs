use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, SelectionResponseDto, UpdateCategoryDto,
};
use crate::features::categories::hierarchy::{
    build_tree_with_diagnostics, check_placement, collect_ids, is_visible, node_count,
    prune_inactive, requested_parent_change, resolve_selections_with_outcome, CategoryNode,
    ResolveOutcome,
};
use crate::features::categories::models::Category;
use crate::shared::validation::slugify;

const CATEGORY_COLUMNS: &str =
    "id, parent_id, name, slug, description, is_active, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories in creation order, which is the tree's sibling order
    async fn fetch_all(&self) -> Result<Vec<Category>> {
        let query = format!(
            "SELECT {} FROM categories ORDER BY created_at ASC, id ASC",
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Full forest over every row. Orphans, cycles and duplicates are logged.
    fn build_forest(categories: &[Category]) -> Vec<CategoryNode> {
        let (forest, diagnostics) = build_tree_with_diagnostics(categories);

        if !diagnostics.is_clean() {
            tracing::warn!(
                total = categories.len(),
                placed = node_count(&forest),
                orphans = ?diagnostics.orphans,
                unreachable = ?diagnostics.unreachable,
                duplicates = ?diagnostics.duplicates,
                "Category tree built with dropped records"
            );
        }

        forest
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Category> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))
    }

    /// List categories (flat list)
    ///
    /// Without `include_inactive` only categories visible on the storefront
    /// are returned: active, under active ancestors, attached to a root.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.fetch_all().await?;
        if include_inactive {
            return Ok(categories.into_iter().map(|c| c.into()).collect());
        }

        let visible = collect_ids(&prune_inactive(Self::build_forest(&categories)));
        Ok(categories
            .into_iter()
            .filter(|c| visible.contains(&c.id))
            .map(|c| c.into())
            .collect())
    }

    /// List categories as tree structure
    ///
    /// Without `include_inactive`, deactivated categories are cut out along
    /// with their whole subtree.
    pub async fn list_tree(&self, include_inactive: bool) -> Result<Vec<CategoryNode>> {
        let categories = self.fetch_all().await?;
        let forest = Self::build_forest(&categories);

        Ok(if include_inactive {
            forest
        } else {
            prune_inactive(forest)
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        Ok(self.fetch_by_id(id).await?.into())
    }

    /// Get a storefront-visible category by slug
    ///
    /// A category under a deactivated ancestor is hidden here too, matching
    /// the public tree.
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let not_found = || AppError::NotFound(format!("Category '{}' not found", slug));
        let query = format!(
            "SELECT {} FROM categories WHERE slug = $1 AND is_active = TRUE",
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get category by slug: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(not_found)?;

        if category.parent_id.is_some() {
            let all = self.fetch_all().await?;
            if !is_visible(&all, &category) {
                return Err(not_found());
            }
        }

        Ok(category.into())
    }

    /// Resolve the product form's cascading selects for `leaf_id`.
    ///
    /// Uses the full tree so products filed under a deactivated category
    /// still open with their selection intact.
    pub async fn resolve_selection(&self, leaf_id: Option<Uuid>) -> Result<SelectionResponseDto> {
        let forest = self.list_tree(true).await?;
        let (selection, outcome) = resolve_selections_with_outcome(&forest, leaf_id.as_ref());

        match outcome {
            ResolveOutcome::NotFound => {
                tracing::warn!(leaf_id = ?leaf_id, "Selected category not found in tree")
            }
            ResolveOutcome::DepthExceeded => {
                tracing::warn!(leaf_id = ?leaf_id, "Selected category is nested too deep")
            }
            ResolveOutcome::Empty | ResolveOutcome::Exact => {}
        }

        Ok(SelectionResponseDto { selection, outcome })
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let slug = match dto.slug {
            Some(slug) => slug,
            None => slugify(&dto.name).ok_or_else(|| {
                AppError::Validation(
                    "Cannot derive a slug from this name; provide one explicitly".to_string(),
                )
            })?,
        };

        let all = self.fetch_all().await?;
        check_placement(&all, None, dto.parent_id)?;

        let query = format!(
            r#"
            INSERT INTO categories (id, parent_id, name, slug, description, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(Uuid::now_v7())
            .bind(dto.parent_id)
            .bind(dto.name.trim())
            .bind(&slug)
            .bind(dto.description)
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        tracing::info!(id = %category.id, slug = %category.slug, "Category created");
        Ok(category.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let current = self.fetch_by_id(id).await?;

        let parent_change = requested_parent_change(dto.parent_id, current.parent_id);
        if let Some(new_parent) = parent_change {
            let all = self.fetch_all().await?;
            check_placement(&all, Some(id), new_parent)?;
        }
        let parent_changed = parent_change.is_some();

        let query = format!(
            r#"
            UPDATE categories
            SET name = COALESCE($1, name),
                slug = COALESCE($2, slug),
                description = COALESCE($3, description),
                is_active = COALESCE($4, is_active),
                parent_id = CASE WHEN $5 THEN $6 ELSE parent_id END,
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.slug)
            .bind(dto.description)
            .bind(dto.is_active)
            .bind(parent_changed)
            .bind(parent_change.flatten())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        tracing::info!(id = %category.id, parent_changed, "Category updated");
        Ok(category.into())
    }

    /// Delete a category that has no children
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let child_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count children of category {}: {:?}", id, e);
                    AppError::Database(e)
                })?;

        if child_count > 0 {
            return Err(AppError::Conflict(format!(
                "Category has {} subcategories; move or delete them first",
                child_count
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Category with id {} not found",
                id
            )));
        }

        tracing::info!(id = %id, "Category deleted");
        Ok(())
    }
}
