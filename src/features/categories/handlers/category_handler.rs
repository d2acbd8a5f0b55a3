use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::categories::dtos::{
    AdminListCategoriesQuery, CategoryResponseDto, CreateCategoryDto, ListCategoriesQuery,
    SelectionQuery, SelectionResponseDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// Serialize either listing shape into the response envelope
async fn listing(
    service: &CategoryService,
    tree: bool,
    include_inactive: bool,
) -> Result<Json<ApiResponse<Value>>> {
    let (value, total) = if tree {
        let forest = service.list_tree(include_inactive).await?;
        (serde_json::to_value(forest), None)
    } else {
        let categories = service.list(include_inactive).await?;
        let total = categories.len() as i64;
        (serde_json::to_value(categories), Some(total))
    };

    let value = value.map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;
    Ok(Json(ApiResponse::success(
        Some(value),
        None,
        total.map(|total| Meta { total }),
    )))
}

/// List all active categories
///
/// Returns categories as flat list or tree structure based on `tree` query param.
#[utoipa::path(
    get,
    path = "/api/categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<Value>>> {
    listing(&service, query.tree, false).await
}

/// Get category by slug
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// List categories for the admin dashboard, inactive ones optionally included
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    params(AdminListCategoriesQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-categories",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_categories(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<AdminListCategoriesQuery>,
) -> Result<Json<ApiResponse<Value>>> {
    listing(&service, query.tree, query.include_inactive).await
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-categories",
    security(("bearer_auth" = []))
)]
pub async fn admin_get_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or invalid parent"),
        (status = 409, description = "Slug already in use"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-categories",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!(by = %user.sub, name = %dto.name, "Creating category");
    let category = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(category), None, None)),
    ))
}

/// Update a category; moving it re-checks the hierarchy
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error or invalid parent"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Move would create a cycle, or slug already in use"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-categories",
    security(("bearer_auth" = []))
)]
pub async fn update_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category without subcategories
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has subcategories or products"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-categories",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Resolve the level-1/2/3 selects of the product form for an existing category
#[utoipa::path(
    get,
    path = "/api/admin/categories/selection",
    params(SelectionQuery),
    responses(
        (status = 200, description = "Resolved selection", body = ApiResponse<SelectionResponseDto>),
        (status = 400, description = "leaf_id is not a valid UUID"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-categories",
    security(("bearer_auth" = []))
)]
pub async fn resolve_selection(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<ApiResponse<SelectionResponseDto>>> {
    let leaf_id = query
        .leaf_id()
        .map_err(|e| AppError::BadRequest(format!("Invalid leaf_id: {}", e)))?;

    let selection = service.resolve_selection(leaf_id).await?;
    Ok(Json(ApiResponse::success(Some(selection), None, None)))
}
