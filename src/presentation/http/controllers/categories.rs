// src/presentation/http/controllers/categories.rs
use crate::application::{
    commands::categories::{
        AdjustProductCountCommand, CreateCategoryCommand, DeleteCategoryCommand,
        UpdateCategoryCommand,
    },
    dto::{CategoryDto, CategoryTreeDto},
    queries::categories::{
        CategoryHierarchyQuery, GetCategoryByIdQuery, GetCategoryBySlugQuery, ListCategoriesQuery,
    },
};
use crate::domain::category::ProductCountDelta;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Tenant;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CategoryListParams {
    /// Return the flat list instead of the nested hierarchy.
    #[serde(default)]
    pub flat: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CategoryListResponse {
    Tree(Vec<CategoryTreeDto>),
    Flat(Vec<CategoryDto>),
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub title: Option<String>,
    /// `null` removes the icon.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub icon_url: Option<Option<String>>,
    /// `null` turns the category into a root.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub parent_id: Option<Option<i64>>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductCountDirection {
    Increment,
    Decrement,
}

impl From<ProductCountDirection> for ProductCountDelta {
    fn from(value: ProductCountDirection) -> Self {
        match value {
            ProductCountDirection::Increment => Self::Increment,
            ProductCountDirection::Decrement => Self::Decrement,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductCountRequest {
    pub direction: ProductCountDirection,
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("domain" = String, Header, description = "Tenant identifier"),
        CategoryListParams
    ),
    responses(
        (status = 200, description = "Category hierarchy, or the flat list when `flat=true`.", body = CategoryListResponse),
        (status = 400, description = "Missing domain header.", body = ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
    Tenant(tenant): Tenant,
    Query(params): Query<CategoryListParams>,
) -> HttpResult<Json<CategoryListResponse>> {
    let queries = &state.services.category_queries;

    let response = if params.flat {
        CategoryListResponse::Flat(
            queries
                .list_categories(&tenant, ListCategoriesQuery)
                .await
                .into_http()?,
        )
    } else {
        CategoryListResponse::Tree(
            queries
                .category_hierarchy(&tenant, CategoryHierarchyQuery)
                .await
                .into_http()?,
        )
    };

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("domain" = String, Header, description = "Tenant identifier"),
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "The category.", body = CategoryDto),
        (status = 404, description = "No such category in this tenant.", body = ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    Extension(state): Extension<HttpState>,
    Tenant(tenant): Tenant,
    Path(id): Path<i64>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_queries
        .get_category_by_id(&tenant, GetCategoryByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/categories/slug/{slug}",
    params(
        ("domain" = String, Header, description = "Tenant identifier"),
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "The category.", body = CategoryDto),
        (status = 404, description = "No such category in this tenant.", body = ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category_by_slug(
    Extension(state): Extension<HttpState>,
    Tenant(tenant): Tenant,
    Path(slug): Path<String>,
) -> HttpResult<Json<CategoryDto>> {
    state
        .services
        .category_queries
        .get_category_by_slug(&tenant, GetCategoryBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/categories",
    params(("domain" = String, Header, description = "Tenant identifier")),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created.", body = CategoryDto),
        (status = 400, description = "Missing title, unknown parent or missing domain header.", body = ErrorResponse),
        (status = 409, description = "Slug conflict persisted after retry.", body = ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    Tenant(tenant): Tenant,
    Json(payload): Json<CreateCategoryRequest>,
) -> HttpResult<(StatusCode, Json<CategoryDto>)> {
    let command = CreateCategoryCommand {
        title: payload.title,
        icon_url: payload.icon_url,
        parent_id: payload.parent_id,
    };

    let created = state
        .services
        .category_commands
        .create_category(&tenant, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("domain" = String, Header, description = "Tenant identifier"),
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated.", body = CategoryDto),
        (status = 400, description = "Invalid title or parent.", body = ErrorResponse),
        (status = 404, description = "No such category in this tenant.", body = ErrorResponse),
        (status = 409, description = "Concurrent modification.", body = ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn update_category(
    Extension(state): Extension<HttpState>,
    Tenant(tenant): Tenant,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> HttpResult<Json<CategoryDto>> {
    let command = UpdateCategoryCommand {
        id,
        title: payload.title,
        icon_url: payload.icon_url,
        parent_id: payload.parent_id,
    };

    state
        .services
        .category_commands
        .update_category(&tenant, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("domain" = String, Header, description = "Tenant identifier"),
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted; children are kept.", body = StatusResponse),
        (status = 404, description = "No such category in this tenant.", body = ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn delete_category(
    Extension(state): Extension<HttpState>,
    Tenant(tenant): Tenant,
    Path(id): Path<i64>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .category_commands
        .delete_category(&tenant, DeleteCategoryCommand { id })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/categories/{id}/product-count",
    params(
        ("domain" = String, Header, description = "Tenant identifier"),
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = ProductCountRequest,
    responses(
        (status = 200, description = "Counter adjusted.", body = CategoryDto),
        (status = 400, description = "Counter would become negative.", body = ErrorResponse),
        (status = 404, description = "No such category in this tenant.", body = ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn adjust_product_count(
    Extension(state): Extension<HttpState>,
    Tenant(tenant): Tenant,
    Path(id): Path<i64>,
    Json(payload): Json<ProductCountRequest>,
) -> HttpResult<Json<CategoryDto>> {
    let command = AdjustProductCountCommand {
        id,
        delta: payload.direction.into(),
    };

    state
        .services
        .category_commands
        .adjust_product_count(&tenant, command)
        .await
        .into_http()
        .map(Json)
}
