// src/application/dto/categories.rs
use crate::domain::category::{Category, CategoryNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into(),
            title: category.title.into_inner(),
            slug: category.slug.into_inner(),
            icon_url: category.icon_url,
            parent_id: category.parent_id.map(Into::into),
            product_count: category.product_count,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// A category together with its nested children.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub children: Vec<CategoryTreeDto>,
}

impl From<CategoryNode> for CategoryTreeDto {
    fn from(node: CategoryNode) -> Self {
        let CategoryNode { category, children } = node;
        let flat = CategoryDto::from(category);
        Self {
            id: flat.id,
            title: flat.title,
            slug: flat.slug,
            icon_url: flat.icon_url,
            parent_id: flat.parent_id,
            product_count: flat.product_count,
            created_at: flat.created_at,
            updated_at: flat.updated_at,
            children: children.into_iter().map(Into::into).collect(),
        }
    }
}
