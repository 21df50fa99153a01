// src/domain/category/entity.rs
use crate::domain::category::value_objects::{CategoryId, CategorySlug, CategoryTitle};
use crate::domain::tenant::TenantId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub tenant: TenantId,
    pub title: CategoryTitle,
    pub slug: CategorySlug,
    pub icon_url: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn rename(&mut self, title: CategoryTitle, slug: CategorySlug, now: DateTime<Utc>) {
        self.title = title;
        self.slug = slug;
        self.updated_at = now;
    }

    pub fn set_icon(&mut self, icon_url: Option<String>, now: DateTime<Utc>) {
        self.icon_url = icon_url;
        self.updated_at = now;
    }

    pub fn set_parent(&mut self, parent_id: Option<CategoryId>, now: DateTime<Utc>) {
        self.parent_id = parent_id;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub tenant: TenantId,
    pub title: CategoryTitle,
    pub slug: CategorySlug,
    pub icon_url: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial write of a stored category. `icon_url` and `parent_id` use a
/// nested option so that `Some(None)` clears the column.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub tenant: TenantId,
    pub id: CategoryId,
    pub title: Option<CategoryTitle>,
    pub slug: Option<CategorySlug>,
    pub icon_url: Option<Option<String>>,
    pub parent_id: Option<Option<CategoryId>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryUpdate {
    pub fn new(tenant: TenantId, id: CategoryId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            tenant,
            id,
            title: None,
            slug: None,
            icon_url: None,
            parent_id: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: CategoryTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: CategorySlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_icon_url(mut self, icon_url: Option<String>) -> Self {
        self.icon_url = Some(icon_url);
        self
    }

    pub fn with_parent(mut self, parent_id: Option<CategoryId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.icon_url.is_none()
            && self.parent_id.is_none()
    }
}
