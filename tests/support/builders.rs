// tests/support/builders.rs
use category_catalog::domain::category::{Category, CategoryId, CategorySlug, CategoryTitle};
use category_catalog::domain::tenant::TenantId;

use super::mocks::fixed_now;

pub struct CategoryBuilder {
    id: i64,
    tenant: String,
    title: String,
    slug: Option<String>,
    parent_id: Option<i64>,
    product_count: i64,
}

impl CategoryBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            tenant: "shop.example".into(),
            title: format!("Category {id}"),
            slug: None,
            parent_id: None,
            product_count: 0,
        }
    }

    pub fn tenant(mut self, tenant: &str) -> Self {
        self.tenant = tenant.into();
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn product_count(mut self, count: i64) -> Self {
        self.product_count = count;
        self
    }

    pub fn build(self) -> Category {
        let now = fixed_now();
        let slug = self.slug.unwrap_or_else(|| format!("category-{}", self.id));
        Category {
            id: CategoryId::new(self.id).unwrap(),
            tenant: TenantId::new(self.tenant).unwrap(),
            title: CategoryTitle::new(self.title).unwrap(),
            slug: CategorySlug::new(slug).unwrap(),
            icon_url: None,
            parent_id: self.parent_id.map(|p| CategoryId::new(p).unwrap()),
            product_count: self.product_count,
            created_at: now,
            updated_at: now,
        }
    }
}
