// src/domain/category/services/mod.rs
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::category::repository::CategoryReadRepository;
use crate::domain::category::value_objects::{CategoryId, CategorySlug, CategoryTitle};
use crate::domain::errors::DomainResult;
use crate::domain::tenant::TenantId;

const FALLBACK_SLUG: &str = "category";
const FIRST_SUFFIX: u64 = 2;

/// Domain service responsible for producing slugs that are unique within a
/// tenant's catalog.
///
/// The probe is best effort: the storage layer still enforces uniqueness, so
/// a concurrent writer that claims the same slug surfaces as a conflict on
/// insert rather than a duplicate.
pub struct CategorySlugService {
    read_repo: Arc<dyn CategoryReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl CategorySlugService {
    pub fn new(
        read_repo: Arc<dyn CategoryReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    pub async fn generate_unique_slug(
        &self,
        tenant: &TenantId,
        title: &CategoryTitle,
        ignore_id: Option<CategoryId>,
    ) -> DomainResult<CategorySlug> {
        let base = self.generator.slugify(title.as_str());
        let base_slug = if base.is_empty() {
            FALLBACK_SLUG.to_string()
        } else {
            base
        };

        let mut candidate = base_slug.clone();
        let mut counter = FIRST_SUFFIX;

        loop {
            let slug = CategorySlug::new(candidate)?;
            match self.read_repo.find_by_slug(tenant, &slug).await? {
                Some(existing) if ignore_id == Some(existing.id) => return Ok(slug),
                Some(_) => {
                    candidate = format!("{base_slug}-{counter}");
                    counter += 1;
                }
                None => return Ok(slug),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::entity::Category;
    use crate::infrastructure::util::DefaultSlugGenerator;
    use async_trait::async_trait;
    use chrono::Utc;

    struct FixedCatalog(Vec<Category>);

    #[async_trait]
    impl CategoryReadRepository for FixedCatalog {
        async fn find_by_id(
            &self,
            tenant: &TenantId,
            id: CategoryId,
        ) -> DomainResult<Option<Category>> {
            Ok(self
                .0
                .iter()
                .find(|c| &c.tenant == tenant && c.id == id)
                .cloned())
        }

        async fn find_by_slug(
            &self,
            tenant: &TenantId,
            slug: &CategorySlug,
        ) -> DomainResult<Option<Category>> {
            Ok(self
                .0
                .iter()
                .find(|c| &c.tenant == tenant && &c.slug == slug)
                .cloned())
        }

        async fn list(&self, tenant: &TenantId) -> DomainResult<Vec<Category>> {
            Ok(self
                .0
                .iter()
                .filter(|c| &c.tenant == tenant)
                .cloned()
                .collect())
        }
    }

    fn stored(id: i64, tenant: &str, slug: &str) -> Category {
        let now = Utc::now();
        Category {
            id: CategoryId::new(id).unwrap(),
            tenant: TenantId::new(tenant).unwrap(),
            title: CategoryTitle::new(slug).unwrap(),
            slug: CategorySlug::new(slug).unwrap(),
            icon_url: None,
            parent_id: None,
            product_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(existing: Vec<Category>) -> CategorySlugService {
        CategorySlugService::new(
            Arc::new(FixedCatalog(existing)),
            Arc::new(DefaultSlugGenerator),
        )
    }

    fn tenant(name: &str) -> TenantId {
        TenantId::new(name).unwrap()
    }

    #[tokio::test]
    async fn unused_base_slug_is_returned_as_is() {
        let slug = service(vec![])
            .generate_unique_slug(&tenant("shop"), &CategoryTitle::new("Red Shoes").unwrap(), None)
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "red-shoes");
    }

    #[tokio::test]
    async fn collisions_start_suffixing_at_two() {
        let svc = service(vec![
            stored(1, "shop", "red-shoes"),
            stored(2, "shop", "red-shoes-2"),
        ]);
        let slug = svc
            .generate_unique_slug(&tenant("shop"), &CategoryTitle::new("Red Shoes").unwrap(), None)
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "red-shoes-3");
    }

    #[tokio::test]
    async fn other_tenants_do_not_collide() {
        let svc = service(vec![stored(1, "shop", "red-shoes")]);
        let slug = svc
            .generate_unique_slug(
                &tenant("outlet"),
                &CategoryTitle::new("Red Shoes").unwrap(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "red-shoes");
    }

    #[tokio::test]
    async fn own_slug_is_not_a_collision() {
        let svc = service(vec![stored(5, "shop", "red-shoes")]);
        let slug = svc
            .generate_unique_slug(
                &tenant("shop"),
                &CategoryTitle::new("Red  Shoes!").unwrap(),
                Some(CategoryId::new(5).unwrap()),
            )
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "red-shoes");
    }

    #[tokio::test]
    async fn titles_without_alphanumerics_fall_back() {
        let svc = service(vec![stored(1, "shop", "category")]);
        let slug = svc
            .generate_unique_slug(&tenant("shop"), &CategoryTitle::new("!!!").unwrap(), None)
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "category-2");
    }

    #[tokio::test]
    async fn transliterates_and_collapses_separators() {
        let slug = service(vec![])
            .generate_unique_slug(
                &tenant("shop"),
                &CategoryTitle::new("  Café & Crème -- Brûlée ").unwrap(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "cafe-creme-brulee");
    }
}
