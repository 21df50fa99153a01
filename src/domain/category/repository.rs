// src/domain/category/repository.rs
use crate::domain::category::entity::{Category, CategoryUpdate, NewCategory};
use crate::domain::category::value_objects::{CategoryId, CategorySlug};
use crate::domain::errors::DomainResult;
use crate::domain::tenant::TenantId;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryWriteRepository: Send + Sync {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category>;
    async fn delete(&self, tenant: &TenantId, id: CategoryId) -> DomainResult<()>;
    /// Atomically add `delta` to the product counter. Fails with
    /// `Validation` when the result would be negative.
    async fn adjust_product_count(
        &self,
        tenant: &TenantId,
        id: CategoryId,
        delta: i64,
    ) -> DomainResult<Category>;
}

#[async_trait]
pub trait CategoryReadRepository: Send + Sync {
    async fn find_by_id(&self, tenant: &TenantId, id: CategoryId)
    -> DomainResult<Option<Category>>;
    async fn find_by_slug(
        &self,
        tenant: &TenantId,
        slug: &CategorySlug,
    ) -> DomainResult<Option<Category>>;
    /// All categories of the tenant, ordered by id.
    async fn list(&self, tenant: &TenantId) -> DomainResult<Vec<Category>>;
}
