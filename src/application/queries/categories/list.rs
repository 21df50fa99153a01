// src/application/queries/categories/list.rs
use super::CategoryQueryService;
use crate::{
    application::{dto::CategoryDto, error::ApplicationResult},
    domain::tenant::TenantId,
};

pub struct ListCategoriesQuery;

impl CategoryQueryService {
    pub async fn list_categories(
        &self,
        tenant: &TenantId,
        _query: ListCategoriesQuery,
    ) -> ApplicationResult<Vec<CategoryDto>> {
        let records = self.read_repo.list(tenant).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
