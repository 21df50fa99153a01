// src/application/queries/categories/get_by_id.rs
use super::CategoryQueryService;
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{category::CategoryId, tenant::TenantId},
};

pub struct GetCategoryByIdQuery {
    pub id: i64,
}

impl CategoryQueryService {
    pub async fn get_category_by_id(
        &self,
        tenant: &TenantId,
        query: GetCategoryByIdQuery,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(query.id)?;
        let category = self
            .read_repo
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;
        Ok(category.into())
    }
}
