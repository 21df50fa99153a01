// src/application/commands/categories/product_count.rs
use super::CategoryCommandService;
use crate::{
    application::{dto::CategoryDto, error::ApplicationResult},
    domain::{
        category::{CategoryId, ProductCountDelta},
        tenant::TenantId,
    },
};

pub struct AdjustProductCountCommand {
    pub id: i64,
    pub delta: ProductCountDelta,
}

impl CategoryCommandService {
    pub async fn adjust_product_count(
        &self,
        tenant: &TenantId,
        command: AdjustProductCountCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(command.id)?;
        let updated = self
            .write_repo
            .adjust_product_count(tenant, id, command.delta.as_i64())
            .await?;
        tracing::debug!(
            tenant = %tenant,
            category_id = %id,
            product_count = updated.product_count,
            "product count adjusted"
        );
        Ok(updated.into())
    }
}
