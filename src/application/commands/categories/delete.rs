// src/application/commands/categories/delete.rs
use super::CategoryCommandService;
use crate::{
    application::error::ApplicationResult,
    domain::{category::CategoryId, tenant::TenantId},
};

pub struct DeleteCategoryCommand {
    pub id: i64,
}

impl CategoryCommandService {
    /// Removes a single category. Children are left in place and keep
    /// pointing at the deleted id.
    pub async fn delete_category(
        &self,
        tenant: &TenantId,
        command: DeleteCategoryCommand,
    ) -> ApplicationResult<()> {
        let id = CategoryId::new(command.id)?;
        self.write_repo.delete(tenant, id).await?;
        tracing::info!(tenant = %tenant, category_id = %id, "category deleted");
        Ok(())
    }
}
