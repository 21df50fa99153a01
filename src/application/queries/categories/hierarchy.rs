// src/application/queries/categories/hierarchy.rs
use super::CategoryQueryService;
use crate::{
    application::{dto::CategoryTreeDto, error::ApplicationResult},
    domain::{
        category::{IntegrityWarning, build_hierarchy},
        tenant::TenantId,
    },
};

pub struct CategoryHierarchyQuery;

impl CategoryQueryService {
    pub async fn category_hierarchy(
        &self,
        tenant: &TenantId,
        _query: CategoryHierarchyQuery,
    ) -> ApplicationResult<Vec<CategoryTreeDto>> {
        let records = self.read_repo.list(tenant).await?;
        let hierarchy = build_hierarchy(records);

        for warning in &hierarchy.warnings {
            match warning {
                IntegrityWarning::DanglingParent {
                    category_id,
                    parent_id,
                } => tracing::warn!(
                    tenant = %tenant,
                    category_id = %category_id,
                    parent_id = %parent_id,
                    "category references a missing parent; omitted from hierarchy"
                ),
                IntegrityWarning::Cycle { category_id } => tracing::warn!(
                    tenant = %tenant,
                    category_id = %category_id,
                    "category parent chain forms a cycle; omitted from hierarchy"
                ),
                IntegrityWarning::TooDeep { category_id, depth } => tracing::warn!(
                    tenant = %tenant,
                    category_id = %category_id,
                    depth,
                    "category nested beyond the depth limit; subtree omitted from hierarchy"
                ),
            }
        }

        Ok(hierarchy.roots.into_iter().map(Into::into).collect())
    }
}
