// src/application/commands/categories/update.rs
use super::{CategoryCommandService, SLUG_ATTEMPTS, normalize_icon_url};
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::{Category, CategoryId, CategoryTitle, CategoryUpdate},
        errors::DomainError,
        tenant::TenantId,
    },
};

/// Partial update. `None` leaves a field untouched; for `icon_url` and
/// `parent_id`, `Some(None)` clears the stored value.
#[derive(Default)]
pub struct UpdateCategoryCommand {
    pub id: i64,
    pub title: Option<String>,
    pub icon_url: Option<Option<String>>,
    pub parent_id: Option<Option<i64>>,
}

impl CategoryCommandService {
    pub async fn update_category(
        &self,
        tenant: &TenantId,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(command.id)?;
        let mut category = self
            .read_repo
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let UpdateCategoryCommand {
            id: _,
            title,
            icon_url,
            parent_id,
        } = command;

        let title = title.map(CategoryTitle::new).transpose()?;
        let parent_id = parent_id
            .map(|parent| parent.map(CategoryId::new).transpose())
            .transpose()?;

        let mut update = CategoryUpdate::new(tenant.clone(), id, category.updated_at);
        update = self
            .apply_structure_updates(tenant, &mut category, icon_url, parent_id, update)
            .await?;

        let renamed_to = title.filter(|title| *title != category.title);
        if renamed_to.is_none() && update.is_empty() {
            return Ok(category.into());
        }

        let mut attempt = 1;
        loop {
            let mut pending = update.clone();
            if let Some(title) = &renamed_to {
                pending = self.apply_title_update(tenant, &mut category, title, pending).await?;
            }

            match self.write_repo.update(pending).await {
                Ok(updated) => {
                    tracing::info!(
                        tenant = %tenant,
                        category_id = %updated.id,
                        slug = %updated.slug,
                        "category updated"
                    );
                    return Ok(updated.into());
                }
                Err(DomainError::Conflict(reason))
                    if renamed_to.is_some() && attempt < SLUG_ATTEMPTS =>
                {
                    tracing::warn!(
                        tenant = %tenant,
                        category_id = %id,
                        %reason,
                        "update conflicted; reassigning slug"
                    );
                    attempt += 1;
                }
                Err(DomainError::Conflict(_)) if renamed_to.is_some() => {
                    return Err(ApplicationError::conflict(
                        "category slug or record changed concurrently, please retry",
                    ));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn apply_title_update(
        &self,
        tenant: &TenantId,
        category: &mut Category,
        title: &CategoryTitle,
        mut update: CategoryUpdate,
    ) -> ApplicationResult<CategoryUpdate> {
        let slug = self
            .slug_service
            .generate_unique_slug(tenant, title, Some(category.id))
            .await?;
        let now = self.clock.now();
        category.rename(title.clone(), slug.clone(), now);
        update = update.with_title(title.clone()).with_slug(slug);
        update.set_updated_at(category.updated_at);
        Ok(update)
    }

    async fn apply_structure_updates(
        &self,
        tenant: &TenantId,
        category: &mut Category,
        icon_url: Option<Option<String>>,
        parent_id: Option<Option<CategoryId>>,
        mut update: CategoryUpdate,
    ) -> ApplicationResult<CategoryUpdate> {
        if let Some(icon_url) = icon_url.map(normalize_icon_url) {
            if icon_url != category.icon_url {
                category.set_icon(icon_url.clone(), self.clock.now());
                update = update.with_icon_url(icon_url);
                update.set_updated_at(category.updated_at);
            }
        }

        if let Some(parent_id) = parent_id {
            if parent_id != category.parent_id {
                if let Some(new_parent) = parent_id {
                    self.ensure_parent_assignable(tenant, category.id, new_parent)
                        .await?;
                }
                category.set_parent(parent_id, self.clock.now());
                update = update.with_parent(parent_id);
                update.set_updated_at(category.updated_at);
            }
        }

        Ok(update)
    }
}
