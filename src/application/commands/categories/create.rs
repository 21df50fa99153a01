// src/application/commands/categories/create.rs
use super::{CategoryCommandService, SLUG_ATTEMPTS, normalize_icon_url};
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::{CategoryId, CategoryTitle, NewCategory},
        errors::DomainError,
        tenant::TenantId,
    },
};

pub struct CreateCategoryCommand {
    pub title: String,
    pub icon_url: Option<String>,
    pub parent_id: Option<i64>,
}

impl CreateCategoryCommand {
    pub fn builder() -> CreateCategoryCommandBuilder {
        CreateCategoryCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateCategoryCommandBuilder {
    title: Option<String>,
    icon_url: Option<String>,
    parent_id: Option<i64>,
}

impl CreateCategoryCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn parent_id(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn build(self) -> Result<CreateCategoryCommand, &'static str> {
        Ok(CreateCategoryCommand {
            title: self.title.ok_or("title is required")?,
            icon_url: self.icon_url,
            parent_id: self.parent_id,
        })
    }
}

impl CategoryCommandService {
    pub async fn create_category(
        &self,
        tenant: &TenantId,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let title = CategoryTitle::new(command.title)?;
        let parent_id = command.parent_id.map(CategoryId::new).transpose()?;
        if let Some(parent_id) = parent_id {
            self.ensure_parent_exists(tenant, parent_id).await?;
        }
        let icon_url = normalize_icon_url(command.icon_url);
        let now = self.clock.now();

        let mut attempt = 1;
        loop {
            let slug = self
                .slug_service
                .generate_unique_slug(tenant, &title, None)
                .await?;

            let new_category = NewCategory {
                tenant: tenant.clone(),
                title: title.clone(),
                slug: slug.clone(),
                icon_url: icon_url.clone(),
                parent_id,
                created_at: now,
                updated_at: now,
            };

            match self.write_repo.insert(new_category).await {
                Ok(created) => {
                    tracing::info!(
                        tenant = %tenant,
                        category_id = %created.id,
                        slug = %created.slug,
                        "category created"
                    );
                    return Ok(created.into());
                }
                Err(DomainError::Conflict(reason)) if attempt < SLUG_ATTEMPTS => {
                    tracing::warn!(
                        tenant = %tenant,
                        slug = %slug,
                        %reason,
                        "slug claimed concurrently; reassigning"
                    );
                    attempt += 1;
                }
                Err(DomainError::Conflict(_)) => {
                    return Err(ApplicationError::conflict(format!(
                        "slug `{slug}` was claimed concurrently, please retry"
                    )));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
