// src/infrastructure/repositories/postgres_category.rs
use super::with_timeout;
use crate::domain::category::{
    Category, CategoryId, CategoryReadRepository, CategorySlug, CategoryTitle, CategoryUpdate,
    CategoryWriteRepository, NewCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tenant::TenantId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::time::Duration;

#[derive(Clone)]
pub struct PostgresCategoryWriteRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresCategoryWriteRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn exists(&self, tenant: &TenantId, id: CategoryId) -> DomainResult<bool> {
        with_timeout(
            self.timeout,
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM categories WHERE tenant = $1 AND id = $2)",
            )
            .bind(tenant.as_str())
            .bind(i64::from(id))
            .fetch_one(&self.pool),
        )
        .await
    }
}

#[derive(Clone)]
pub struct PostgresCategoryReadRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresCategoryReadRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    tenant: String,
    title: String,
    slug: String,
    icon_url: Option<String>,
    parent_id: Option<i64>,
    product_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId::new(row.id)?,
            tenant: TenantId::new(row.tenant)?,
            title: CategoryTitle::new(row.title)?,
            slug: CategorySlug::new(row.slug)?,
            icon_url: row.icon_url,
            parent_id: row.parent_id.map(CategoryId::new).transpose()?,
            product_count: row.product_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl CategoryWriteRepository for PostgresCategoryWriteRepository {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let NewCategory {
            tenant,
            title,
            slug,
            icon_url,
            parent_id,
            created_at,
            updated_at,
        } = category;

        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, CategoryRow>(
                "INSERT INTO categories (tenant, title, slug, icon_url, parent_id, product_count, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
                 RETURNING id, tenant, title, slug, icon_url, parent_id, product_count, created_at, updated_at",
            )
            .bind(tenant.as_str())
            .bind(title.as_str())
            .bind(slug.as_str())
            .bind(icon_url)
            .bind(parent_id.map(i64::from))
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(&self.pool),
        )
        .await?;

        Category::try_from(row)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let CategoryUpdate {
            tenant,
            id,
            title,
            slug,
            icon_url,
            parent_id,
            original_updated_at,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE categories SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }

        if let Some(icon_url) = icon_url {
            builder.push(", icon_url = ");
            builder.push_bind(icon_url);
        }

        if let Some(parent_id) = parent_id {
            builder.push(", parent_id = ");
            builder.push_bind(parent_id.map(i64::from));
        }

        builder.push(" WHERE tenant = ");
        builder.push_bind(tenant.as_str().to_owned());
        builder.push(" AND id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(
            " RETURNING id, tenant, title, slug, icon_url, parent_id, product_count, created_at, updated_at",
        );

        let maybe_row = with_timeout(
            self.timeout,
            builder
                .build_query_as::<CategoryRow>()
                .fetch_optional(&self.pool),
        )
        .await?;

        if let Some(row) = maybe_row {
            return Category::try_from(row);
        }
        if self.exists(&tenant, id).await? {
            Err(DomainError::Conflict(
                "category was modified concurrently, please retry".into(),
            ))
        } else {
            Err(DomainError::NotFound("category not found".into()))
        }
    }

    async fn delete(&self, tenant: &TenantId, id: CategoryId) -> DomainResult<()> {
        let result = with_timeout(
            self.timeout,
            sqlx::query("DELETE FROM categories WHERE tenant = $1 AND id = $2")
                .bind(tenant.as_str())
                .bind(i64::from(id))
                .execute(&self.pool),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("category not found".into()));
        }
        Ok(())
    }

    async fn adjust_product_count(
        &self,
        tenant: &TenantId,
        id: CategoryId,
        delta: i64,
    ) -> DomainResult<Category> {
        let maybe_row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, CategoryRow>(
                "UPDATE categories SET product_count = product_count + $3
                 WHERE tenant = $1 AND id = $2 AND product_count + $3 >= 0
                 RETURNING id, tenant, title, slug, icon_url, parent_id, product_count, created_at, updated_at",
            )
            .bind(tenant.as_str())
            .bind(i64::from(id))
            .bind(delta)
            .fetch_optional(&self.pool),
        )
        .await?;

        if let Some(row) = maybe_row {
            return Category::try_from(row);
        }
        if self.exists(tenant, id).await? {
            Err(DomainError::Validation(
                "product count cannot be negative".into(),
            ))
        } else {
            Err(DomainError::NotFound("category not found".into()))
        }
    }
}

#[async_trait]
impl CategoryReadRepository for PostgresCategoryReadRepository {
    async fn find_by_id(
        &self,
        tenant: &TenantId,
        id: CategoryId,
    ) -> DomainResult<Option<Category>> {
        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, CategoryRow>(
                "SELECT id, tenant, title, slug, icon_url, parent_id, product_count, created_at, updated_at
                 FROM categories WHERE tenant = $1 AND id = $2",
            )
            .bind(tenant.as_str())
            .bind(i64::from(id))
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(Category::try_from).transpose()
    }

    async fn find_by_slug(
        &self,
        tenant: &TenantId,
        slug: &CategorySlug,
    ) -> DomainResult<Option<Category>> {
        let row = with_timeout(
            self.timeout,
            sqlx::query_as::<_, CategoryRow>(
                "SELECT id, tenant, title, slug, icon_url, parent_id, product_count, created_at, updated_at
                 FROM categories WHERE tenant = $1 AND slug = $2",
            )
            .bind(tenant.as_str())
            .bind(slug.as_str())
            .fetch_optional(&self.pool),
        )
        .await?;

        row.map(Category::try_from).transpose()
    }

    async fn list(&self, tenant: &TenantId) -> DomainResult<Vec<Category>> {
        let rows = with_timeout(
            self.timeout,
            sqlx::query_as::<_, CategoryRow>(
                "SELECT id, tenant, title, slug, icon_url, parent_id, product_count, created_at, updated_at
                 FROM categories WHERE tenant = $1 ORDER BY id",
            )
            .bind(tenant.as_str())
            .fetch_all(&self.pool),
        )
        .await?;

        rows.into_iter().map(Category::try_from).collect()
    }
}
