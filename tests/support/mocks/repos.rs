// tests/support/mocks/repos.rs
use async_trait::async_trait;
use category_catalog::domain::category::{
    Category, CategoryId, CategoryReadRepository, CategorySlug, CategoryTitle, CategoryUpdate,
    CategoryWriteRepository, NewCategory,
};
use category_catalog::domain::errors::{DomainError, DomainResult};
use category_catalog::domain::tenant::TenantId;
use chrono::{DateTime, Utc};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: Vec<Category>,
}

impl Store {
    fn slug_taken(&self, tenant: &TenantId, slug: &CategorySlug, except: Option<CategoryId>) -> bool {
        self.rows
            .iter()
            .any(|c| &c.tenant == tenant && &c.slug == slug && Some(c.id) != except)
    }

    fn allocate_id(&mut self) -> CategoryId {
        self.next_id += 1;
        CategoryId::new(self.next_id).expect("positive id")
    }
}

/// In-memory catalog that behaves like the Postgres repositories: per-tenant
/// slug uniqueness, optimistic `updated_at` checks, non-negative counters.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    store: Arc<Mutex<Store>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record verbatim, bypassing every write-time check. Used to
    /// stage inconsistent data such as dangling parents or cycles.
    pub fn seed(&self, category: Category) {
        let mut store = self.store.lock().unwrap();
        store.next_id = store.next_id.max(i64::from(category.id));
        store.rows.push(category);
    }

    pub fn rows(&self) -> Vec<Category> {
        self.store.lock().unwrap().rows.clone()
    }

    pub fn get(&self, id: i64) -> Option<Category> {
        self.rows().into_iter().find(|c| i64::from(c.id) == id)
    }
}

#[async_trait]
impl CategoryWriteRepository for InMemoryCatalog {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut store = self.store.lock().unwrap();
        if store.slug_taken(&category.tenant, &category.slug, None) {
            return Err(DomainError::Conflict(
                "slug already exists for this tenant".into(),
            ));
        }
        let id = store.allocate_id();
        let created = Category {
            id,
            tenant: category.tenant,
            title: category.title,
            slug: category.slug,
            icon_url: category.icon_url,
            parent_id: category.parent_id,
            product_count: 0,
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        store.rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let mut store = self.store.lock().unwrap();
        if let Some(slug) = &update.slug {
            if store.slug_taken(&update.tenant, slug, Some(update.id)) {
                return Err(DomainError::Conflict(
                    "slug already exists for this tenant".into(),
                ));
            }
        }
        let row = store
            .rows
            .iter_mut()
            .find(|c| c.tenant == update.tenant && c.id == update.id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        if row.updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "category was modified concurrently, please retry".into(),
            ));
        }
        if let Some(title) = update.title {
            row.title = title;
        }
        if let Some(slug) = update.slug {
            row.slug = slug;
        }
        if let Some(icon_url) = update.icon_url {
            row.icon_url = icon_url;
        }
        if let Some(parent_id) = update.parent_id {
            row.parent_id = parent_id;
        }
        row.updated_at = update.updated_at;
        Ok(row.clone())
    }

    async fn delete(&self, tenant: &TenantId, id: CategoryId) -> DomainResult<()> {
        let mut store = self.store.lock().unwrap();
        let before = store.rows.len();
        store.rows.retain(|c| !(&c.tenant == tenant && c.id == id));
        if store.rows.len() == before {
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
        let mut store = self.store.lock().unwrap();
        let row = store
            .rows
            .iter_mut()
            .find(|c| &c.tenant == tenant && c.id == id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        let next = row
            .product_count
            .checked_add(delta)
            .ok_or_else(|| DomainError::Validation("value out of range".into()))?;
        if next < 0 {
            return Err(DomainError::Validation(
                "product count cannot be negative".into(),
            ));
        }
        row.product_count = next;
        Ok(row.clone())
    }
}

#[async_trait]
impl CategoryReadRepository for InMemoryCatalog {
    async fn find_by_id(&self, tenant: &TenantId, id: CategoryId) -> DomainResult<Option<Category>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .rows
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
            .store
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|c| &c.tenant == tenant && &c.slug == slug)
            .cloned())
    }

    async fn list(&self, tenant: &TenantId) -> DomainResult<Vec<Category>> {
        let mut rows: Vec<Category> = self
            .store
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|c| &c.tenant == tenant)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.id);
        Ok(rows)
    }
}

/// Write repository that lets a competing writer claim the probed slug right
/// before the first insert and before the first slug-changing update, forcing
/// a conflict at persistence time.
pub struct RacingWriter {
    inner: InMemoryCatalog,
    raced_insert: AtomicBool,
    raced_update: AtomicBool,
}

impl RacingWriter {
    pub fn new(inner: InMemoryCatalog) -> Self {
        Self {
            inner,
            raced_insert: AtomicBool::new(false),
            raced_update: AtomicBool::new(false),
        }
    }

    async fn claim(&self, tenant: &TenantId, slug: &CategorySlug, at: DateTime<Utc>) -> DomainResult<()> {
        let rival = NewCategory {
            tenant: tenant.clone(),
            title: CategoryTitle::new("Rival").expect("title"),
            slug: slug.clone(),
            icon_url: None,
            parent_id: None,
            created_at: at,
            updated_at: at,
        };
        self.inner.insert(rival).await.map(|_| ())
    }
}

#[async_trait]
impl CategoryWriteRepository for RacingWriter {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        if !self.raced_insert.swap(true, Ordering::SeqCst) {
            self.claim(&category.tenant, &category.slug, category.created_at)
                .await?;
        }
        self.inner.insert(category).await
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        if let Some(slug) = &update.slug {
            if !self.raced_update.swap(true, Ordering::SeqCst) {
                self.claim(&update.tenant, slug, update.updated_at).await?;
            }
        }
        self.inner.update(update).await
    }

    async fn delete(&self, tenant: &TenantId, id: CategoryId) -> DomainResult<()> {
        self.inner.delete(tenant, id).await
    }

    async fn adjust_product_count(
        &self,
        tenant: &TenantId,
        id: CategoryId,
        delta: i64,
    ) -> DomainResult<Category> {
        self.inner.adjust_product_count(tenant, id, delta).await
    }
}

/// Write repository whose inserts and updates always collide.
pub struct AlwaysConflictingWriter(pub InMemoryCatalog);

#[async_trait]
impl CategoryWriteRepository for AlwaysConflictingWriter {
    async fn insert(&self, _category: NewCategory) -> DomainResult<Category> {
        Err(DomainError::Conflict(
            "slug already exists for this tenant".into(),
        ))
    }

    async fn update(&self, _update: CategoryUpdate) -> DomainResult<Category> {
        Err(DomainError::Conflict(
            "slug already exists for this tenant".into(),
        ))
    }

    async fn delete(&self, tenant: &TenantId, id: CategoryId) -> DomainResult<()> {
        self.0.delete(tenant, id).await
    }

    async fn adjust_product_count(
        &self,
        tenant: &TenantId,
        id: CategoryId,
        delta: i64,
    ) -> DomainResult<Category> {
        self.0.adjust_product_count(tenant, id, delta).await
    }
}

/// Read repository standing in for a storage backend that is timing out.
pub struct UnavailableStore;

#[async_trait]
impl CategoryReadRepository for UnavailableStore {
    async fn find_by_id(&self, _tenant: &TenantId, _id: CategoryId) -> DomainResult<Option<Category>> {
        Err(DomainError::Transient("storage call timed out".into()))
    }

    async fn find_by_slug(
        &self,
        _tenant: &TenantId,
        _slug: &CategorySlug,
    ) -> DomainResult<Option<Category>> {
        Err(DomainError::Transient("storage call timed out".into()))
    }

    async fn list(&self, _tenant: &TenantId) -> DomainResult<Vec<Category>> {
        Err(DomainError::Transient("storage call timed out".into()))
    }
}
