// src/application/commands/categories/mod.rs
mod create;
mod delete;
mod parent;
mod product_count;
mod service;
mod update;

pub use create::{CreateCategoryCommand, CreateCategoryCommandBuilder};
pub use delete::DeleteCategoryCommand;
pub use product_count::AdjustProductCountCommand;
pub use service::CategoryCommandService;
pub use update::UpdateCategoryCommand;

/// A slug conflict at persistence time means another writer claimed the
/// probed slug; the probe-then-write step is repeated once before giving up.
const SLUG_ATTEMPTS: u32 = 2;

fn normalize_icon_url(value: Option<String>) -> Option<String> {
    value
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}
