// src/domain/category/mod.rs
pub mod entity;
pub mod hierarchy;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{Category, CategoryUpdate, NewCategory};
pub use hierarchy::{CategoryNode, Hierarchy, IntegrityWarning, MAX_NESTING_DEPTH, build_hierarchy};
pub use repository::{CategoryReadRepository, CategoryWriteRepository};
pub use value_objects::{CategoryId, CategorySlug, CategoryTitle, ProductCountDelta};
