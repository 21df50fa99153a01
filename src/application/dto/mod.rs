// src/application/dto/mod.rs
pub mod categories;

pub use categories::{CategoryDto, CategoryTreeDto};
