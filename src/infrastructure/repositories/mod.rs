// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_category;

pub use error::{map_sqlx, with_timeout};
pub use postgres_category::{PostgresCategoryReadRepository, PostgresCategoryWriteRepository};
