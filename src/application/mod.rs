// src/application/mod.rs
//! Use cases of the catalog. Commands mutate a tenant's categories, queries
//! read them; both speak DTOs to the presentation layer.
pub mod commands;
pub mod dto;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
