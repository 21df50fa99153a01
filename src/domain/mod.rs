// src/domain/mod.rs
pub mod category;
pub mod errors;
pub mod tenant;
