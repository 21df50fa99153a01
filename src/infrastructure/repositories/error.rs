// src/infrastructure/repositories/error.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::{future::Future, time::Duration};

const CNT_CATEGORY_SLUG: &str = "categories_tenant_slug_key";
const CNT_CATEGORY_PRODUCT_COUNT: &str = "categories_product_count_nonnegative_chk";
const CNT_CATEGORY_TITLE: &str = "categories_title_not_blank_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_CATEGORY_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_CATEGORY_PRODUCT_COUNT => {
                        DomainError::Validation("product count cannot be negative".into())
                    }
                    CNT_CATEGORY_TITLE => DomainError::Validation("title is required".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    // numeric_value_out_of_range
                    "22003" => {
                        return DomainError::Validation("value out of range".into());
                    }
                    // serialization_failure, deadlock_detected, too_many_connections
                    "40001" | "40P01" | "53300" => {
                        return DomainError::Transient(db_err.message().to_string());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DomainError::Transient(err.to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Runs a storage call under `limit`, translating an elapsed deadline into
/// [`DomainError::Transient`].
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> DomainResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(map_sqlx),
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "storage call timed out");
            Err(DomainError::Transient(format!(
                "storage call exceeded {}ms",
                limit.as_millis()
            )))
        }
    }
}
