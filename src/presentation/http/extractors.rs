// src/presentation/http/extractors.rs
use crate::{
    application::error::ApplicationError,
    domain::tenant::TenantId,
};
use axum::{extract::FromRequestParts, http::request::Parts};

use super::error::HttpError;

/// Request header naming the tenant whose catalog is addressed.
pub const TENANT_HEADER: &str = "domain";

#[derive(Debug, Clone)]
pub struct Tenant(pub TenantId);

impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(TENANT_HEADER).ok_or_else(|| {
            HttpError::from_error(ApplicationError::validation("domain header is required"))
        })?;

        let value = header.to_str().map_err(|_| {
            HttpError::from_error(ApplicationError::validation(
                "domain header must be visible ASCII",
            ))
        })?;

        TenantId::new(value)
            .map(Self)
            .map_err(|err| HttpError::from_error(err.into()))
    }
}
