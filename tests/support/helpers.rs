// tests/support/helpers.rs
use std::sync::Arc;

use super::mocks::{FixedClock, InMemoryCatalog};
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode};
use category_catalog::application::ports::{time::Clock, util::SlugGenerator};
use category_catalog::application::services::ApplicationServices;
use category_catalog::domain::category::{CategoryReadRepository, CategoryWriteRepository};
use category_catalog::domain::tenant::TenantId;
use category_catalog::infrastructure::util::DefaultSlugGenerator;
use category_catalog::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;

pub const TENANT: &str = "shop.example";

pub fn tenant(name: &str) -> TenantId {
    TenantId::new(name).unwrap()
}

pub fn build_services_with(
    write_repo: Arc<dyn CategoryWriteRepository>,
    read_repo: Arc<dyn CategoryReadRepository>,
) -> Arc<ApplicationServices> {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    Arc::new(ApplicationServices::new(write_repo, read_repo, clock, slugger))
}

pub fn build_services(catalog: &InMemoryCatalog) -> Arc<ApplicationServices> {
    build_services_with(Arc::new(catalog.clone()), Arc::new(catalog.clone()))
}

pub fn router_for(services: Arc<ApplicationServices>) -> axum::Router {
    build_router(HttpState { services }, &[])
}

pub fn make_test_router() -> (axum::Router, InMemoryCatalog) {
    let catalog = InMemoryCatalog::new();
    let router = router_for(build_services(&catalog));
    (router, catalog)
}

pub fn request(method: Method, uri: &str, tenant: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(tenant) = tenant {
        builder = builder.header("domain", tenant);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = body_json(resp).await;
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
