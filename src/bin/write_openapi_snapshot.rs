// src/bin/write_openapi_snapshot.rs
use anyhow::Result;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    category_catalog::presentation::http::openapi::write_openapi_snapshot()?;
    println!(
        "OpenAPI snapshot written to {}",
        category_catalog::presentation::http::openapi::snapshot_path()
    );
    Ok(())
}
