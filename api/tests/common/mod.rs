//! Common test utilities for API integration tests
//!
//! Every test gets its own in-memory SQLite database with migrations applied, a schema
//! built on top of it, and helpers to seed the catalog and accounts directly through the
//! database layer.

#![allow(dead_code)]

use async_graphql::{Request, Variables};
use axum::Router;
use marketplace_api::{
    config::{ApiConfig, PaginationConfig},
    schema::{MarketplaceSchema, build_schema},
    server::build_app,
};
use marketplace_db::{
    catalog::{MarketDbCatalogOperations, NewBrand, NewModel},
    customers::{MarketDbCustomerOperations, NewCustomer},
    db::MarketDb,
    vehicles::{MarketDbVehicleOperations, NewVehicle},
    vendors::{MarketDbVendorOperations, NewVendor},
};
use serde_json::Value;

pub struct TestContext {
    pub db: MarketDb,
    pub schema: MarketplaceSchema,
}

pub async fn setup() -> anyhow::Result<TestContext> {
    setup_with_pagination(PaginationConfig::default()).await
}

pub async fn setup_with_pagination(pagination: PaginationConfig) -> anyhow::Result<TestContext> {
    let db = MarketDb::new_in_memory().await?;
    let schema = build_schema(db.clone(), pagination);
    Ok(TestContext { db, schema })
}

/// Builds the full HTTP router over a fresh in-memory database
pub async fn setup_app(playground_enabled: bool) -> anyhow::Result<Router> {
    let db = MarketDb::new_in_memory().await?;
    let config = ApiConfig {
        playground_enabled,
        ..Default::default()
    };
    Ok(build_app(db, &config))
}

/// Executes a GraphQL document and returns the whole response as JSON
pub async fn execute_raw(schema: &MarketplaceSchema, query: &str, variables: Value) -> anyhow::Result<Value> {
    let response = schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await;
    Ok(serde_json::to_value(&response)?)
}

/// Executes a GraphQL document and returns its data, failing on any GraphQL error
pub async fn execute(schema: &MarketplaceSchema, query: &str, variables: Value) -> anyhow::Result<Value> {
    let response = execute_raw(schema, query, variables).await?;
    if let Some(errors) = response.get("errors") {
        anyhow::bail!("unexpected GraphQL errors: {errors}");
    }
    Ok(response["data"].clone())
}

/// Executes a GraphQL document that must fail and returns the `code` extension of the first error
pub async fn execute_error_code(schema: &MarketplaceSchema, query: &str, variables: Value) -> anyhow::Result<String> {
    let response = execute_raw(schema, query, variables).await?;
    response["errors"][0]["extensions"]["code"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("expected an error with a code, got {response}"))
}

/// Node ids of a connection in edge order
pub fn node_ids(connection: &Value) -> Vec<i64> {
    connection["edges"]
        .as_array()
        .map(|edges| edges.iter().filter_map(|e| e["node"]["id"].as_i64()).collect())
        .unwrap_or_default()
}

pub struct Catalog {
    pub brand_id: i32,
    pub model_id: i32,
    pub vendor_id: i32,
}

/// Seeds one brand with one model and one active vendor
pub async fn seed_catalog(db: &MarketDb) -> anyhow::Result<Catalog> {
    let brand = db
        .create_brand(NewBrand {
            name: "Toyota".into(),
            logo_url: None,
            status: "active".into(),
        })
        .await?;
    let model = db
        .create_model(NewModel {
            brand_id: brand.id,
            name: "Corolla".into(),
            status: "active".into(),
        })
        .await?;
    let vendor = seed_vendor(db, "City Motors", "sales@citymotors.test", "active").await?;

    Ok(Catalog {
        brand_id: brand.id,
        model_id: model.model.id,
        vendor_id: vendor,
    })
}

pub async fn seed_vendor(db: &MarketDb, name: &str, email: &str, status: &str) -> anyhow::Result<i32> {
    let vendor = db
        .create_vendor(NewVendor {
            name: name.into(),
            email: email.into(),
            phone: None,
            address: None,
            city: Some("Lyon".into()),
            status: status.into(),
            organization_id: None,
            role_id: None,
        })
        .await?;
    Ok(vendor.id)
}

pub async fn seed_customer(db: &MarketDb, name: &str, email: &str, status: &str) -> anyhow::Result<i32> {
    let customer = db
        .create_customer(NewCustomer {
            name: name.into(),
            email: email.into(),
            phone: None,
            city: None,
            status: status.into(),
        })
        .await?;
    Ok(customer.id)
}

/// Seeds a vehicle of the catalog's brand, model and vendor
pub async fn seed_vehicle(db: &MarketDb, catalog: &Catalog, title: &str, year: i32, price: f64) -> anyhow::Result<i32> {
    let listing = db
        .create_vehicle(NewVehicle {
            title: title.into(),
            description: None,
            year,
            price,
            mileage: 10_000,
            fuel_type: "petrol".into(),
            transmission: "manual".into(),
            body_type: None,
            color: None,
            condition: None,
            status: "available".into(),
            vendor_id: catalog.vendor_id,
            brand_id: catalog.brand_id,
            model_id: catalog.model_id,
        })
        .await?;
    Ok(listing.vehicle.id)
}
