use async_graphql::{Context, Object, Result};
use marketplace_api_types::{Brand, CatalogStatus, Connection, VehicleModel};
use marketplace_db::{
    catalog::MarketDbCatalogOperations,
    filters::{BrandFilter, ModelFilter},
};

use super::{market_db, page_request};
use crate::{
    conversions::{brand_from_model, vehicle_model_from_listing},
    errors,
    pagination::{PageArgs, into_connection},
};

#[derive(Default)]
pub struct CatalogQuery;

#[Object]
impl CatalogQuery {
    async fn brand(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Brand>> {
        let db = market_db(ctx)?;
        let brand = db.get_brand(id).await.map_err(|e| errors::db_error("get brand", e))?;
        Ok(brand.map(brand_from_model))
    }

    /// Brands, optionally narrowed by status and a name search
    async fn brands(
        &self,
        ctx: &Context<'_>,
        status: Option<CatalogStatus>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Brand>> {
        let db = market_db(ctx)?;
        let request = page_request(ctx, PageArgs::new(first, after, last, before))?;
        let filter = BrandFilter {
            status: status.map(|s| s.as_db_str().to_string()),
            search,
        };

        let page = db
            .list_brands(&filter, request)
            .await
            .map_err(|e| errors::db_error("list brands", e))?;

        into_connection(page, |b| b.id, |b| Ok(brand_from_model(b)))
    }

    /// Retrieve a vehicle model by id, including its brand name
    async fn model(&self, ctx: &Context<'_>, id: i32) -> Result<Option<VehicleModel>> {
        let db = market_db(ctx)?;
        let model = db.get_model(id).await.map_err(|e| errors::db_error("get model", e))?;
        Ok(model.map(vehicle_model_from_listing))
    }

    /// Vehicle models, optionally narrowed by brand, status and a name search
    #[allow(clippy::too_many_arguments)]
    async fn models(
        &self,
        ctx: &Context<'_>,
        brand_id: Option<i32>,
        status: Option<CatalogStatus>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<VehicleModel>> {
        let db = market_db(ctx)?;
        let request = page_request(ctx, PageArgs::new(first, after, last, before))?;
        let filter = ModelFilter {
            brand_id,
            status: status.map(|s| s.as_db_str().to_string()),
            search,
        };

        let page = db
            .list_models(&filter, request)
            .await
            .map_err(|e| errors::db_error("list models", e))?;

        into_connection(page, |m| m.model.id, |m| Ok(vehicle_model_from_listing(m)))
    }
}
