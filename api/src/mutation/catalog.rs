use async_graphql::{Context, Object, Result};
use marketplace_api_types::{
    Brand, CatalogStatus, CreateBrandInput, CreateVehicleModelInput, UpdateBrandInput, UpdateVehicleModelInput,
    VehicleModel,
};
use marketplace_db::catalog::{BrandPatch, MarketDbCatalogOperations, ModelPatch, NewBrand, NewModel};

use crate::{
    conversions::{brand_from_model, vehicle_model_from_listing},
    errors,
    query::market_db,
    validation::{require_non_blank, validate_update},
};

#[derive(Default)]
pub struct CatalogMutation;

#[Object]
impl CatalogMutation {
    async fn create_brand(&self, ctx: &Context<'_>, input: CreateBrandInput) -> Result<Brand> {
        let new = NewBrand {
            name: require_non_blank("name", &input.name)?,
            logo_url: input.logo_url,
            status: input.status.unwrap_or_default().as_db_str().to_string(),
        };

        let db = market_db(ctx)?;
        let brand = db.create_brand(new).await.map_err(|e| errors::db_error("create brand", e))?;
        Ok(brand_from_model(brand))
    }

    async fn update_brand(&self, ctx: &Context<'_>, id: i32, input: UpdateBrandInput) -> Result<Brand> {
        let patch = BrandPatch {
            name: validate_update(input.name, |n| require_non_blank("name", &n))?,
            logo_url: input.logo_url,
            status: input.status.map(|s| s.as_db_str().to_string()),
        };

        let db = market_db(ctx)?;
        let brand = db
            .update_brand(id, patch)
            .await
            .map_err(|e| errors::db_error("update brand", e))?;
        Ok(brand_from_model(brand))
    }

    async fn update_brand_status(&self, ctx: &Context<'_>, id: i32, status: CatalogStatus) -> Result<Brand> {
        let db = market_db(ctx)?;
        let brand = db
            .set_brand_status(id, status.as_db_str())
            .await
            .map_err(|e| errors::db_error("update brand status", e))?;
        Ok(brand_from_model(brand))
    }

    /// Delete a brand. Fails with a constraint violation while models or vehicles refer to it.
    async fn delete_brand(&self, ctx: &Context<'_>, id: i32) -> Result<Brand> {
        let db = market_db(ctx)?;
        let brand = db.delete_brand(id).await.map_err(|e| errors::db_error("delete brand", e))?;
        Ok(brand_from_model(brand))
    }

    async fn create_model(&self, ctx: &Context<'_>, input: CreateVehicleModelInput) -> Result<VehicleModel> {
        let new = NewModel {
            brand_id: input.brand_id,
            name: require_non_blank("name", &input.name)?,
            status: input.status.unwrap_or_default().as_db_str().to_string(),
        };

        let db = market_db(ctx)?;
        let model = db.create_model(new).await.map_err(|e| errors::db_error("create model", e))?;
        Ok(vehicle_model_from_listing(model))
    }

    async fn update_model(&self, ctx: &Context<'_>, id: i32, input: UpdateVehicleModelInput) -> Result<VehicleModel> {
        let patch = ModelPatch {
            brand_id: input.brand_id,
            name: validate_update(input.name, |n| require_non_blank("name", &n))?,
            status: input.status.map(|s| s.as_db_str().to_string()),
        };

        let db = market_db(ctx)?;
        let model = db
            .update_model(id, patch)
            .await
            .map_err(|e| errors::db_error("update model", e))?;
        Ok(vehicle_model_from_listing(model))
    }

    async fn update_model_status(&self, ctx: &Context<'_>, id: i32, status: CatalogStatus) -> Result<VehicleModel> {
        let db = market_db(ctx)?;
        let model = db
            .set_model_status(id, status.as_db_str())
            .await
            .map_err(|e| errors::db_error("update model status", e))?;
        Ok(vehicle_model_from_listing(model))
    }

    async fn delete_model(&self, ctx: &Context<'_>, id: i32) -> Result<VehicleModel> {
        let db = market_db(ctx)?;
        let model = db.delete_model(id).await.map_err(|e| errors::db_error("delete model", e))?;
        Ok(vehicle_model_from_listing(model))
    }
}
