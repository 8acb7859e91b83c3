use async_graphql::{Context, Object, Result};
use marketplace_api_types::{CreateVehicleInput, UpdateVehicleInput, Vehicle, VehicleStatus};
use marketplace_db::vehicles::{MarketDbVehicleOperations, NewVehicle, VehiclePatch};

use crate::{
    conversions::vehicle_from_listing,
    errors,
    query::market_db,
    validation::{require_non_blank, validate_mileage, validate_price, validate_update, validate_year},
};

#[derive(Default)]
pub struct VehicleMutation;

#[Object]
impl VehicleMutation {
    /// Create a vehicle listing, `available` unless a status is given
    async fn create_vehicle(&self, ctx: &Context<'_>, input: CreateVehicleInput) -> Result<Vehicle> {
        let new = NewVehicle {
            title: require_non_blank("title", &input.title)?,
            description: input.description,
            year: validate_year(input.year)?,
            price: validate_price(input.price)?,
            mileage: validate_mileage(input.mileage)?,
            fuel_type: require_non_blank("fuelType", &input.fuel_type)?,
            transmission: require_non_blank("transmission", &input.transmission)?,
            body_type: input.body_type,
            color: input.color,
            condition: input.condition,
            status: input.status.unwrap_or_default().as_db_str().to_string(),
            vendor_id: input.vendor_id,
            brand_id: input.brand_id,
            model_id: input.model_id,
        };

        let db = market_db(ctx)?;
        let listing = db
            .create_vehicle(new)
            .await
            .map_err(|e| errors::db_error("create vehicle", e))?;
        Ok(vehicle_from_listing(listing))
    }

    async fn update_vehicle(&self, ctx: &Context<'_>, id: i32, input: UpdateVehicleInput) -> Result<Vehicle> {
        let patch = VehiclePatch {
            title: validate_update(input.title, |t| require_non_blank("title", &t))?,
            description: input.description,
            year: validate_update(input.year, validate_year)?,
            price: validate_update(input.price, validate_price)?,
            mileage: validate_update(input.mileage, validate_mileage)?,
            fuel_type: input.fuel_type,
            transmission: input.transmission,
            body_type: input.body_type,
            color: input.color,
            condition: input.condition,
            status: input.status.map(|s| s.as_db_str().to_string()),
            vendor_id: input.vendor_id,
            brand_id: input.brand_id,
            model_id: input.model_id,
        };

        let db = market_db(ctx)?;
        let listing = db
            .update_vehicle(id, patch)
            .await
            .map_err(|e| errors::db_error("update vehicle", e))?;
        Ok(vehicle_from_listing(listing))
    }

    async fn update_vehicle_status(&self, ctx: &Context<'_>, id: i32, status: VehicleStatus) -> Result<Vehicle> {
        let db = market_db(ctx)?;
        let listing = db
            .set_vehicle_status(id, status.as_db_str())
            .await
            .map_err(|e| errors::db_error("update vehicle status", e))?;
        Ok(vehicle_from_listing(listing))
    }

    /// Delete a vehicle listing and return it as it was
    async fn delete_vehicle(&self, ctx: &Context<'_>, id: i32) -> Result<Vehicle> {
        let db = market_db(ctx)?;
        let listing = db
            .delete_vehicle(id)
            .await
            .map_err(|e| errors::db_error("delete vehicle", e))?;
        Ok(vehicle_from_listing(listing))
    }
}
