use async_graphql::{Context, Object, Result};
use marketplace_api_types::{Connection, Vehicle, VehicleStatus};
use marketplace_db::{filters::VehicleFilter, vehicles::MarketDbVehicleOperations};

use super::{market_db, page_request};
use crate::{
    conversions::vehicle_from_listing,
    errors,
    pagination::{PageArgs, into_connection},
};

async fn vehicle_connection(ctx: &Context<'_>, filter: VehicleFilter, args: PageArgs) -> Result<Connection<Vehicle>> {
    let db = market_db(ctx)?;
    let request = page_request(ctx, args)?;

    let page = db
        .list_vehicles(&filter, request)
        .await
        .map_err(|e| errors::db_error("list vehicles", e))?;

    into_connection(page, |listing| listing.vehicle.id, |listing| Ok(vehicle_from_listing(listing)))
}

#[derive(Default)]
pub struct VehicleQuery;

#[Object]
impl VehicleQuery {
    /// Retrieve a vehicle listing by id
    async fn vehicle(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Vehicle>> {
        let db = market_db(ctx)?;
        let listing = db
            .get_vehicle(id)
            .await
            .map_err(|e| errors::db_error("get vehicle", e))?;
        Ok(listing.map(vehicle_from_listing))
    }

    /// All vehicle listings ordered by id
    async fn vehicles(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Vehicle>> {
        vehicle_connection(ctx, VehicleFilter::default(), PageArgs::new(first, after, last, before)).await
    }

    /// Vehicle listings narrowed down by any combination of the given predicates
    ///
    /// Absent arguments do not constrain the result. `search` matches title, description
    /// and color.
    #[allow(clippy::too_many_arguments)]
    async fn vehicles_filtered(
        &self,
        ctx: &Context<'_>,
        brand_id: Option<i32>,
        model_id: Option<i32>,
        vendor_id: Option<i32>,
        status: Option<VehicleStatus>,
        min_year: Option<i32>,
        max_year: Option<i32>,
        min_price: Option<f64>,
        max_price: Option<f64>,
        max_mileage: Option<i32>,
        fuel_type: Option<String>,
        transmission: Option<String>,
        body_type: Option<String>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Vehicle>> {
        let filter = VehicleFilter {
            brand_id,
            model_id,
            vendor_id,
            status: status.map(|s| s.as_db_str().to_string()),
            min_year,
            max_year,
            min_price,
            max_price,
            max_mileage,
            fuel_type,
            transmission,
            body_type,
            search,
        };
        vehicle_connection(ctx, filter, PageArgs::new(first, after, last, before)).await
    }
}
