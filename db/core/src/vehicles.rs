use async_trait::async_trait;
use marketplace_db_entity::{
    conversions::listing_aggregation::{VehicleListing, fetch_vehicle_listings},
    vehicle,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    MarketDbGeneralModelOperations,
    db::MarketDb,
    errors::{DbSqlError, Result},
    filters::{EntityFilter, VehicleFilter},
    find_required,
    pagination::{Page, PageRequest, paginate},
    patch::{set_if_truthy, set_some_if_truthy},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVehicle {
    pub title: String,
    pub description: Option<String>,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub condition: Option<String>,
    pub status: String,
    pub vendor_id: i32,
    pub brand_id: i32,
    pub model_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub mileage: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub vendor_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub model_id: Option<i32>,
}

async fn listing(db: &MarketDb, vehicle: vehicle::Model) -> Result<VehicleListing> {
    let mut listings = fetch_vehicle_listings(db.conn(), vec![vehicle.clone()]).await?;
    Ok(listings.pop().unwrap_or(VehicleListing {
        vehicle,
        brand_name: None,
        model_name: None,
        vendor_name: None,
    }))
}

#[async_trait]
pub trait MarketDbVehicleOperations {
    async fn get_vehicle(&self, id: i32) -> Result<Option<VehicleListing>>;

    /// Lists vehicles with brand, model and vendor names resolved per page.
    async fn list_vehicles(&self, filter: &VehicleFilter, page: PageRequest) -> Result<Page<VehicleListing>>;

    async fn create_vehicle(&self, new: NewVehicle) -> Result<VehicleListing>;

    async fn update_vehicle(&self, id: i32, patch: VehiclePatch) -> Result<VehicleListing>;

    async fn set_vehicle_status(&self, id: i32, status: &str) -> Result<VehicleListing>;

    async fn delete_vehicle(&self, id: i32) -> Result<VehicleListing>;
}

#[async_trait]
impl MarketDbVehicleOperations for MarketDb {
    async fn get_vehicle(&self, id: i32) -> Result<Option<VehicleListing>> {
        match vehicle::Entity::find_by_id(id).one(self.conn()).await? {
            Some(v) => Ok(Some(listing(self, v).await?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_vehicles(&self, filter: &VehicleFilter, page: PageRequest) -> Result<Page<VehicleListing>> {
        let mut page = paginate(self.conn(), filter.select(), vehicle::Column::Id, page).await?;
        let vehicles = std::mem::take(&mut page.items);
        let listings = fetch_vehicle_listings(self.conn(), vehicles).await?;
        Ok(page.with_items(listings))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_vehicle(&self, new: NewVehicle) -> Result<VehicleListing> {
        let now = chrono::Utc::now();
        let created = vehicle::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            year: Set(new.year),
            price: Set(new.price),
            mileage: Set(new.mileage),
            fuel_type: Set(new.fuel_type),
            transmission: Set(new.transmission),
            body_type: Set(new.body_type),
            color: Set(new.color),
            condition: Set(new.condition),
            status: Set(new.status),
            vendor_id: Set(new.vendor_id),
            brand_id: Set(new.brand_id),
            model_id: Set(new.model_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn())
        .await?;
        listing(self, created).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_vehicle(&self, id: i32, patch: VehiclePatch) -> Result<VehicleListing> {
        let updated = self
            .begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: vehicle::ActiveModel =
                        find_required::<vehicle::Entity, _>(tx.as_ref(), "vehicle", id).await?.into();

                    set_if_truthy(&mut active.title, patch.title);
                    set_some_if_truthy(&mut active.description, patch.description);
                    set_if_truthy(&mut active.year, patch.year);
                    set_if_truthy(&mut active.price, patch.price);
                    set_if_truthy(&mut active.mileage, patch.mileage);
                    set_if_truthy(&mut active.fuel_type, patch.fuel_type);
                    set_if_truthy(&mut active.transmission, patch.transmission);
                    set_some_if_truthy(&mut active.body_type, patch.body_type);
                    set_some_if_truthy(&mut active.color, patch.color);
                    set_some_if_truthy(&mut active.condition, patch.condition);
                    set_if_truthy(&mut active.status, patch.status);
                    set_if_truthy(&mut active.vendor_id, patch.vendor_id);
                    set_if_truthy(&mut active.brand_id, patch.brand_id);
                    set_if_truthy(&mut active.model_id, patch.model_id);
                    active.updated_at = Set(chrono::Utc::now());

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await?;
        listing(self, updated).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn set_vehicle_status(&self, id: i32, status: &str) -> Result<VehicleListing> {
        let mut active: vehicle::ActiveModel = find_required::<vehicle::Entity, _>(self.conn(), "vehicle", id)
            .await?
            .into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());
        let updated = active.update(self.conn()).await?;
        listing(self, updated).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_vehicle(&self, id: i32) -> Result<VehicleListing> {
        let existing = find_required::<vehicle::Entity, _>(self.conn(), "vehicle", id).await?;
        let deleted = listing(self, existing).await?;
        vehicle::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{MarketDbCatalogOperations, NewBrand, NewModel},
        vendors::{MarketDbVendorOperations, NewVendor},
    };

    struct Fixture {
        db: MarketDb,
        vendor_id: i32,
        brand_id: i32,
        model_id: i32,
    }

    async fn fixture() -> anyhow::Result<Fixture> {
        let db = MarketDb::new_in_memory().await?;
        let vendor = db
            .create_vendor(NewVendor {
                name: "Rhein Motors".into(),
                email: "info@rhein.example".into(),
                status: "active".into(),
                ..Default::default()
            })
            .await?;
        let brand = db
            .create_brand(NewBrand {
                name: "Skoda".into(),
                status: "active".into(),
                ..Default::default()
            })
            .await?;
        let model = db
            .create_model(NewModel {
                brand_id: brand.id,
                name: "Octavia".into(),
                status: "active".into(),
            })
            .await?;

        Ok(Fixture {
            db,
            vendor_id: vendor.id,
            brand_id: brand.id,
            model_id: model.model.id,
        })
    }

    fn new_vehicle(f: &Fixture, title: &str, year: i32, price: f64) -> NewVehicle {
        NewVehicle {
            title: title.into(),
            year,
            price,
            mileage: 50_000,
            fuel_type: "petrol".into(),
            transmission: "manual".into(),
            status: "available".into(),
            vendor_id: f.vendor_id,
            brand_id: f.brand_id,
            model_id: f.model_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_vehicle_listing_names() -> anyhow::Result<()> {
        let f = fixture().await?;
        let created = f.db.create_vehicle(new_vehicle(&f, "Octavia Combi", 2019, 14_900.0)).await?;

        assert_eq!(created.brand_name.as_deref(), Some("Skoda"));
        assert_eq!(created.model_name.as_deref(), Some("Octavia"));
        assert_eq!(created.vendor_name.as_deref(), Some("Rhein Motors"));

        Ok(())
    }

    #[tokio::test]
    async fn test_vehicles_filtered_by_ranges() -> anyhow::Result<()> {
        let f = fixture().await?;
        f.db.create_vehicle(new_vehicle(&f, "Old", 2008, 3_500.0)).await?;
        f.db.create_vehicle(new_vehicle(&f, "Mid", 2016, 11_000.0)).await?;
        f.db.create_vehicle(new_vehicle(&f, "New", 2023, 29_000.0)).await?;

        let page = f
            .db
            .list_vehicles(
                &VehicleFilter {
                    min_year: Some(2010),
                    max_price: Some(20_000.0),
                    ..Default::default()
                },
                PageRequest::first(10),
            )
            .await?;
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].vehicle.title, "Mid");

        let inverted = f
            .db
            .list_vehicles(
                &VehicleFilter {
                    min_year: Some(2020),
                    max_year: Some(2010),
                    ..Default::default()
                },
                PageRequest::first(10),
            )
            .await?;
        assert_eq!(inverted.total_count, 0);
        assert!(inverted.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_vehicle_keeps_falsy_fields() -> anyhow::Result<()> {
        let f = fixture().await?;
        let created = f.db.create_vehicle(new_vehicle(&f, "Octavia RS", 2020, 24_000.0)).await?;

        let updated = f
            .db
            .update_vehicle(
                created.vehicle.id,
                VehiclePatch {
                    title: Some(String::new()),
                    price: Some(0.0),
                    mileage: Some(61_000),
                    color: Some("blue".into()),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(updated.vehicle.title, "Octavia RS");
        assert_eq!(updated.vehicle.price, 24_000.0);
        assert_eq!(updated.vehicle.mileage, 61_000);
        assert_eq!(updated.vehicle.color.as_deref(), Some("blue"));

        let sold = f.db.set_vehicle_status(created.vehicle.id, "sold").await?;
        assert_eq!(sold.vehicle.status, "sold");

        let deleted = f.db.delete_vehicle(created.vehicle.id).await?;
        assert_eq!(deleted.vehicle.id, created.vehicle.id);
        assert!(f.db.get_vehicle(created.vehicle.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_vehicle_with_unknown_vendor_is_rejected() -> anyhow::Result<()> {
        let f = fixture().await?;
        let result = f
            .db
            .create_vehicle(NewVehicle {
                vendor_id: 999,
                ..new_vehicle(&f, "Ghost", 2020, 1.0)
            })
            .await;

        assert!(result.expect_err("unknown vendor").is_constraint_violation());

        Ok(())
    }
}
