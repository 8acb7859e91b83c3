//! Listing aggregation with batched relation lookups
//!
//! The admin grids show brand, model and vendor names next to every vehicle and
//! the brand name next to every model. Instead of one lookup per row, the related
//! names for a whole page are loaded with a single `IN` query per relation.

use std::collections::{HashMap, HashSet};

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::codegen::{brand, vehicle, vehicle_model, vendor};

/// Vehicle row together with the display names of its relations
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleListing {
    pub vehicle: vehicle::Model,
    pub brand_name: Option<String>,
    pub model_name: Option<String>,
    pub vendor_name: Option<String>,
}

/// Vehicle model row together with its brand name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelListing {
    pub model: vehicle_model::Model,
    pub brand_name: Option<String>,
}

fn unique_ids(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    ids.collect::<HashSet<_>>().into_iter().collect()
}

async fn brand_names<C: ConnectionTrait>(db: &C, ids: Vec<i32>) -> Result<HashMap<i32, String>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    Ok(brand::Entity::find()
        .filter(brand::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|b| (b.id, b.name))
        .collect())
}

/// Attach brand, model and vendor names to a page of vehicles
///
/// Uses at most three queries regardless of the page size. The order of the
/// input rows is preserved.
pub async fn fetch_vehicle_listings<C: ConnectionTrait>(
    db: &C,
    vehicles: Vec<vehicle::Model>,
) -> Result<Vec<VehicleListing>, DbErr> {
    if vehicles.is_empty() {
        return Ok(Vec::new());
    }

    let brands = brand_names(db, unique_ids(vehicles.iter().map(|v| v.brand_id))).await?;

    let models: HashMap<i32, String> = vehicle_model::Entity::find()
        .filter(vehicle_model::Column::Id.is_in(unique_ids(vehicles.iter().map(|v| v.model_id))))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let vendors: HashMap<i32, String> = vendor::Entity::find()
        .filter(vendor::Column::Id.is_in(unique_ids(vehicles.iter().map(|v| v.vendor_id))))
        .all(db)
        .await?
        .into_iter()
        .map(|v| (v.id, v.name))
        .collect();

    Ok(vehicles
        .into_iter()
        .map(|vehicle| VehicleListing {
            brand_name: brands.get(&vehicle.brand_id).cloned(),
            model_name: models.get(&vehicle.model_id).cloned(),
            vendor_name: vendors.get(&vehicle.vendor_id).cloned(),
            vehicle,
        })
        .collect())
}

/// Attach brand names to a page of vehicle models
pub async fn fetch_model_listings<C: ConnectionTrait>(
    db: &C,
    models: Vec<vehicle_model::Model>,
) -> Result<Vec<ModelListing>, DbErr> {
    let brands = brand_names(db, unique_ids(models.iter().map(|m| m.brand_id))).await?;

    Ok(models
        .into_iter()
        .map(|model| ModelListing {
            brand_name: brands.get(&model.brand_id).cloned(),
            model,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, Set};

    use super::*;

    #[tokio::test]
    async fn test_fetch_vehicle_listings_resolves_names() -> anyhow::Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await?;

        let now = chrono::Utc::now();
        let brand = brand::ActiveModel {
            name: Set("Toyota".to_string()),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        let model = vehicle_model::ActiveModel {
            brand_id: Set(brand.id),
            name: Set("Corolla".to_string()),
            status: Set("active".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        let vendor = vendor::ActiveModel {
            name: Set("Cedar Motors".to_string()),
            email: Set("sales@cedar.example".to_string()),
            status: Set("active".to_string()),
            is_verified: Set(true),
            is_email_verified: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        let vehicle = vehicle::ActiveModel {
            title: Set("Corolla 1.8 Hybrid".to_string()),
            year: Set(2021),
            price: Set(21500.0),
            mileage: Set(32000),
            fuel_type: Set("hybrid".to_string()),
            transmission: Set("automatic".to_string()),
            status: Set("available".to_string()),
            vendor_id: Set(vendor.id),
            brand_id: Set(brand.id),
            model_id: Set(model.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let listings = fetch_vehicle_listings(&db, vec![vehicle.clone()]).await?;

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].vehicle, vehicle);
        assert_eq!(listings[0].brand_name.as_deref(), Some("Toyota"));
        assert_eq!(listings[0].model_name.as_deref(), Some("Corolla"));
        assert_eq!(listings[0].vendor_name.as_deref(), Some("Cedar Motors"));

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_model_listings_empty_input() -> anyhow::Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await?;

        let listings = fetch_model_listings(&db, Vec::new()).await?;
        assert!(listings.is_empty());

        Ok(())
    }
}
