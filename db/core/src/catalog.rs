//! Brands and their vehicle models.

use async_trait::async_trait;
use marketplace_db_entity::{
    brand,
    conversions::listing_aggregation::{ModelListing, fetch_model_listings},
    vehicle_model,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    MarketDbGeneralModelOperations, delete_required,
    db::MarketDb,
    errors::{DbSqlError, Result},
    filters::{BrandFilter, EntityFilter, ModelFilter},
    find_required,
    pagination::{Page, PageRequest, paginate},
    patch::{set_if_truthy, set_some_if_truthy},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBrand {
    pub name: String,
    pub logo_url: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandPatch {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewModel {
    pub brand_id: i32,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelPatch {
    pub brand_id: Option<i32>,
    pub name: Option<String>,
    pub status: Option<String>,
}

async fn model_listing(db: &MarketDb, model: vehicle_model::Model) -> Result<ModelListing> {
    let mut listings = fetch_model_listings(db.conn(), vec![model.clone()]).await?;
    Ok(listings.pop().unwrap_or(ModelListing { model, brand_name: None }))
}

#[async_trait]
pub trait MarketDbCatalogOperations {
    async fn get_brand(&self, id: i32) -> Result<Option<brand::Model>>;

    async fn list_brands(&self, filter: &BrandFilter, page: PageRequest) -> Result<Page<brand::Model>>;

    async fn create_brand(&self, new: NewBrand) -> Result<brand::Model>;

    async fn update_brand(&self, id: i32, patch: BrandPatch) -> Result<brand::Model>;

    async fn set_brand_status(&self, id: i32, status: &str) -> Result<brand::Model>;

    /// Fails with a constraint violation while models or vehicles still reference the brand.
    async fn delete_brand(&self, id: i32) -> Result<brand::Model>;

    async fn get_model(&self, id: i32) -> Result<Option<ModelListing>>;

    async fn list_models(&self, filter: &ModelFilter, page: PageRequest) -> Result<Page<ModelListing>>;

    async fn create_model(&self, new: NewModel) -> Result<ModelListing>;

    async fn update_model(&self, id: i32, patch: ModelPatch) -> Result<ModelListing>;

    async fn set_model_status(&self, id: i32, status: &str) -> Result<ModelListing>;

    async fn delete_model(&self, id: i32) -> Result<ModelListing>;
}

#[async_trait]
impl MarketDbCatalogOperations for MarketDb {
    async fn get_brand(&self, id: i32) -> Result<Option<brand::Model>> {
        Ok(brand::Entity::find_by_id(id).one(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_brands(&self, filter: &BrandFilter, page: PageRequest) -> Result<Page<brand::Model>> {
        paginate(self.conn(), filter.select(), brand::Column::Id, page).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_brand(&self, new: NewBrand) -> Result<brand::Model> {
        let now = chrono::Utc::now();
        Ok(brand::ActiveModel {
            name: Set(new.name),
            logo_url: Set(new.logo_url),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn())
        .await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_brand(&self, id: i32, patch: BrandPatch) -> Result<brand::Model> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: brand::ActiveModel =
                        find_required::<brand::Entity, _>(tx.as_ref(), "brand", id).await?.into();

                    set_if_truthy(&mut active.name, patch.name);
                    set_some_if_truthy(&mut active.logo_url, patch.logo_url);
                    set_if_truthy(&mut active.status, patch.status);
                    active.updated_at = Set(chrono::Utc::now());

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn set_brand_status(&self, id: i32, status: &str) -> Result<brand::Model> {
        let mut active: brand::ActiveModel = find_required::<brand::Entity, _>(self.conn(), "brand", id)
            .await?
            .into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_brand(&self, id: i32) -> Result<brand::Model> {
        delete_required::<brand::Entity, _>(self.conn(), "brand", id).await
    }

    async fn get_model(&self, id: i32) -> Result<Option<ModelListing>> {
        match vehicle_model::Entity::find_by_id(id).one(self.conn()).await? {
            Some(model) => Ok(Some(model_listing(self, model).await?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_models(&self, filter: &ModelFilter, page: PageRequest) -> Result<Page<ModelListing>> {
        let mut page = paginate(self.conn(), filter.select(), vehicle_model::Column::Id, page).await?;
        let models = std::mem::take(&mut page.items);
        let listings = fetch_model_listings(self.conn(), models).await?;
        Ok(page.with_items(listings))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_model(&self, new: NewModel) -> Result<ModelListing> {
        let now = chrono::Utc::now();
        let model = vehicle_model::ActiveModel {
            brand_id: Set(new.brand_id),
            name: Set(new.name),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn())
        .await?;
        model_listing(self, model).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_model(&self, id: i32, patch: ModelPatch) -> Result<ModelListing> {
        let model = self
            .begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: vehicle_model::ActiveModel =
                        find_required::<vehicle_model::Entity, _>(tx.as_ref(), "model", id)
                            .await?
                            .into();

                    set_if_truthy(&mut active.brand_id, patch.brand_id);
                    set_if_truthy(&mut active.name, patch.name);
                    set_if_truthy(&mut active.status, patch.status);
                    active.updated_at = Set(chrono::Utc::now());

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await?;
        model_listing(self, model).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn set_model_status(&self, id: i32, status: &str) -> Result<ModelListing> {
        let mut active: vehicle_model::ActiveModel =
            find_required::<vehicle_model::Entity, _>(self.conn(), "model", id)
                .await?
                .into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());
        let model = active.update(self.conn()).await?;
        model_listing(self, model).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_model(&self, id: i32) -> Result<ModelListing> {
        let model = find_required::<vehicle_model::Entity, _>(self.conn(), "model", id).await?;
        let listing = model_listing(self, model).await?;
        vehicle_model::Entity::delete_by_id(id).exec(self.conn()).await?;
        Ok(listing)
    }
}
