use async_trait::async_trait;
use marketplace_db_entity::vendor;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    MarketDbGeneralModelOperations, delete_required,
    db::MarketDb,
    errors::{DbSqlError, Result},
    filters::{EntityFilter, VendorFilter},
    find_required,
    pagination::{Page, PageRequest, paginate},
    patch::{set_if_truthy, set_some_if_truthy},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVendor {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: String,
    pub organization_id: Option<i32>,
    pub role_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub organization_id: Option<i32>,
    pub role_id: Option<i32>,
    /// Can only raise the flag, use [`MarketDbVendorOperations::set_vendor_verification`] to clear it.
    pub is_verified: Option<bool>,
    pub is_email_verified: Option<bool>,
}

#[async_trait]
pub trait MarketDbVendorOperations {
    async fn get_vendor(&self, id: i32) -> Result<Option<vendor::Model>>;

    async fn list_vendors(&self, filter: &VendorFilter, page: PageRequest) -> Result<Page<vendor::Model>>;

    /// New vendors start unverified.
    async fn create_vendor(&self, new: NewVendor) -> Result<vendor::Model>;

    async fn update_vendor(&self, id: i32, patch: VendorPatch) -> Result<vendor::Model>;

    async fn set_vendor_status(&self, id: i32, status: &str) -> Result<vendor::Model>;

    /// Sets both verification flags explicitly, including clearing them.
    async fn set_vendor_verification(
        &self,
        id: i32,
        is_verified: bool,
        is_email_verified: bool,
    ) -> Result<vendor::Model>;

    async fn delete_vendor(&self, id: i32) -> Result<vendor::Model>;
}

#[async_trait]
impl MarketDbVendorOperations for MarketDb {
    async fn get_vendor(&self, id: i32) -> Result<Option<vendor::Model>> {
        Ok(vendor::Entity::find_by_id(id).one(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_vendors(&self, filter: &VendorFilter, page: PageRequest) -> Result<Page<vendor::Model>> {
        paginate(self.conn(), filter.select(), vendor::Column::Id, page).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_vendor(&self, new: NewVendor) -> Result<vendor::Model> {
        let now = chrono::Utc::now();
        Ok(vendor::ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            address: Set(new.address),
            city: Set(new.city),
            status: Set(new.status),
            is_verified: Set(false),
            is_email_verified: Set(false),
            organization_id: Set(new.organization_id),
            role_id: Set(new.role_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn())
        .await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_vendor(&self, id: i32, patch: VendorPatch) -> Result<vendor::Model> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: vendor::ActiveModel =
                        find_required::<vendor::Entity, _>(tx.as_ref(), "vendor", id).await?.into();

                    set_if_truthy(&mut active.name, patch.name);
                    set_if_truthy(&mut active.email, patch.email);
                    set_some_if_truthy(&mut active.phone, patch.phone);
                    set_some_if_truthy(&mut active.address, patch.address);
                    set_some_if_truthy(&mut active.city, patch.city);
                    set_if_truthy(&mut active.status, patch.status);
                    set_some_if_truthy(&mut active.organization_id, patch.organization_id);
                    set_some_if_truthy(&mut active.role_id, patch.role_id);
                    set_if_truthy(&mut active.is_verified, patch.is_verified);
                    set_if_truthy(&mut active.is_email_verified, patch.is_email_verified);
                    active.updated_at = Set(chrono::Utc::now());

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn set_vendor_status(&self, id: i32, status: &str) -> Result<vendor::Model> {
        let mut active: vendor::ActiveModel = find_required::<vendor::Entity, _>(self.conn(), "vendor", id)
            .await?
            .into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn set_vendor_verification(
        &self,
        id: i32,
        is_verified: bool,
        is_email_verified: bool,
    ) -> Result<vendor::Model> {
        let mut active: vendor::ActiveModel = find_required::<vendor::Entity, _>(self.conn(), "vendor", id)
            .await?
            .into();
        active.is_verified = Set(is_verified);
        active.is_email_verified = Set(is_email_verified);
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_vendor(&self, id: i32) -> Result<vendor::Model> {
        delete_required::<vendor::Entity, _>(self.conn(), "vendor", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_vendor(name: &str, email: &str, city: &str) -> NewVendor {
        NewVendor {
            name: name.into(),
            email: email.into(),
            city: Some(city.into()),
            status: "pending".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_vendor_verification_can_be_cleared() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let vendor = db.create_vendor(new_vendor("Cars4U", "sales@cars4u.example", "Leipzig")).await?;
        assert!(!vendor.is_verified);

        let verified = db
            .update_vendor(
                vendor.id,
                VendorPatch {
                    is_verified: Some(true),
                    ..Default::default()
                },
            )
            .await?;
        assert!(verified.is_verified);

        let unchanged = db
            .update_vendor(
                vendor.id,
                VendorPatch {
                    is_verified: Some(false),
                    ..Default::default()
                },
            )
            .await?;
        assert!(unchanged.is_verified);

        let cleared = db.set_vendor_verification(vendor.id, false, true).await?;
        assert!(!cleared.is_verified);
        assert!(cleared.is_email_verified);

        Ok(())
    }

    #[tokio::test]
    async fn test_vendors_filtered() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let a = db.create_vendor(new_vendor("Nord Autos", "a@nord.example", "Hamburg")).await?;
        db.create_vendor(new_vendor("Sued Autos", "b@sued.example", "Munich")).await?;
        db.set_vendor_status(a.id, "active").await?;

        let active = db
            .list_vendors(
                &VendorFilter {
                    status: Some("active".into()),
                    ..Default::default()
                },
                PageRequest::first(10),
            )
            .await?;
        assert_eq!(active.items.len(), 1);
        assert_eq!(active.items[0].id, a.id);

        let by_city = db
            .list_vendors(
                &VendorFilter {
                    search: Some("Munich".into()),
                    is_verified: Some(false),
                    ..Default::default()
                },
                PageRequest::first(10),
            )
            .await?;
        assert_eq!(by_city.total_count, 1);
        assert_eq!(by_city.items[0].name, "Sued Autos");

        Ok(())
    }
}
