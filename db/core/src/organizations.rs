use async_trait::async_trait;
use marketplace_db_entity::organization;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    MarketDbGeneralModelOperations, delete_required,
    db::MarketDb,
    errors::{DbSqlError, Result},
    filters::{EntityFilter, OrganizationFilter},
    find_required,
    pagination::{Page, PageRequest, paginate},
    patch::{set_if_truthy, set_some_if_truthy},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrganization {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[async_trait]
pub trait MarketDbOrganizationOperations {
    async fn get_organization(&self, id: i32) -> Result<Option<organization::Model>>;

    async fn list_organizations(
        &self,
        filter: &OrganizationFilter,
        page: PageRequest,
    ) -> Result<Page<organization::Model>>;

    async fn create_organization(&self, new: NewOrganization) -> Result<organization::Model>;

    /// Applies the truthy fields of `patch` and refreshes `updated_at`.
    async fn update_organization(&self, id: i32, patch: OrganizationPatch) -> Result<organization::Model>;

    async fn delete_organization(&self, id: i32) -> Result<organization::Model>;
}

#[async_trait]
impl MarketDbOrganizationOperations for MarketDb {
    async fn get_organization(&self, id: i32) -> Result<Option<organization::Model>> {
        Ok(organization::Entity::find_by_id(id).one(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_organizations(
        &self,
        filter: &OrganizationFilter,
        page: PageRequest,
    ) -> Result<Page<organization::Model>> {
        paginate(self.conn(), filter.select(), organization::Column::Id, page).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_organization(&self, new: NewOrganization) -> Result<organization::Model> {
        let now = chrono::Utc::now();
        Ok(organization::ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            address: Set(new.address),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn())
        .await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_organization(&self, id: i32, patch: OrganizationPatch) -> Result<organization::Model> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: organization::ActiveModel =
                        find_required::<organization::Entity, _>(tx.as_ref(), "organization", id)
                            .await?
                            .into();

                    set_if_truthy(&mut active.name, patch.name);
                    set_some_if_truthy(&mut active.email, patch.email);
                    set_some_if_truthy(&mut active.phone, patch.phone);
                    set_some_if_truthy(&mut active.address, patch.address);
                    active.updated_at = Set(chrono::Utc::now());

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_organization(&self, id: i32) -> Result<organization::Model> {
        delete_required::<organization::Entity, _>(self.conn(), "organization", id).await
    }
}
