use async_trait::async_trait;
use marketplace_db_entity::customer;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    MarketDbGeneralModelOperations, delete_required,
    db::MarketDb,
    errors::{DbSqlError, Result},
    filters::{CustomerFilter, EntityFilter},
    find_required,
    pagination::{Page, PageRequest, paginate},
    patch::{set_if_truthy, set_some_if_truthy},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
}

#[async_trait]
pub trait MarketDbCustomerOperations {
    async fn get_customer(&self, id: i32) -> Result<Option<customer::Model>>;

    async fn list_customers(&self, filter: &CustomerFilter, page: PageRequest) -> Result<Page<customer::Model>>;

    async fn create_customer(&self, new: NewCustomer) -> Result<customer::Model>;

    async fn update_customer(&self, id: i32, patch: CustomerPatch) -> Result<customer::Model>;

    async fn set_customer_status(&self, id: i32, status: &str) -> Result<customer::Model>;

    async fn delete_customer(&self, id: i32) -> Result<customer::Model>;
}

#[async_trait]
impl MarketDbCustomerOperations for MarketDb {
    async fn get_customer(&self, id: i32) -> Result<Option<customer::Model>> {
        Ok(customer::Entity::find_by_id(id).one(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_customers(&self, filter: &CustomerFilter, page: PageRequest) -> Result<Page<customer::Model>> {
        paginate(self.conn(), filter.select(), customer::Column::Id, page).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_customer(&self, new: NewCustomer) -> Result<customer::Model> {
        let now = chrono::Utc::now();
        Ok(customer::ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            city: Set(new.city),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn())
        .await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_customer(&self, id: i32, patch: CustomerPatch) -> Result<customer::Model> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: customer::ActiveModel =
                        find_required::<customer::Entity, _>(tx.as_ref(), "customer", id)
                            .await?
                            .into();

                    set_if_truthy(&mut active.name, patch.name);
                    set_if_truthy(&mut active.email, patch.email);
                    set_some_if_truthy(&mut active.phone, patch.phone);
                    set_some_if_truthy(&mut active.city, patch.city);
                    set_if_truthy(&mut active.status, patch.status);
                    active.updated_at = Set(chrono::Utc::now());

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn set_customer_status(&self, id: i32, status: &str) -> Result<customer::Model> {
        let mut active: customer::ActiveModel = find_required::<customer::Entity, _>(self.conn(), "customer", id)
            .await?
            .into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_customer(&self, id: i32) -> Result<customer::Model> {
        delete_required::<customer::Entity, _>(self.conn(), "customer", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_customers_by_status_pages_backwards() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let mut ids = Vec::new();
        for i in 0..5 {
            let c = db
                .create_customer(NewCustomer {
                    name: format!("Customer {i}"),
                    email: format!("c{i}@example.com"),
                    status: if i % 2 == 0 { "active" } else { "inactive" }.into(),
                    ..Default::default()
                })
                .await?;
            ids.push(c.id);
        }

        let filter = CustomerFilter {
            status: Some("active".into()),
            ..Default::default()
        };
        let tail = db
            .list_customers(&filter, PageRequest::Backward { last: 2, before: None })
            .await?;
        assert_eq!(tail.total_count, 3);
        assert_eq!(tail.items.iter().map(|c| c.id).collect::<Vec<_>>(), vec![ids[2], ids[4]]);
        assert!(tail.has_previous_page);
        assert!(!tail.has_next_page);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_status_and_delete() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let c = db
            .create_customer(NewCustomer {
                name: "Eve".into(),
                email: "eve@example.com".into(),
                status: "pending".into(),
                ..Default::default()
            })
            .await?;

        let suspended = db.set_customer_status(c.id, "suspended").await?;
        assert_eq!(suspended.status, "suspended");

        let updated = db
            .update_customer(
                c.id,
                CustomerPatch {
                    city: Some("Bremen".into()),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(updated.status, "suspended");
        assert_eq!(updated.city.as_deref(), Some("Bremen"));

        assert_eq!(db.delete_customer(c.id).await?.email, "eve@example.com");
        assert!(db.get_customer(c.id).await?.is_none());

        Ok(())
    }
}
