use async_trait::async_trait;
use marketplace_db_entity::app_user;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    MarketDbGeneralModelOperations, delete_required,
    db::MarketDb,
    errors::{DbSqlError, Result},
    filters::{EntityFilter, UserFilter},
    find_required,
    pagination::{Page, PageRequest, paginate},
    patch::{set_if_truthy, set_some_if_truthy},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub role_id: Option<i32>,
    pub organization_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub role_id: Option<i32>,
    pub organization_id: Option<i32>,
}

#[async_trait]
pub trait MarketDbUserOperations {
    async fn get_user(&self, id: i32) -> Result<Option<app_user::Model>>;

    async fn list_users(&self, filter: &UserFilter, page: PageRequest) -> Result<Page<app_user::Model>>;

    async fn create_user(&self, new: NewUser) -> Result<app_user::Model>;

    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<app_user::Model>;

    async fn set_user_status(&self, id: i32, status: &str) -> Result<app_user::Model>;

    async fn delete_user(&self, id: i32) -> Result<app_user::Model>;
}

#[async_trait]
impl MarketDbUserOperations for MarketDb {
    async fn get_user(&self, id: i32) -> Result<Option<app_user::Model>> {
        Ok(app_user::Entity::find_by_id(id).one(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_users(&self, filter: &UserFilter, page: PageRequest) -> Result<Page<app_user::Model>> {
        paginate(self.conn(), filter.select(), app_user::Column::Id, page).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_user(&self, new: NewUser) -> Result<app_user::Model> {
        let now = chrono::Utc::now();
        Ok(app_user::ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            phone: Set(new.phone),
            status: Set(new.status),
            role_id: Set(new.role_id),
            organization_id: Set(new.organization_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn())
        .await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<app_user::Model> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: app_user::ActiveModel =
                        find_required::<app_user::Entity, _>(tx.as_ref(), "user", id).await?.into();

                    set_if_truthy(&mut active.name, patch.name);
                    set_if_truthy(&mut active.email, patch.email);
                    set_some_if_truthy(&mut active.phone, patch.phone);
                    set_if_truthy(&mut active.status, patch.status);
                    set_some_if_truthy(&mut active.role_id, patch.role_id);
                    set_some_if_truthy(&mut active.organization_id, patch.organization_id);
                    active.updated_at = Set(chrono::Utc::now());

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn set_user_status(&self, id: i32, status: &str) -> Result<app_user::Model> {
        let mut active: app_user::ActiveModel = find_required::<app_user::Entity, _>(self.conn(), "user", id)
            .await?
            .into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());
        Ok(active.update(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_user(&self, id: i32) -> Result<app_user::Model> {
        delete_required::<app_user::Entity, _>(self.conn(), "user", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        organizations::{MarketDbOrganizationOperations, NewOrganization},
        roles::{MarketDbRoleOperations, NewRole},
    };

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            status: "active".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_users_by_role_and_status() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let admin = db
            .create_role(NewRole {
                name: "admin".into(),
                ..Default::default()
            })
            .await?;

        db.create_user(NewUser {
            role_id: Some(admin.id),
            ..new_user("Ana", "ana@example.com")
        })
        .await?;
        let bob = db.create_user(new_user("Bob", "bob@example.com")).await?;
        db.set_user_status(bob.id, "suspended").await?;

        let by_role = db
            .list_users(
                &UserFilter {
                    role_id: Some(admin.id),
                    ..Default::default()
                },
                PageRequest::first(10),
            )
            .await?;
        assert_eq!(by_role.total_count, 1);
        assert_eq!(by_role.items[0].name, "Ana");

        let suspended = db
            .list_users(
                &UserFilter {
                    status: Some("suspended".into()),
                    ..Default::default()
                },
                PageRequest::first(10),
            )
            .await?;
        assert_eq!(suspended.items.len(), 1);
        assert_eq!(suspended.items[0].id, bob.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_applies_only_truthy_fields() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let org = db
            .create_organization(NewOrganization {
                name: "HQ".into(),
                ..Default::default()
            })
            .await?;
        let user = db.create_user(new_user("Cleo", "cleo@example.com")).await?;

        let updated = db
            .update_user(
                user.id,
                UserPatch {
                    email: Some(String::new()),
                    organization_id: Some(org.id),
                    role_id: Some(0),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(updated.email, "cleo@example.com");
        assert_eq!(updated.organization_id, Some(org.id));
        assert_eq!(updated.role_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        db.create_user(new_user("Dan", "dan@example.com")).await?;

        let err = db
            .create_user(new_user("Daniel", "dan@example.com"))
            .await
            .expect_err("email is unique");
        assert!(err.is_constraint_violation());

        Ok(())
    }
}
