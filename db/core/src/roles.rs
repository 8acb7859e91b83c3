use std::collections::HashMap;

use async_trait::async_trait;
use marketplace_db_entity::{conversions::lists::join_list, permission, role};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    MarketDbGeneralModelOperations, delete_required,
    db::MarketDb,
    errors::{DbSqlError, Result},
    filters::{EntityFilter, PermissionFilter, RoleFilter},
    find_required,
    pagination::{Page, PageRequest, paginate},
    patch::{set_if_truthy, truthy},
};

/// Permission as granted to a role: a name and the subjects it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSpec {
    pub name: String,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    pub abilities: Vec<String>,
    pub permissions: Vec<PermissionSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePatch {
    pub name: Option<String>,
    pub abilities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionPatch {
    pub name: Option<String>,
    pub subjects: Option<Vec<String>>,
}

async fn insert_permission<C: ConnectionTrait>(db: &C, role_id: i32, spec: PermissionSpec) -> Result<permission::Model> {
    Ok(permission::ActiveModel {
        role_id: Set(role_id),
        name: Set(spec.name),
        subjects: Set(join_list(spec.subjects)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

async fn insert_permissions<C: ConnectionTrait>(
    db: &C,
    role_id: i32,
    specs: Vec<PermissionSpec>,
) -> Result<Vec<permission::Model>> {
    let mut inserted = Vec::with_capacity(specs.len());
    for spec in specs {
        inserted.push(insert_permission(db, role_id, spec).await?);
    }
    Ok(inserted)
}

#[async_trait]
pub trait MarketDbRoleOperations {
    async fn get_role(&self, id: i32) -> Result<Option<role::Model>>;

    async fn list_roles(&self, filter: &RoleFilter, page: PageRequest) -> Result<Page<role::Model>>;

    /// Inserts the role together with its permissions in one transaction.
    async fn create_role(&self, new: NewRole) -> Result<role::Model>;

    async fn update_role(&self, id: i32, patch: RolePatch) -> Result<role::Model>;

    /// Deletes the role. Its permissions are removed by the cascading foreign key.
    async fn delete_role(&self, id: i32) -> Result<role::Model>;

    async fn get_permission(&self, id: i32) -> Result<Option<permission::Model>>;

    async fn list_permissions(&self, filter: &PermissionFilter, page: PageRequest) -> Result<Page<permission::Model>>;

    async fn create_permission(&self, role_id: i32, spec: PermissionSpec) -> Result<permission::Model>;

    async fn update_permission(&self, id: i32, patch: PermissionPatch) -> Result<permission::Model>;

    async fn delete_permission(&self, id: i32) -> Result<permission::Model>;

    /// Replaces the whole permission set of a role atomically.
    async fn set_role_permissions(&self, role_id: i32, specs: Vec<PermissionSpec>) -> Result<Vec<permission::Model>>;

    /// Loads the permissions of several roles with a single query, keyed by role id.
    async fn permissions_for_roles(&self, role_ids: Vec<i32>) -> Result<HashMap<i32, Vec<permission::Model>>>;
}

#[async_trait]
impl MarketDbRoleOperations for MarketDb {
    async fn get_role(&self, id: i32) -> Result<Option<role::Model>> {
        Ok(role::Entity::find_by_id(id).one(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_roles(&self, filter: &RoleFilter, page: PageRequest) -> Result<Page<role::Model>> {
        paginate(self.conn(), filter.select(), role::Column::Id, page).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_role(&self, new: NewRole) -> Result<role::Model> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let now = chrono::Utc::now();
                    let role = role::ActiveModel {
                        name: Set(new.name),
                        ability: Set(join_list(new.abilities)),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(tx.as_ref())
                    .await?;

                    insert_permissions(tx.as_ref(), role.id, new.permissions).await?;

                    Ok::<_, DbSqlError>(role)
                })
            })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_role(&self, id: i32, patch: RolePatch) -> Result<role::Model> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: role::ActiveModel =
                        find_required::<role::Entity, _>(tx.as_ref(), "role", id).await?.into();

                    set_if_truthy(&mut active.name, patch.name);
                    if let Some(abilities) = truthy(patch.abilities) {
                        active.ability = Set(join_list(abilities));
                    }
                    active.updated_at = Set(chrono::Utc::now());

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_role(&self, id: i32) -> Result<role::Model> {
        delete_required::<role::Entity, _>(self.conn(), "role", id).await
    }

    async fn get_permission(&self, id: i32) -> Result<Option<permission::Model>> {
        Ok(permission::Entity::find_by_id(id).one(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_permissions(&self, filter: &PermissionFilter, page: PageRequest) -> Result<Page<permission::Model>> {
        paginate(self.conn(), filter.select(), permission::Column::Id, page).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn create_permission(&self, role_id: i32, spec: PermissionSpec) -> Result<permission::Model> {
        find_required::<role::Entity, _>(self.conn(), "role", role_id).await?;

        insert_permission(self.conn(), role_id, spec).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn update_permission(&self, id: i32, patch: PermissionPatch) -> Result<permission::Model> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut active: permission::ActiveModel =
                        find_required::<permission::Entity, _>(tx.as_ref(), "permission", id)
                            .await?
                            .into();

                    set_if_truthy(&mut active.name, patch.name);
                    if let Some(subjects) = truthy(patch.subjects) {
                        active.subjects = Set(join_list(subjects));
                    }

                    Ok::<_, DbSqlError>(active.update(tx.as_ref()).await?)
                })
            })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_permission(&self, id: i32) -> Result<permission::Model> {
        delete_required::<permission::Entity, _>(self.conn(), "permission", id).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn set_role_permissions(&self, role_id: i32, specs: Vec<PermissionSpec>) -> Result<Vec<permission::Model>> {
        self.begin_transaction()
            .await?
            .perform(|tx| {
                Box::pin(async move {
                    let mut role: role::ActiveModel =
                        find_required::<role::Entity, _>(tx.as_ref(), "role", role_id).await?.into();

                    let removed = permission::Entity::delete_many()
                        .filter(permission::Column::RoleId.eq(role_id))
                        .exec(tx.as_ref())
                        .await?
                        .rows_affected;

                    let inserted = insert_permissions(tx.as_ref(), role_id, specs).await?;

                    role.updated_at = Set(chrono::Utc::now());
                    role.update(tx.as_ref()).await?;

                    tracing::debug!(role_id, removed, inserted = inserted.len(), "replaced role permissions");
                    Ok::<_, DbSqlError>(inserted)
                })
            })
            .await
    }

    async fn permissions_for_roles(&self, role_ids: Vec<i32>) -> Result<HashMap<i32, Vec<permission::Model>>> {
        if role_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let permissions = permission::Entity::find()
            .filter(permission::Column::RoleId.is_in(role_ids))
            .order_by_asc(permission::Column::Id)
            .all(self.conn())
            .await?;

        let mut grouped: HashMap<i32, Vec<permission::Model>> = HashMap::new();
        for p in permissions {
            grouped.entry(p.role_id).or_default().push(p);
        }
        Ok(grouped)
    }
}
