//! Roles and their permissions

use async_graphql::{Context, Object, Result};
use marketplace_api_types::{
    AbilityVerb, CreatePermissionInput, CreateRoleInput, Permission, PermissionInput, Role, UpdatePermissionInput,
    UpdateRoleInput,
};
use marketplace_db::{
    db::MarketDb,
    roles::{MarketDbRoleOperations, NewRole, PermissionPatch, PermissionSpec, RolePatch},
};
use marketplace_db_entity::role;

use crate::{
    conversions::{permission_from_model, role_from_model},
    errors,
    query::market_db,
    validation::{require_non_blank, validate_subjects, validate_update},
};

fn ability_strings(abilities: Vec<AbilityVerb>) -> Vec<String> {
    abilities.iter().map(|a| a.as_db_str().to_string()).collect()
}

fn permission_spec(input: PermissionInput) -> Result<PermissionSpec> {
    Ok(PermissionSpec {
        name: require_non_blank("permissions.name", &input.name)?,
        subjects: validate_subjects(input.subjects)?,
    })
}

async fn role_with_permissions(db: &MarketDb, role: role::Model) -> Result<Role> {
    let mut permissions = db
        .permissions_for_roles(vec![role.id])
        .await
        .map_err(|e| errors::db_error("get role permissions", e))?;
    let role_permissions = permissions.remove(&role.id).unwrap_or_default();
    Ok(role_from_model(role, role_permissions))
}

#[derive(Default)]
pub struct AccessMutation;

#[Object]
impl AccessMutation {
    /// Create a role with its ability verbs and an optional initial permission set
    async fn create_role(&self, ctx: &Context<'_>, input: CreateRoleInput) -> Result<Role> {
        let new = NewRole {
            name: require_non_blank("name", &input.name)?,
            abilities: ability_strings(input.abilities),
            permissions: input
                .permissions
                .into_iter()
                .map(permission_spec)
                .collect::<Result<Vec<_>>>()?,
        };

        let db = market_db(ctx)?;
        let role = db.create_role(new).await.map_err(|e| errors::db_error("create role", e))?;
        role_with_permissions(db, role).await
    }

    /// Rename a role or replace its ability verbs. An empty verb list keeps the stored verbs.
    async fn update_role(&self, ctx: &Context<'_>, id: i32, input: UpdateRoleInput) -> Result<Role> {
        let patch = RolePatch {
            name: validate_update(input.name, |n| require_non_blank("name", &n))?,
            abilities: input.abilities.map(ability_strings),
        };

        let db = market_db(ctx)?;
        let role = db
            .update_role(id, patch)
            .await
            .map_err(|e| errors::db_error("update role", e))?;
        role_with_permissions(db, role).await
    }

    /// Delete a role together with its permissions
    async fn delete_role(&self, ctx: &Context<'_>, id: i32) -> Result<Role> {
        let db = market_db(ctx)?;
        let mut permissions = db
            .permissions_for_roles(vec![id])
            .await
            .map_err(|e| errors::db_error("get role permissions", e))?;
        let role = db.delete_role(id).await.map_err(|e| errors::db_error("delete role", e))?;
        Ok(role_from_model(role, permissions.remove(&id).unwrap_or_default()))
    }

    /// Replace the permission set of a role atomically
    async fn set_role_permissions(
        &self,
        ctx: &Context<'_>,
        role_id: i32,
        permissions: Vec<PermissionInput>,
    ) -> Result<Role> {
        let specs = permissions
            .into_iter()
            .map(permission_spec)
            .collect::<Result<Vec<_>>>()?;

        let db = market_db(ctx)?;
        let inserted = db
            .set_role_permissions(role_id, specs)
            .await
            .map_err(|e| errors::db_error("set role permissions", e))?;

        let role = db
            .get_role(role_id)
            .await
            .map_err(|e| errors::db_error("get role", e))?
            .ok_or_else(|| errors::not_found("role", role_id))?;
        Ok(role_from_model(role, inserted))
    }

    async fn create_permission(&self, ctx: &Context<'_>, input: CreatePermissionInput) -> Result<Permission> {
        let spec = PermissionSpec {
            name: require_non_blank("name", &input.name)?,
            subjects: validate_subjects(input.subjects)?,
        };

        let db = market_db(ctx)?;
        let permission = db
            .create_permission(input.role_id, spec)
            .await
            .map_err(|e| errors::db_error("create permission", e))?;
        Ok(permission_from_model(permission))
    }

    async fn update_permission(&self, ctx: &Context<'_>, id: i32, input: UpdatePermissionInput) -> Result<Permission> {
        let patch = PermissionPatch {
            name: validate_update(input.name, |n| require_non_blank("name", &n))?,
            subjects: input.subjects.map(validate_subjects).transpose()?,
        };

        let db = market_db(ctx)?;
        let permission = db
            .update_permission(id, patch)
            .await
            .map_err(|e| errors::db_error("update permission", e))?;
        Ok(permission_from_model(permission))
    }

    async fn delete_permission(&self, ctx: &Context<'_>, id: i32) -> Result<Permission> {
        let db = market_db(ctx)?;
        let permission = db
            .delete_permission(id)
            .await
            .map_err(|e| errors::db_error("delete permission", e))?;
        Ok(permission_from_model(permission))
    }
}
