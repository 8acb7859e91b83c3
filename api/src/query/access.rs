use async_graphql::{Context, Object, Result};
use marketplace_api_types::{Connection, Permission, Role};
use marketplace_db::{
    filters::{PermissionFilter, RoleFilter},
    roles::MarketDbRoleOperations,
};

use super::{market_db, page_request};
use crate::{
    conversions::{permission_from_model, role_from_model},
    errors,
    pagination::{PageArgs, into_connection},
};

#[derive(Default)]
pub struct AccessQuery;

#[Object]
impl AccessQuery {
    /// Retrieve a role with its permissions
    async fn role(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Role>> {
        let db = market_db(ctx)?;
        let Some(role) = db.get_role(id).await.map_err(|e| errors::db_error("get role", e))? else {
            return Ok(None);
        };

        let mut permissions = db
            .permissions_for_roles(vec![role.id])
            .await
            .map_err(|e| errors::db_error("get role permissions", e))?;

        let role_permissions = permissions.remove(&role.id).unwrap_or_default();
        Ok(Some(role_from_model(role, role_permissions)))
    }

    /// Roles, optionally narrowed by a name search
    ///
    /// Permissions for the whole page are loaded with a single query.
    async fn roles(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Role>> {
        let db = market_db(ctx)?;
        let request = page_request(ctx, PageArgs::new(first, after, last, before))?;

        let page = db
            .list_roles(&RoleFilter { search }, request)
            .await
            .map_err(|e| errors::db_error("list roles", e))?;

        let mut permissions = db
            .permissions_for_roles(page.items.iter().map(|r| r.id).collect())
            .await
            .map_err(|e| errors::db_error("list role permissions", e))?;

        into_connection(
            page,
            |r| r.id,
            |r| {
                let role_permissions = permissions.remove(&r.id).unwrap_or_default();
                Ok(role_from_model(r, role_permissions))
            },
        )
    }

    async fn permission(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Permission>> {
        let db = market_db(ctx)?;
        let permission = db
            .get_permission(id)
            .await
            .map_err(|e| errors::db_error("get permission", e))?;
        Ok(permission.map(permission_from_model))
    }

    /// Permissions, optionally only those of one role
    async fn permissions(
        &self,
        ctx: &Context<'_>,
        role_id: Option<i32>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Permission>> {
        let db = market_db(ctx)?;
        let request = page_request(ctx, PageArgs::new(first, after, last, before))?;
        let page = db
            .list_permissions(&PermissionFilter { role_id }, request)
            .await
            .map_err(|e| errors::db_error("list permissions", e))?;
        into_connection(page, |p| p.id, |p| Ok(permission_from_model(p)))
    }
}
