//! Vendors, customers, organizations and admin users

use async_graphql::{Context, Object, Result};
use marketplace_api_types::{AccountStatus, Connection, Customer, Organization, User, Vendor};
use marketplace_db::{
    customers::MarketDbCustomerOperations,
    filters::{CustomerFilter, OrganizationFilter, UserFilter, VendorFilter},
    organizations::MarketDbOrganizationOperations,
    users::MarketDbUserOperations,
    vendors::MarketDbVendorOperations,
};

use super::{market_db, page_request};
use crate::{
    conversions::{customer_from_model, organization_from_model, user_from_model, vendor_from_model},
    errors,
    pagination::{PageArgs, into_connection},
};

fn status_str(status: Option<AccountStatus>) -> Option<String> {
    status.map(|s| s.as_db_str().to_string())
}

async fn vendor_connection(ctx: &Context<'_>, filter: VendorFilter, args: PageArgs) -> Result<Connection<Vendor>> {
    let db = market_db(ctx)?;
    let request = page_request(ctx, args)?;
    let page = db
        .list_vendors(&filter, request)
        .await
        .map_err(|e| errors::db_error("list vendors", e))?;
    into_connection(page, |v| v.id, |v| Ok(vendor_from_model(v)))
}

async fn customer_connection(
    ctx: &Context<'_>,
    filter: CustomerFilter,
    args: PageArgs,
) -> Result<Connection<Customer>> {
    let db = market_db(ctx)?;
    let request = page_request(ctx, args)?;
    let page = db
        .list_customers(&filter, request)
        .await
        .map_err(|e| errors::db_error("list customers", e))?;
    into_connection(page, |c| c.id, |c| Ok(customer_from_model(c)))
}

async fn user_connection(ctx: &Context<'_>, filter: UserFilter, args: PageArgs) -> Result<Connection<User>> {
    let db = market_db(ctx)?;
    let request = page_request(ctx, args)?;
    let page = db
        .list_users(&filter, request)
        .await
        .map_err(|e| errors::db_error("list users", e))?;
    into_connection(page, |u| u.id, |u| Ok(user_from_model(u)))
}

#[derive(Default)]
pub struct PartyQuery;

#[Object]
impl PartyQuery {
    async fn vendor(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Vendor>> {
        let db = market_db(ctx)?;
        let vendor = db.get_vendor(id).await.map_err(|e| errors::db_error("get vendor", e))?;
        Ok(vendor.map(vendor_from_model))
    }

    async fn vendors(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Vendor>> {
        vendor_connection(ctx, VendorFilter::default(), PageArgs::new(first, after, last, before)).await
    }

    /// Vendors with the given account status
    async fn vendors_by_status(
        &self,
        ctx: &Context<'_>,
        status: AccountStatus,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Vendor>> {
        let filter = VendorFilter {
            status: status_str(Some(status)),
            ..Default::default()
        };
        vendor_connection(ctx, filter, PageArgs::new(first, after, last, before)).await
    }

    /// Vendors narrowed down by status, organization, verification and a search over
    /// name, email and city
    #[allow(clippy::too_many_arguments)]
    async fn vendors_filtered(
        &self,
        ctx: &Context<'_>,
        status: Option<AccountStatus>,
        organization_id: Option<i32>,
        is_verified: Option<bool>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Vendor>> {
        let filter = VendorFilter {
            status: status_str(status),
            organization_id,
            is_verified,
            search,
        };
        vendor_connection(ctx, filter, PageArgs::new(first, after, last, before)).await
    }

    async fn customer(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Customer>> {
        let db = market_db(ctx)?;
        let customer = db
            .get_customer(id)
            .await
            .map_err(|e| errors::db_error("get customer", e))?;
        Ok(customer.map(customer_from_model))
    }

    async fn customers(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Customer>> {
        customer_connection(ctx, CustomerFilter::default(), PageArgs::new(first, after, last, before)).await
    }

    async fn customers_by_status(
        &self,
        ctx: &Context<'_>,
        status: AccountStatus,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Customer>> {
        let filter = CustomerFilter {
            status: status_str(Some(status)),
            search: None,
        };
        customer_connection(ctx, filter, PageArgs::new(first, after, last, before)).await
    }

    /// Customers narrowed down by status and a search over name, email and city
    async fn customers_filtered(
        &self,
        ctx: &Context<'_>,
        status: Option<AccountStatus>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Customer>> {
        let filter = CustomerFilter {
            status: status_str(status),
            search,
        };
        customer_connection(ctx, filter, PageArgs::new(first, after, last, before)).await
    }

    async fn organization(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Organization>> {
        let db = market_db(ctx)?;
        let organization = db
            .get_organization(id)
            .await
            .map_err(|e| errors::db_error("get organization", e))?;
        Ok(organization.map(organization_from_model))
    }

    /// Organizations, optionally narrowed by a search over name, email and address
    async fn organizations(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Organization>> {
        let db = market_db(ctx)?;
        let request = page_request(ctx, PageArgs::new(first, after, last, before))?;
        let page = db
            .list_organizations(&OrganizationFilter { search }, request)
            .await
            .map_err(|e| errors::db_error("list organizations", e))?;
        into_connection(page, |o| o.id, |o| Ok(organization_from_model(o)))
    }

    async fn user(&self, ctx: &Context<'_>, id: i32) -> Result<Option<User>> {
        let db = market_db(ctx)?;
        let user = db.get_user(id).await.map_err(|e| errors::db_error("get user", e))?;
        Ok(user.map(user_from_model))
    }

    async fn users(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<User>> {
        user_connection(ctx, UserFilter::default(), PageArgs::new(first, after, last, before)).await
    }

    /// Admin users holding the given role
    async fn users_by_role(
        &self,
        ctx: &Context<'_>,
        role_id: i32,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<User>> {
        let filter = UserFilter {
            role_id: Some(role_id),
            ..Default::default()
        };
        user_connection(ctx, filter, PageArgs::new(first, after, last, before)).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn users_filtered(
        &self,
        ctx: &Context<'_>,
        role_id: Option<i32>,
        organization_id: Option<i32>,
        status: Option<AccountStatus>,
        search: Option<String>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<User>> {
        let filter = UserFilter {
            role_id,
            organization_id,
            status: status_str(status),
            search,
        };
        user_connection(ctx, filter, PageArgs::new(first, after, last, before)).await
    }
}
