//! Vendors, customers, organizations and admin users

use async_graphql::{Context, Object, Result};
use marketplace_api_types::{
    AccountStatus, CreateCustomerInput, CreateOrganizationInput, CreateUserInput, CreateVendorInput, Customer,
    Organization, UpdateCustomerInput, UpdateOrganizationInput, UpdateUserInput, UpdateVendorInput, User, Vendor,
};
use marketplace_db::{
    customers::{CustomerPatch, MarketDbCustomerOperations, NewCustomer},
    organizations::{MarketDbOrganizationOperations, NewOrganization, OrganizationPatch},
    users::{MarketDbUserOperations, NewUser, UserPatch},
    vendors::{MarketDbVendorOperations, NewVendor, VendorPatch},
};

use crate::{
    conversions::{customer_from_model, organization_from_model, user_from_model, vendor_from_model},
    errors,
    query::market_db,
    validation::{require_non_blank, validate_email, validate_update},
};

fn optional_email(email: Option<String>) -> Result<Option<String>> {
    validate_update(email, |e| validate_email(&e))
}

fn status_str(status: Option<AccountStatus>) -> Option<String> {
    status.map(|s| s.as_db_str().to_string())
}

#[derive(Default)]
pub struct PartyMutation;

#[Object]
impl PartyMutation {
    /// Register a vendor, `pending` unless a status is given
    ///
    /// New vendors always start unverified.
    async fn create_vendor(&self, ctx: &Context<'_>, input: CreateVendorInput) -> Result<Vendor> {
        let new = NewVendor {
            name: require_non_blank("name", &input.name)?,
            email: validate_email(&input.email)?,
            phone: input.phone,
            address: input.address,
            city: input.city,
            status: input.status.unwrap_or(AccountStatus::Pending).as_db_str().to_string(),
            organization_id: input.organization_id,
            role_id: input.role_id,
        };

        let db = market_db(ctx)?;
        let vendor = db.create_vendor(new).await.map_err(|e| errors::db_error("create vendor", e))?;
        Ok(vendor_from_model(vendor))
    }

    async fn update_vendor(&self, ctx: &Context<'_>, id: i32, input: UpdateVendorInput) -> Result<Vendor> {
        let patch = VendorPatch {
            name: validate_update(input.name, |n| require_non_blank("name", &n))?,
            email: optional_email(input.email)?,
            phone: input.phone,
            address: input.address,
            city: input.city,
            status: status_str(input.status),
            organization_id: input.organization_id,
            role_id: input.role_id,
            is_verified: input.is_verified,
            is_email_verified: input.is_email_verified,
        };

        let db = market_db(ctx)?;
        let vendor = db
            .update_vendor(id, patch)
            .await
            .map_err(|e| errors::db_error("update vendor", e))?;
        Ok(vendor_from_model(vendor))
    }

    async fn update_vendor_status(&self, ctx: &Context<'_>, id: i32, status: AccountStatus) -> Result<Vendor> {
        let db = market_db(ctx)?;
        let vendor = db
            .set_vendor_status(id, status.as_db_str())
            .await
            .map_err(|e| errors::db_error("update vendor status", e))?;
        Ok(vendor_from_model(vendor))
    }

    /// Set both verification flags of a vendor, including clearing them
    async fn set_vendor_verification(
        &self,
        ctx: &Context<'_>,
        id: i32,
        is_verified: bool,
        is_email_verified: bool,
    ) -> Result<Vendor> {
        let db = market_db(ctx)?;
        let vendor = db
            .set_vendor_verification(id, is_verified, is_email_verified)
            .await
            .map_err(|e| errors::db_error("set vendor verification", e))?;
        Ok(vendor_from_model(vendor))
    }

    async fn delete_vendor(&self, ctx: &Context<'_>, id: i32) -> Result<Vendor> {
        let db = market_db(ctx)?;
        let vendor = db.delete_vendor(id).await.map_err(|e| errors::db_error("delete vendor", e))?;
        Ok(vendor_from_model(vendor))
    }

    async fn create_customer(&self, ctx: &Context<'_>, input: CreateCustomerInput) -> Result<Customer> {
        let new = NewCustomer {
            name: require_non_blank("name", &input.name)?,
            email: validate_email(&input.email)?,
            phone: input.phone,
            city: input.city,
            status: input.status.unwrap_or(AccountStatus::Active).as_db_str().to_string(),
        };

        let db = market_db(ctx)?;
        let customer = db
            .create_customer(new)
            .await
            .map_err(|e| errors::db_error("create customer", e))?;
        Ok(customer_from_model(customer))
    }

    async fn update_customer(&self, ctx: &Context<'_>, id: i32, input: UpdateCustomerInput) -> Result<Customer> {
        let patch = CustomerPatch {
            name: validate_update(input.name, |n| require_non_blank("name", &n))?,
            email: optional_email(input.email)?,
            phone: input.phone,
            city: input.city,
            status: status_str(input.status),
        };

        let db = market_db(ctx)?;
        let customer = db
            .update_customer(id, patch)
            .await
            .map_err(|e| errors::db_error("update customer", e))?;
        Ok(customer_from_model(customer))
    }

    async fn update_customer_status(&self, ctx: &Context<'_>, id: i32, status: AccountStatus) -> Result<Customer> {
        let db = market_db(ctx)?;
        let customer = db
            .set_customer_status(id, status.as_db_str())
            .await
            .map_err(|e| errors::db_error("update customer status", e))?;
        Ok(customer_from_model(customer))
    }

    async fn delete_customer(&self, ctx: &Context<'_>, id: i32) -> Result<Customer> {
        let db = market_db(ctx)?;
        let customer = db
            .delete_customer(id)
            .await
            .map_err(|e| errors::db_error("delete customer", e))?;
        Ok(customer_from_model(customer))
    }

    async fn create_organization(&self, ctx: &Context<'_>, input: CreateOrganizationInput) -> Result<Organization> {
        let new = NewOrganization {
            name: require_non_blank("name", &input.name)?,
            email: optional_email(input.email)?,
            phone: input.phone,
            address: input.address,
        };

        let db = market_db(ctx)?;
        let organization = db
            .create_organization(new)
            .await
            .map_err(|e| errors::db_error("create organization", e))?;
        Ok(organization_from_model(organization))
    }

    async fn update_organization(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: UpdateOrganizationInput,
    ) -> Result<Organization> {
        let patch = OrganizationPatch {
            name: validate_update(input.name, |n| require_non_blank("name", &n))?,
            email: optional_email(input.email)?,
            phone: input.phone,
            address: input.address,
        };

        let db = market_db(ctx)?;
        let organization = db
            .update_organization(id, patch)
            .await
            .map_err(|e| errors::db_error("update organization", e))?;
        Ok(organization_from_model(organization))
    }

    async fn delete_organization(&self, ctx: &Context<'_>, id: i32) -> Result<Organization> {
        let db = market_db(ctx)?;
        let organization = db
            .delete_organization(id)
            .await
            .map_err(|e| errors::db_error("delete organization", e))?;
        Ok(organization_from_model(organization))
    }

    async fn create_user(&self, ctx: &Context<'_>, input: CreateUserInput) -> Result<User> {
        let new = NewUser {
            name: require_non_blank("name", &input.name)?,
            email: validate_email(&input.email)?,
            phone: input.phone,
            status: input.status.unwrap_or(AccountStatus::Active).as_db_str().to_string(),
            role_id: input.role_id,
            organization_id: input.organization_id,
        };

        let db = market_db(ctx)?;
        let user = db.create_user(new).await.map_err(|e| errors::db_error("create user", e))?;
        Ok(user_from_model(user))
    }

    async fn update_user(&self, ctx: &Context<'_>, id: i32, input: UpdateUserInput) -> Result<User> {
        let patch = UserPatch {
            name: validate_update(input.name, |n| require_non_blank("name", &n))?,
            email: optional_email(input.email)?,
            phone: input.phone,
            status: status_str(input.status),
            role_id: input.role_id,
            organization_id: input.organization_id,
        };

        let db = market_db(ctx)?;
        let user = db
            .update_user(id, patch)
            .await
            .map_err(|e| errors::db_error("update user", e))?;
        Ok(user_from_model(user))
    }

    async fn update_user_status(&self, ctx: &Context<'_>, id: i32, status: AccountStatus) -> Result<User> {
        let db = market_db(ctx)?;
        let user = db
            .set_user_status(id, status.as_db_str())
            .await
            .map_err(|e| errors::db_error("update user status", e))?;
        Ok(user_from_model(user))
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: i32) -> Result<User> {
        let db = market_db(ctx)?;
        let user = db.delete_user(id).await.map_err(|e| errors::db_error("delete user", e))?;
        Ok(user_from_model(user))
    }
}
