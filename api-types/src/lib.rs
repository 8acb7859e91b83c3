//! GraphQL type definitions for the marketplace back-office API
//!
//! This crate contains pure GraphQL type definitions that can be reused
//! by clients without depending on the full API server implementation.

use async_graphql::{Enum, InputObject, OutputType, SimpleObject};
use chrono::{DateTime, Utc};

/// Availability of a vehicle listing
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum VehicleStatus {
    /// Listed and open for offers
    #[default]
    Available,
    /// Held for a customer
    Reserved,
    /// Sold, kept for reference
    Sold,
    /// Hidden from the marketplace
    Inactive,
}

impl VehicleStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Reserved => "reserved",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Inactive => "inactive",
        }
    }
}

impl From<&str> for VehicleStatus {
    fn from(status: &str) -> Self {
        match status {
            "available" => VehicleStatus::Available,
            "reserved" => VehicleStatus::Reserved,
            "sold" => VehicleStatus::Sold,
            _ => VehicleStatus::Inactive,
        }
    }
}

/// Lifecycle status of vendor, customer and user accounts
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum AccountStatus {
    Active,
    Inactive,
    /// Registered but not yet approved
    Pending,
    /// Blocked by an administrator
    Suspended,
}

impl AccountStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Pending => "pending",
            AccountStatus::Suspended => "suspended",
        }
    }
}

impl From<&str> for AccountStatus {
    fn from(status: &str) -> Self {
        match status {
            "active" => AccountStatus::Active,
            "pending" => AccountStatus::Pending,
            "suspended" => AccountStatus::Suspended,
            _ => AccountStatus::Inactive,
        }
    }
}

/// Visibility of brands and models in the catalog
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum CatalogStatus {
    #[default]
    Active,
    Inactive,
}

impl CatalogStatus {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            CatalogStatus::Active => "active",
            CatalogStatus::Inactive => "inactive",
        }
    }
}

impl From<&str> for CatalogStatus {
    fn from(status: &str) -> Self {
        match status {
            "active" => CatalogStatus::Active,
            _ => CatalogStatus::Inactive,
        }
    }
}

/// Kind of a chat participant
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum ParticipantKind {
    Admin,
    Vendor,
    Customer,
}

impl ParticipantKind {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ParticipantKind::Admin => "admin",
            ParticipantKind::Vendor => "vendor",
            ParticipantKind::Customer => "customer",
        }
    }
}

impl TryFrom<&str> for ParticipantKind {
    type Error = String;

    fn try_from(kind: &str) -> Result<Self, Self::Error> {
        match kind {
            "admin" => Ok(ParticipantKind::Admin),
            "vendor" => Ok(ParticipantKind::Vendor),
            "customer" => Ok(ParticipantKind::Customer),
            other => Err(format!("unknown participant kind '{other}'")),
        }
    }
}

/// CRUD verb granted by a role
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum AbilityVerb {
    Create,
    Read,
    Update,
    Delete,
    /// All of the above
    Manage,
}

impl AbilityVerb {
    pub fn as_db_str(&self) -> &'static str {
        match self {
            AbilityVerb::Create => "create",
            AbilityVerb::Read => "read",
            AbilityVerb::Update => "update",
            AbilityVerb::Delete => "delete",
            AbilityVerb::Manage => "manage",
        }
    }

    /// Parses a stored verb, ignoring case. Returns `None` for unknown verbs.
    pub fn parse(verb: &str) -> Option<Self> {
        match verb.to_ascii_lowercase().as_str() {
            "create" => Some(AbilityVerb::Create),
            "read" => Some(AbilityVerb::Read),
            "update" => Some(AbilityVerb::Update),
            "delete" => Some(AbilityVerb::Delete),
            "manage" => Some(AbilityVerb::Manage),
            _ => None,
        }
    }
}

// ============================================================================
// Connections
// ============================================================================

/// Relay page information of a connection
#[derive(SimpleObject, Clone, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Cursor of the first edge, null when the page is empty
    pub start_cursor: Option<String>,
    /// Cursor of the last edge, null when the page is empty
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Node of a connection together with its opaque cursor
#[derive(SimpleObject, Clone, Debug)]
#[graphql(concrete(name = "VehicleEdge", params(Vehicle)))]
#[graphql(concrete(name = "BrandEdge", params(Brand)))]
#[graphql(concrete(name = "VehicleModelEdge", params(VehicleModel)))]
#[graphql(concrete(name = "VendorEdge", params(Vendor)))]
#[graphql(concrete(name = "CustomerEdge", params(Customer)))]
#[graphql(concrete(name = "OrganizationEdge", params(Organization)))]
#[graphql(concrete(name = "UserEdge", params(User)))]
#[graphql(concrete(name = "RoleEdge", params(Role)))]
#[graphql(concrete(name = "PermissionEdge", params(Permission)))]
#[graphql(concrete(name = "MessageEdge", params(Message)))]
pub struct Edge<T: OutputType> {
    pub cursor: String,
    pub node: T,
}

/// Page of records ordered by id
///
/// Forward paging uses `first` and `after: endCursor`, backward paging uses
/// `last` and `before: startCursor`.
#[derive(SimpleObject, Clone, Debug)]
#[graphql(concrete(name = "VehicleConnection", params(Vehicle)))]
#[graphql(concrete(name = "BrandConnection", params(Brand)))]
#[graphql(concrete(name = "VehicleModelConnection", params(VehicleModel)))]
#[graphql(concrete(name = "VendorConnection", params(Vendor)))]
#[graphql(concrete(name = "CustomerConnection", params(Customer)))]
#[graphql(concrete(name = "OrganizationConnection", params(Organization)))]
#[graphql(concrete(name = "UserConnection", params(User)))]
#[graphql(concrete(name = "RoleConnection", params(Role)))]
#[graphql(concrete(name = "PermissionConnection", params(Permission)))]
#[graphql(concrete(name = "MessageConnection", params(Message)))]
pub struct Connection<T: OutputType>
where
    Edge<T>: OutputType,
{
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    /// Number of records matching the filter regardless of the page
    pub total_count: i64,
}

// ============================================================================
// Catalog and listings
// ============================================================================

/// Vehicle listing with the display names of its brand, model and vendor
#[derive(SimpleObject, Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub condition: Option<String>,
    pub status: VehicleStatus,
    pub vendor_id: i32,
    pub brand_id: i32,
    pub model_id: i32,
    pub brand_name: Option<String>,
    pub model_name: Option<String>,
    pub vendor_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub logo_url: Option<String>,
    pub status: CatalogStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Model of a brand, for example "Golf" of "Volkswagen"
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct VehicleModel {
    pub id: i32,
    pub brand_id: i32,
    pub brand_name: Option<String>,
    pub name: String,
    pub status: CatalogStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Parties
// ============================================================================

/// Seller account that lists vehicles
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Vendor {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: AccountStatus,
    pub is_verified: bool,
    pub is_email_verified: bool,
    pub organization_id: Option<i32>,
    pub role_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Buyer account that can chat with vendors
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Back-office administrator
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: AccountStatus,
    pub role_id: Option<i32>,
    pub organization_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Access control
// ============================================================================

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    /// Comma-joined ability verbs as stored
    pub ability: String,
    /// Parsed ability verbs, unknown verbs are omitted
    pub abilities: Vec<AbilityVerb>,
    pub permissions: Vec<Permission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Permission {
    pub id: i32,
    pub role_id: i32,
    pub name: String,
    /// Subjects the permission applies to, for example `vehicle` or `vendor`
    pub subjects: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Chat
// ============================================================================

/// Chat participant identified by its kind and record id
#[derive(SimpleObject, InputObject, Clone, Debug, PartialEq, Eq, Hash)]
#[graphql(input_name = "ParticipantInput")]
pub struct Participant {
    pub kind: ParticipantKind,
    pub id: i32,
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: i32,
    pub sender: Participant,
    pub recipient: Participant,
    pub content: String,
    pub is_sent: bool,
    pub is_seen: bool,
    pub created_at: DateTime<Utc>,
}

/// Latest message exchanged with a counterpart
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct Conversation {
    pub counterpart: Participant,
    pub last_message: Message,
    /// Messages from the counterpart not yet seen
    pub unread_count: i64,
}

// ============================================================================
// Inputs
// ============================================================================

#[derive(InputObject, Clone, Debug)]
pub struct CreateVehicleInput {
    pub title: String,
    pub description: Option<String>,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub condition: Option<String>,
    /// Defaults to AVAILABLE
    pub status: Option<VehicleStatus>,
    pub vendor_id: i32,
    pub brand_id: i32,
    pub model_id: i32,
}

/// Partial vehicle update, empty strings and zero values leave the field unchanged
#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateVehicleInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub mileage: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub body_type: Option<String>,
    pub color: Option<String>,
    pub condition: Option<String>,
    pub status: Option<VehicleStatus>,
    pub vendor_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub model_id: Option<i32>,
}

#[derive(InputObject, Clone, Debug)]
pub struct CreateBrandInput {
    pub name: String,
    pub logo_url: Option<String>,
    pub status: Option<CatalogStatus>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateBrandInput {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub status: Option<CatalogStatus>,
}

#[derive(InputObject, Clone, Debug)]
pub struct CreateVehicleModelInput {
    pub brand_id: i32,
    pub name: String,
    pub status: Option<CatalogStatus>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateVehicleModelInput {
    pub brand_id: Option<i32>,
    pub name: Option<String>,
    pub status: Option<CatalogStatus>,
}

#[derive(InputObject, Clone, Debug)]
pub struct CreateVendorInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    /// Defaults to PENDING
    pub status: Option<AccountStatus>,
    pub organization_id: Option<i32>,
    pub role_id: Option<i32>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateVendorInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub status: Option<AccountStatus>,
    pub organization_id: Option<i32>,
    pub role_id: Option<i32>,
    /// `false` leaves the flag unchanged, see `setVendorVerification`
    pub is_verified: Option<bool>,
    pub is_email_verified: Option<bool>,
}

#[derive(InputObject, Clone, Debug)]
pub struct CreateCustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    /// Defaults to ACTIVE
    pub status: Option<AccountStatus>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub status: Option<AccountStatus>,
}

#[derive(InputObject, Clone, Debug)]
pub struct CreateOrganizationInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateOrganizationInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(InputObject, Clone, Debug)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Defaults to ACTIVE
    pub status: Option<AccountStatus>,
    pub role_id: Option<i32>,
    pub organization_id: Option<i32>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<AccountStatus>,
    pub role_id: Option<i32>,
    pub organization_id: Option<i32>,
}

#[derive(InputObject, Clone, Debug)]
pub struct PermissionInput {
    pub name: String,
    pub subjects: Vec<String>,
}

#[derive(InputObject, Clone, Debug)]
pub struct CreateRoleInput {
    pub name: String,
    pub abilities: Vec<AbilityVerb>,
    #[graphql(default)]
    pub permissions: Vec<PermissionInput>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdateRoleInput {
    pub name: Option<String>,
    /// An empty list leaves the abilities unchanged
    pub abilities: Option<Vec<AbilityVerb>>,
}

#[derive(InputObject, Clone, Debug)]
pub struct CreatePermissionInput {
    pub role_id: i32,
    pub name: String,
    pub subjects: Vec<String>,
}

#[derive(InputObject, Clone, Debug, Default)]
pub struct UpdatePermissionInput {
    pub name: Option<String>,
    pub subjects: Option<Vec<String>>,
}

#[derive(InputObject, Clone, Debug)]
pub struct SendMessageInput {
    pub sender: Participant,
    pub recipient: Participant,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_statuses_map_to_inactive() {
        assert_eq!(VehicleStatus::from("scrapped"), VehicleStatus::Inactive);
        assert_eq!(AccountStatus::from(""), AccountStatus::Inactive);
        assert_eq!(CatalogStatus::from("ACTIVE"), CatalogStatus::Inactive);
    }

    #[test]
    fn statuses_round_trip_through_storage_form() {
        for status in [
            VehicleStatus::Available,
            VehicleStatus::Reserved,
            VehicleStatus::Sold,
            VehicleStatus::Inactive,
        ] {
            assert_eq!(VehicleStatus::from(status.as_db_str()), status);
        }
        for status in [
            AccountStatus::Active,
            AccountStatus::Inactive,
            AccountStatus::Pending,
            AccountStatus::Suspended,
        ] {
            assert_eq!(AccountStatus::from(status.as_db_str()), status);
        }
    }

    #[test]
    fn ability_verbs_parse_case_insensitively() {
        assert_eq!(AbilityVerb::parse("Manage"), Some(AbilityVerb::Manage));
        assert_eq!(AbilityVerb::parse("fly"), None);
    }

    #[test]
    fn participant_kinds_reject_unknown_values() {
        assert_eq!(ParticipantKind::try_from("vendor"), Ok(ParticipantKind::Vendor));
        assert!(ParticipantKind::try_from("robot").is_err());
    }
}
