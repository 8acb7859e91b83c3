//! Filter objects for the list operations.
//!
//! Every present field becomes one predicate and the predicates are AND-combined. The free
//! text `search` field OR-combines a substring match over the text columns of the entity.
//! An absent field, or a blank search string, produces no predicate at all.

use marketplace_db_entity::{app_user, brand, customer, organization, permission, role, vehicle, vehicle_model, vendor};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Select, sea_query::LikeExpr};

/// Filter convertible into a [`Condition`] over a single entity.
pub trait EntityFilter {
    type Entity: EntityTrait;

    fn condition(&self) -> Condition;

    /// Returns the filtered select. An empty condition leaves the select untouched.
    fn select(&self) -> Select<Self::Entity> {
        let condition = self.condition();
        let select = Self::Entity::find();
        if condition.is_empty() {
            select
        } else {
            select.filter(condition)
        }
    }
}

/// Escape character of the search patterns.
const LIKE_ESCAPE: char = '\\';

/// Escapes the `LIKE` wildcards of `term` so it only matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Builds `col1 LIKE %term% OR col2 LIKE %term% ...` unless the term is blank.
pub fn search_condition<C: ColumnTrait>(term: Option<&str>, columns: &[C]) -> Option<Condition> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let pattern = format!("%{}%", escape_like(term));
    Some(columns.iter().fold(Condition::any(), |cond, column| {
        cond.add(column.like(LikeExpr::new(pattern.as_str()).escape(LIKE_ESCAPE)))
    }))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub brand_id: Option<i32>,
    pub model_id: Option<i32>,
    pub vendor_id: Option<i32>,
    pub status: Option<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub max_mileage: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub body_type: Option<String>,
    pub search: Option<String>,
}

impl EntityFilter for VehicleFilter {
    type Entity = vehicle::Entity;

    fn condition(&self) -> Condition {
        use vehicle::Column;

        Condition::all()
            .add_option(self.brand_id.map(|v| Column::BrandId.eq(v)))
            .add_option(self.model_id.map(|v| Column::ModelId.eq(v)))
            .add_option(self.vendor_id.map(|v| Column::VendorId.eq(v)))
            .add_option(self.status.as_deref().map(|v| Column::Status.eq(v)))
            .add_option(self.min_year.map(|v| Column::Year.gte(v)))
            .add_option(self.max_year.map(|v| Column::Year.lte(v)))
            .add_option(self.min_price.map(|v| Column::Price.gte(v)))
            .add_option(self.max_price.map(|v| Column::Price.lte(v)))
            .add_option(self.max_mileage.map(|v| Column::Mileage.lte(v)))
            .add_option(self.fuel_type.as_deref().map(|v| Column::FuelType.eq(v)))
            .add_option(self.transmission.as_deref().map(|v| Column::Transmission.eq(v)))
            .add_option(self.body_type.as_deref().map(|v| Column::BodyType.eq(v)))
            .add_option(search_condition(
                self.search.as_deref(),
                &[Column::Title, Column::Description, Column::Color],
            ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorFilter {
    pub status: Option<String>,
    pub organization_id: Option<i32>,
    pub is_verified: Option<bool>,
    pub search: Option<String>,
}

impl EntityFilter for VendorFilter {
    type Entity = vendor::Entity;

    fn condition(&self) -> Condition {
        use vendor::Column;

        Condition::all()
            .add_option(self.status.as_deref().map(|v| Column::Status.eq(v)))
            .add_option(self.organization_id.map(|v| Column::OrganizationId.eq(v)))
            .add_option(self.is_verified.map(|v| Column::IsVerified.eq(v)))
            .add_option(search_condition(
                self.search.as_deref(),
                &[Column::Name, Column::Email, Column::City],
            ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl EntityFilter for CustomerFilter {
    type Entity = customer::Entity;

    fn condition(&self) -> Condition {
        use customer::Column;

        Condition::all()
            .add_option(self.status.as_deref().map(|v| Column::Status.eq(v)))
            .add_option(search_condition(
                self.search.as_deref(),
                &[Column::Name, Column::Email, Column::City],
            ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role_id: Option<i32>,
    pub organization_id: Option<i32>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl EntityFilter for UserFilter {
    type Entity = app_user::Entity;

    fn condition(&self) -> Condition {
        use app_user::Column;

        Condition::all()
            .add_option(self.role_id.map(|v| Column::RoleId.eq(v)))
            .add_option(self.organization_id.map(|v| Column::OrganizationId.eq(v)))
            .add_option(self.status.as_deref().map(|v| Column::Status.eq(v)))
            .add_option(search_condition(self.search.as_deref(), &[Column::Name, Column::Email]))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandFilter {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl EntityFilter for BrandFilter {
    type Entity = brand::Entity;

    fn condition(&self) -> Condition {
        use brand::Column;

        Condition::all()
            .add_option(self.status.as_deref().map(|v| Column::Status.eq(v)))
            .add_option(search_condition(self.search.as_deref(), &[Column::Name]))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelFilter {
    pub brand_id: Option<i32>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl EntityFilter for ModelFilter {
    type Entity = vehicle_model::Entity;

    fn condition(&self) -> Condition {
        use vehicle_model::Column;

        Condition::all()
            .add_option(self.brand_id.map(|v| Column::BrandId.eq(v)))
            .add_option(self.status.as_deref().map(|v| Column::Status.eq(v)))
            .add_option(search_condition(self.search.as_deref(), &[Column::Name]))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationFilter {
    pub search: Option<String>,
}

impl EntityFilter for OrganizationFilter {
    type Entity = organization::Entity;

    fn condition(&self) -> Condition {
        use organization::Column;

        Condition::all().add_option(search_condition(
            self.search.as_deref(),
            &[Column::Name, Column::Email, Column::Address],
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleFilter {
    pub search: Option<String>,
}

impl EntityFilter for RoleFilter {
    type Entity = role::Entity;

    fn condition(&self) -> Condition {
        Condition::all().add_option(search_condition(self.search.as_deref(), &[role::Column::Name]))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionFilter {
    pub role_id: Option<i32>,
}

impl EntityFilter for PermissionFilter {
    type Entity = permission::Entity;

    fn condition(&self) -> Condition {
        Condition::all().add_option(self.role_id.map(|v| permission::Column::RoleId.eq(v)))
    }
}
