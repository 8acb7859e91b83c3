//! Conversions from database models to GraphQL types

use async_graphql::Error;
use marketplace_api_types::{
    AbilityVerb, AccountStatus, Brand, CatalogStatus, Conversation, Customer, Message, Organization, Participant,
    ParticipantKind, Permission, Role, User, Vehicle, VehicleModel, VehicleStatus, Vendor,
};
use marketplace_db::messages::{ConversationSummary, Participant as DbParticipant};
use marketplace_db_entity::{
    app_user, brand,
    conversions::{
        listing_aggregation::{ModelListing, VehicleListing},
        lists::split_list,
    },
    customer, message, organization, permission, role, vendor,
};

use crate::errors;

pub fn vehicle_from_listing(listing: VehicleListing) -> Vehicle {
    let v = listing.vehicle;
    Vehicle {
        id: v.id,
        title: v.title,
        description: v.description,
        year: v.year,
        price: v.price,
        mileage: v.mileage,
        fuel_type: v.fuel_type,
        transmission: v.transmission,
        body_type: v.body_type,
        color: v.color,
        condition: v.condition,
        status: VehicleStatus::from(v.status.as_str()),
        vendor_id: v.vendor_id,
        brand_id: v.brand_id,
        model_id: v.model_id,
        brand_name: listing.brand_name,
        model_name: listing.model_name,
        vendor_name: listing.vendor_name,
        created_at: v.created_at,
        updated_at: v.updated_at,
    }
}

pub fn brand_from_model(model: brand::Model) -> Brand {
    Brand {
        id: model.id,
        name: model.name,
        logo_url: model.logo_url,
        status: CatalogStatus::from(model.status.as_str()),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn vehicle_model_from_listing(listing: ModelListing) -> VehicleModel {
    let m = listing.model;
    VehicleModel {
        id: m.id,
        brand_id: m.brand_id,
        brand_name: listing.brand_name,
        name: m.name,
        status: CatalogStatus::from(m.status.as_str()),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub fn vendor_from_model(model: vendor::Model) -> Vendor {
    Vendor {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        address: model.address,
        city: model.city,
        status: AccountStatus::from(model.status.as_str()),
        is_verified: model.is_verified,
        is_email_verified: model.is_email_verified,
        organization_id: model.organization_id,
        role_id: model.role_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn customer_from_model(model: customer::Model) -> Customer {
    Customer {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        city: model.city,
        status: AccountStatus::from(model.status.as_str()),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn organization_from_model(model: organization::Model) -> Organization {
    Organization {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        address: model.address,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn user_from_model(model: app_user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        status: AccountStatus::from(model.status.as_str()),
        role_id: model.role_id,
        organization_id: model.organization_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn permission_from_model(model: permission::Model) -> Permission {
    Permission {
        id: model.id,
        role_id: model.role_id,
        name: model.name,
        subjects: split_list(&model.subjects),
        created_at: model.created_at,
    }
}

/// Converts a role with the permissions loaded for it
pub fn role_from_model(model: role::Model, permissions: Vec<permission::Model>) -> Role {
    Role {
        id: model.id,
        abilities: split_list(&model.ability)
            .iter()
            .filter_map(|verb| AbilityVerb::parse(verb))
            .collect(),
        name: model.name,
        ability: model.ability,
        permissions: permissions.into_iter().map(permission_from_model).collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn participant_to_db(participant: &Participant) -> DbParticipant {
    DbParticipant::new(participant.kind.as_db_str(), participant.id)
}

pub fn participant_from_db(participant: DbParticipant) -> Result<Participant, Error> {
    let kind = ParticipantKind::try_from(participant.kind.as_str())
        .map_err(|e| errors::internal_error("participant conversion", e))?;
    Ok(Participant {
        kind,
        id: participant.id,
    })
}

pub fn message_from_model(model: message::Model) -> Result<Message, Error> {
    Ok(Message {
        id: model.id,
        sender: participant_from_db(DbParticipant::new(model.sender_kind, model.sender_id))?,
        recipient: participant_from_db(DbParticipant::new(model.recipient_kind, model.recipient_id))?,
        content: model.content,
        is_sent: model.is_sent,
        is_seen: model.is_seen,
        created_at: model.created_at,
    })
}

pub fn conversation_from_summary(summary: ConversationSummary) -> Result<Conversation, Error> {
    Ok(Conversation {
        counterpart: participant_from_db(summary.counterpart)?,
        last_message: message_from_model(summary.last_message)?,
        unread_count: i64::try_from(summary.unread_count).unwrap_or(i64::MAX),
    })
}
