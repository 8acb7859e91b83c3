//! GraphQL mutation root
//!
//! Create mutations validate every required field. Update mutations apply only the
//! truthy fields of their input: absent values, empty strings, `0` and `false` leave the
//! stored value unchanged, which is why flags that must be cleared have dedicated
//! mutations.

mod access;
mod catalog;
mod chat;
mod parties;
mod vehicles;

use async_graphql::MergedObject;

/// Root mutation type of the back-office API
#[derive(MergedObject, Default)]
pub struct MutationRoot(
    vehicles::VehicleMutation,
    catalog::CatalogMutation,
    parties::PartyMutation,
    access::AccessMutation,
    chat::ChatMutation,
);
