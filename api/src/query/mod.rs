//! GraphQL query root
//!
//! The root is merged from one object per functional area so that each file stays focused
//! on a single family of entities.

mod access;
mod catalog;
mod chat;
mod parties;
mod system;
mod vehicles;

use async_graphql::{Context, Error, MergedObject};
use marketplace_db::{db::MarketDb, pagination::PageRequest};

use crate::{config::PaginationConfig, errors, pagination::PageArgs};

/// Root query type of the back-office API
#[derive(MergedObject, Default)]
pub struct QueryRoot(
    vehicles::VehicleQuery,
    catalog::CatalogQuery,
    parties::PartyQuery,
    access::AccessQuery,
    chat::ChatQuery,
    system::SystemQuery,
);

/// Database handle registered as schema data
pub(crate) fn market_db<'a>(ctx: &Context<'a>) -> Result<&'a MarketDb, Error> {
    ctx.data::<MarketDb>()
        .map_err(|e| errors::context_error("database", e.message))
}

/// Validates connection arguments against the configured page sizes
pub(crate) fn page_request(ctx: &Context<'_>, args: PageArgs) -> Result<PageRequest, Error> {
    let config = ctx
        .data::<PaginationConfig>()
        .map_err(|e| errors::context_error("pagination config", e.message))?;
    args.into_request(config)
}
