//! GraphQL schema builder for the marketplace API

use async_graphql::{EmptySubscription, Schema, SchemaBuilder};
use marketplace_db::db::MarketDb;

use crate::{config::PaginationConfig, mutation::MutationRoot, query::QueryRoot};

pub type MarketplaceSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

fn builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription).limit_depth(10)
}

/// Build the async-graphql schema
///
/// The database handle and the pagination limits are injected as context data. Chat is
/// served by polling, so the schema has no subscriptions.
pub fn build_schema(db: MarketDb, pagination: PaginationConfig) -> MarketplaceSchema {
    builder().data(db).data(pagination).finish()
}

/// Export the GraphQL schema in SDL format without connecting to a database
pub fn export_schema_sdl() -> String {
    builder().finish().sdl()
}
