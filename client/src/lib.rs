/// Traits describing the marketplace API operations available to clients.
pub mod api;
/// Chat message log kept in sync by polling.
pub mod chat;
mod client;
/// Errors returned by the marketplace client.
pub mod errors;
/// Page navigation over cursor connections.
pub mod paging;
mod queries;
/// Data types returned by the marketplace API.
pub mod types;

pub use chat::MessageLog;
pub use client::{MarketplaceClient, MarketplaceClientConfig};
pub use paging::PageNavigator;
