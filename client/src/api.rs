use crate::{
    errors::MarketplaceClientError,
    types::{AccountStatus, Connection, Conversation, Message, PageArgs, Participant, Vehicle, VehicleFilter, Vendor},
};

pub type Result<T> = std::result::Result<T, MarketplaceClientError>;

/// Read operations of the marketplace catalog and accounts.
#[async_trait::async_trait]
pub trait MarketplaceQueryClient {
    async fn query_health(&self) -> Result<String>;
    async fn query_version(&self) -> Result<String>;
    async fn vehicle(&self, id: i32) -> Result<Option<Vehicle>>;
    async fn vehicles(&self, page: &PageArgs) -> Result<Connection<Vehicle>>;
    async fn vehicles_filtered(&self, filter: &VehicleFilter, page: &PageArgs) -> Result<Connection<Vehicle>>;
    async fn vendors_by_status(&self, status: AccountStatus, page: &PageArgs) -> Result<Connection<Vendor>>;
}

/// Polling chat operations.
#[async_trait::async_trait]
pub trait MarketplaceChatClient {
    async fn messages(
        &self,
        participant: Participant,
        counterpart: Participant,
        page: &PageArgs,
    ) -> Result<Connection<Message>>;
    async fn conversations(&self, participant: Participant) -> Result<Vec<Conversation>>;
    async fn unread_message_count(&self, participant: Participant) -> Result<i64>;
    async fn send_message(&self, sender: Participant, recipient: Participant, content: &str) -> Result<Message>;
    /// Marks messages from `counterpart` to `reader` as seen, optionally only up to a message id.
    async fn mark_messages_seen(&self, reader: Participant, counterpart: Participant, up_to: Option<i32>)
    -> Result<i64>;
}
