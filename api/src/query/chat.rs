//! Polling chat between admins, vendors and customers

use async_graphql::{Context, Object, Result};
use marketplace_api_types::{Connection, Conversation, Message, Participant};
use marketplace_db::messages::MarketDbMessageOperations;

use super::{market_db, page_request};
use crate::{
    conversions::{conversation_from_summary, message_from_model, participant_to_db},
    errors,
    pagination::{PageArgs, into_connection},
};

#[derive(Default)]
pub struct ChatQuery;

#[Object]
impl ChatQuery {
    /// The message log between two participants ordered by id
    ///
    /// Clients backfill older history with `last`/`before` and poll for new messages with
    /// `first`/`after` from the newest cursor they hold.
    #[allow(clippy::too_many_arguments)]
    async fn messages(
        &self,
        ctx: &Context<'_>,
        participant: Participant,
        counterpart: Participant,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<Message>> {
        let db = market_db(ctx)?;
        let request = page_request(ctx, PageArgs::new(first, after, last, before))?;

        let page = db
            .list_conversation_messages(&participant_to_db(&participant), &participant_to_db(&counterpart), request)
            .await
            .map_err(|e| errors::db_error("list messages", e))?;

        into_connection(page, |m| m.id, message_from_model)
    }

    /// One entry per counterpart with the latest message and the unread count,
    /// newest conversation first
    async fn conversations(&self, ctx: &Context<'_>, participant: Participant) -> Result<Vec<Conversation>> {
        let db = market_db(ctx)?;
        db.list_conversations(&participant_to_db(&participant))
            .await
            .map_err(|e| errors::db_error("list conversations", e))?
            .into_iter()
            .map(conversation_from_summary)
            .collect()
    }

    /// Number of messages addressed to the participant that were not seen yet
    async fn unread_message_count(&self, ctx: &Context<'_>, participant: Participant) -> Result<i64> {
        let db = market_db(ctx)?;
        let count = db
            .unread_message_count(&participant_to_db(&participant))
            .await
            .map_err(|e| errors::db_error("count unread messages", e))?;
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}
