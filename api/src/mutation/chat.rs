use async_graphql::{Context, Object, Result};
use marketplace_api_types::{Message, Participant, SendMessageInput};
use marketplace_db::messages::{MarketDbMessageOperations, NewMessage};

use crate::{
    conversions::{message_from_model, participant_to_db},
    errors,
    query::market_db,
    validation::validate_message_content,
};

#[derive(Default)]
pub struct ChatMutation;

#[Object]
impl ChatMutation {
    /// Send a chat message. It is stored as sent and not yet seen.
    async fn send_message(&self, ctx: &Context<'_>, input: SendMessageInput) -> Result<Message> {
        if input.sender == input.recipient {
            return Err(errors::validation_failed("recipient", "must differ from the sender"));
        }
        let content = validate_message_content(&input.content)?;

        let db = market_db(ctx)?;
        let message = db
            .send_message(NewMessage {
                sender: participant_to_db(&input.sender),
                recipient: participant_to_db(&input.recipient),
                content,
            })
            .await
            .map_err(|e| errors::db_error("send message", e))?;

        tracing::debug!(message_id = message.id, "message sent");
        message_from_model(message)
    }

    /// Mark the unseen messages sent by `counterpart` to `reader` as seen
    ///
    /// With `upTo` only messages with an id up to and including it are marked. Returns the
    /// number of messages updated.
    async fn mark_messages_seen(
        &self,
        ctx: &Context<'_>,
        reader: Participant,
        counterpart: Participant,
        up_to: Option<i32>,
    ) -> Result<i64> {
        let db = market_db(ctx)?;
        let updated = db
            .mark_messages_seen(&participant_to_db(&reader), &participant_to_db(&counterpart), up_to)
            .await
            .map_err(|e| errors::db_error("mark messages seen", e))?;
        Ok(i64::try_from(updated).unwrap_or(i64::MAX))
    }

    async fn delete_message(&self, ctx: &Context<'_>, id: i32) -> Result<Message> {
        let db = market_db(ctx)?;
        let message = db
            .delete_message(id)
            .await
            .map_err(|e| errors::db_error("delete message", e))?;
        message_from_model(message)
    }
}
