//! Two-party chat messages between admins, vendors and customers.
//!
//! A participant is identified by its kind (`admin`, `vendor`, `customer`) and the id of
//! the record of that kind. Clients poll the conversation log with forward pages from
//! the newest cursor and backfill older messages with backward pages.

use std::collections::HashMap;

use async_trait::async_trait;
use marketplace_db_entity::message;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QuerySelect,
    Set,
    sea_query::{Alias, Expr, SimpleExpr},
};

use crate::{
    MarketDbGeneralModelOperations, delete_required,
    db::MarketDb,
    errors::Result,
    pagination::{Page, PageRequest, paginate},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Participant {
    pub kind: String,
    pub id: i32,
}

impl Participant {
    pub fn new(kind: impl Into<String>, id: i32) -> Self {
        Self { kind: kind.into(), id }
    }

    fn is_sender(&self) -> Condition {
        Condition::all()
            .add(message::Column::SenderKind.eq(self.kind.as_str()))
            .add(message::Column::SenderId.eq(self.id))
    }

    fn is_recipient(&self) -> Condition {
        Condition::all()
            .add(message::Column::RecipientKind.eq(self.kind.as_str()))
            .add(message::Column::RecipientId.eq(self.id))
    }

    fn involved(&self) -> Condition {
        Condition::any().add(self.is_sender()).add(self.is_recipient())
    }

}

/// Messages exchanged between `a` and `b` in either direction.
fn between(a: &Participant, b: &Participant) -> Condition {
    Condition::any()
        .add(Condition::all().add(a.is_sender()).add(b.is_recipient()))
        .add(Condition::all().add(b.is_sender()).add(a.is_recipient()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender: Participant,
    pub recipient: Participant,
    pub content: String,
}

/// Latest state of a conversation as seen by one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub counterpart: Participant,
    pub last_message: message::Model,
    /// Messages from the counterpart not yet seen by the participant.
    pub unread_count: u64,
}

/// Per-counterpart aggregate of the conversations of one participant.
#[derive(Debug, FromQueryResult)]
struct ConversationRow {
    counterpart_kind: String,
    counterpart_id: i32,
    last_id: i32,
    unread_count: i64,
}

#[async_trait]
pub trait MarketDbMessageOperations {
    /// Stores a message as sent and not yet seen.
    async fn send_message(&self, new: NewMessage) -> Result<message::Model>;

    async fn get_message(&self, id: i32) -> Result<Option<message::Model>>;

    /// Pages through the messages exchanged between the two participants.
    async fn list_conversation_messages(
        &self,
        participant: &Participant,
        counterpart: &Participant,
        page: PageRequest,
    ) -> Result<Page<message::Model>>;

    /// Marks messages from `counterpart` to `reader` as seen, optionally only up to a message id.
    ///
    /// Returns the number of messages updated.
    async fn mark_messages_seen(&self, reader: &Participant, counterpart: &Participant, up_to: Option<i32>)
    -> Result<u64>;

    /// One entry per counterpart, newest conversation first.
    async fn list_conversations(&self, participant: &Participant) -> Result<Vec<ConversationSummary>>;

    async fn unread_message_count(&self, participant: &Participant) -> Result<u64>;

    async fn delete_message(&self, id: i32) -> Result<message::Model>;
}

#[async_trait]
impl MarketDbMessageOperations for MarketDb {
    #[tracing::instrument(level = "debug", skip(self, new), fields(sender = ?new.sender, recipient = ?new.recipient))]
    async fn send_message(&self, new: NewMessage) -> Result<message::Model> {
        Ok(message::ActiveModel {
            sender_kind: Set(new.sender.kind),
            sender_id: Set(new.sender.id),
            recipient_kind: Set(new.recipient.kind),
            recipient_id: Set(new.recipient.id),
            content: Set(new.content),
            is_sent: Set(true),
            is_seen: Set(false),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.conn())
        .await?)
    }

    async fn get_message(&self, id: i32) -> Result<Option<message::Model>> {
        Ok(message::Entity::find_by_id(id).one(self.conn()).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_conversation_messages(
        &self,
        participant: &Participant,
        counterpart: &Participant,
        page: PageRequest,
    ) -> Result<Page<message::Model>> {
        let select = message::Entity::find().filter(between(participant, counterpart));
        paginate(self.conn(), select, message::Column::Id, page).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn mark_messages_seen(
        &self,
        reader: &Participant,
        counterpart: &Participant,
        up_to: Option<i32>,
    ) -> Result<u64> {
        let mut update = message::Entity::update_many()
            .col_expr(message::Column::IsSeen, Expr::value(true))
            .filter(counterpart.is_sender())
            .filter(reader.is_recipient())
            .filter(message::Column::IsSeen.eq(false));
        if let Some(up_to) = up_to {
            update = update.filter(message::Column::Id.lte(up_to));
        }

        let updated = update
            .exec(self.conn())
            .await?
            .rows_affected;

        tracing::debug!(updated, "messages marked as seen");
        Ok(updated)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_conversations(&self, participant: &Participant) -> Result<Vec<ConversationSummary>> {
        let outgoing = participant.is_sender();
        let counterpart_kind: SimpleExpr = Expr::case(outgoing.clone(), Expr::col(message::Column::RecipientKind))
            .finally(Expr::col(message::Column::SenderKind))
            .into();
        let counterpart_id: SimpleExpr = Expr::case(outgoing, Expr::col(message::Column::RecipientId))
            .finally(Expr::col(message::Column::SenderId))
            .into();
        let unread: SimpleExpr = Expr::case(
            participant.is_recipient().add(message::Column::IsSeen.eq(false)),
            Expr::val(1),
        )
        .finally(Expr::val(0))
        .into();

        // Group by the output aliases, the CASE expressions carry bound parameters
        let mut rows = message::Entity::find()
            .select_only()
            .column_as(counterpart_kind, "counterpart_kind")
            .column_as(counterpart_id, "counterpart_id")
            .column_as(Expr::col(message::Column::Id).max(), "last_id")
            .column_as(Expr::expr(unread).sum(), "unread_count")
            .filter(participant.involved())
            .group_by(SimpleExpr::from(Expr::col(Alias::new("counterpart_kind"))))
            .group_by(SimpleExpr::from(Expr::col(Alias::new("counterpart_id"))))
            .into_model::<ConversationRow>()
            .all(self.conn())
            .await?;
        rows.sort_by(|a, b| b.last_id.cmp(&a.last_id));

        let mut latest: HashMap<i32, message::Model> = message::Entity::find()
            .filter(message::Column::Id.is_in(rows.iter().map(|r| r.last_id)))
            .all(self.conn())
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                latest.remove(&row.last_id).map(|last_message| ConversationSummary {
                    counterpart: Participant::new(row.counterpart_kind, row.counterpart_id),
                    last_message,
                    unread_count: u64::try_from(row.unread_count).unwrap_or_default(),
                })
            })
            .collect())
    }

    async fn unread_message_count(&self, participant: &Participant) -> Result<u64> {
        Ok(message::Entity::find()
            .filter(participant.is_recipient())
            .filter(message::Column::IsSeen.eq(false))
            .count(self.conn())
            .await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_message(&self, id: i32) -> Result<message::Model> {
        delete_required::<message::Entity, _>(self.conn(), "message", id).await
    }
}
