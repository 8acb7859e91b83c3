use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sender_kind: String,
    pub sender_id: i32,
    pub recipient_kind: String,
    pub recipient_id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub is_sent: bool,
    pub is_seen: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
