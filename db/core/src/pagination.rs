//! Keyset pagination over integer primary keys.
//!
//! Pages are always returned in ascending id order. Forward requests select rows after a
//! cursor, backward requests select rows before a cursor, and one extra row is fetched to
//! decide whether the page has a neighbour in the direction of travel.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};

use crate::errors::Result;

/// Page request already validated and clamped by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// `first` rows with `id > after`.
    Forward { first: u64, after: Option<i32> },
    /// `last` rows with `id < before`.
    Backward { last: u64, before: Option<i32> },
}

impl PageRequest {
    pub fn first(first: u64) -> Self {
        Self::Forward { first, after: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    /// Rows matching the filter, ignoring the cursor.
    pub total_count: u64,
}

impl<T> Page<T> {
    /// Replaces the items while keeping the page flags.
    pub fn with_items<U>(self, items: Vec<U>) -> Page<U> {
        Page {
            items,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
            total_count: self.total_count,
        }
    }
}

/// Executes `select` as one page of `request`, ordered by `id_column`.
///
/// The select must carry only filters; ordering and limits are applied here.
pub async fn paginate<E, C>(db: &C, select: Select<E>, id_column: E::Column, request: PageRequest) -> Result<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
    C: ConnectionTrait,
{
    let total_count = select.clone().count(db).await?;

    match request {
        PageRequest::Forward { first, after } => {
            let mut query = select.clone();
            if let Some(after) = after {
                query = query.filter(id_column.gt(after));
            }

            let mut items = query.order_by_asc(id_column).limit(first.saturating_add(1)).all(db).await?;
            let has_next_page = items.len() as u64 > first;
            items.truncate(first as usize);

            let has_previous_page = match after {
                Some(after) => select.filter(id_column.lte(after)).count(db).await? > 0,
                None => false,
            };

            Ok(Page {
                items,
                has_next_page,
                has_previous_page,
                total_count,
            })
        }
        PageRequest::Backward { last, before } => {
            let mut query = select.clone();
            if let Some(before) = before {
                query = query.filter(id_column.lt(before));
            }

            let mut items = query.order_by_desc(id_column).limit(last.saturating_add(1)).all(db).await?;
            let has_previous_page = items.len() as u64 > last;
            items.truncate(last as usize);
            items.reverse();

            let has_next_page = match before {
                Some(before) => select.filter(id_column.gte(before)).count(db).await? > 0,
                None => false,
            };

            Ok(Page {
                items,
                has_next_page,
                has_previous_page,
                total_count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use marketplace_db_entity::organization;
    use sea_orm::{ActiveModelTrait, Set};

    use super::*;
    use crate::{MarketDbGeneralModelOperations, db::MarketDb};

    async fn seed(db: &MarketDb, count: usize) -> anyhow::Result<Vec<i32>> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let now = chrono::Utc::now();
            let org = organization::ActiveModel {
                name: Set(format!("org-{i}")),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db.conn())
            .await?;
            ids.push(org.id);
        }
        Ok(ids)
    }

    fn ids(page: &Page<organization::Model>) -> Vec<i32> {
        page.items.iter().map(|o| o.id).collect()
    }

    #[tokio::test]
    async fn forward_pages_walk_the_table_in_id_order() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let all = seed(&db, 5).await?;

        let first = paginate(
            db.conn(),
            organization::Entity::find(),
            organization::Column::Id,
            PageRequest::first(2),
        )
        .await?;
        assert_eq!(ids(&first), all[0..2]);
        assert!(first.has_next_page);
        assert!(!first.has_previous_page);
        assert_eq!(first.total_count, 5);

        let last = paginate(
            db.conn(),
            organization::Entity::find(),
            organization::Column::Id,
            PageRequest::Forward {
                first: 2,
                after: Some(all[3]),
            },
        )
        .await?;
        assert_eq!(ids(&last), all[4..5]);
        assert!(!last.has_next_page);
        assert!(last.has_previous_page);

        Ok(())
    }

    #[tokio::test]
    async fn backward_pages_are_returned_in_ascending_order() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let all = seed(&db, 5).await?;

        let page = paginate(
            db.conn(),
            organization::Entity::find(),
            organization::Column::Id,
            PageRequest::Backward {
                last: 2,
                before: Some(all[4]),
            },
        )
        .await?;
        assert_eq!(ids(&page), all[2..4]);
        assert!(page.has_previous_page);
        assert!(page.has_next_page);

        let tail = paginate(
            db.conn(),
            organization::Entity::find(),
            organization::Column::Id,
            PageRequest::Backward { last: 3, before: None },
        )
        .await?;
        assert_eq!(ids(&tail), all[2..5]);
        assert!(tail.has_previous_page);
        assert!(!tail.has_next_page);

        Ok(())
    }

    #[tokio::test]
    async fn zero_sized_page_keeps_accurate_flags() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        let all = seed(&db, 3).await?;

        let page = paginate(
            db.conn(),
            organization::Entity::find(),
            organization::Column::Id,
            PageRequest::Forward {
                first: 0,
                after: Some(all[0]),
            },
        )
        .await?;
        assert!(page.items.is_empty());
        assert!(page.has_next_page);
        assert!(page.has_previous_page);
        assert_eq!(page.total_count, 3);

        Ok(())
    }

    #[tokio::test]
    async fn total_count_respects_the_filter() -> anyhow::Result<()> {
        let db = MarketDb::new_in_memory().await?;
        seed(&db, 4).await?;

        let page = paginate(
            db.conn(),
            organization::Entity::find().filter(organization::Column::Name.eq("org-1")),
            organization::Column::Id,
            PageRequest::first(10),
        )
        .await?;
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name, "org-1");
        assert!(!page.has_next_page);

        Ok(())
    }
}
