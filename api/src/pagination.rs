//! Relay cursor arguments and connection assembly
//!
//! Cursors are the base64 encoding of `cursor:<id>`. Clients must treat them as opaque.

use async_graphql::{Error, OutputType};
use base64::{Engine, prelude::BASE64_STANDARD};
use marketplace_api_types::{Connection, Edge, PageInfo};
use marketplace_db::pagination::{Page, PageRequest};

use crate::{config::PaginationConfig, errors};

const CURSOR_PREFIX: &str = "cursor:";

/// Encodes a record id as an opaque cursor
pub fn encode_cursor(id: i32) -> String {
    BASE64_STANDARD.encode(format!("{CURSOR_PREFIX}{id}"))
}

/// Decodes a cursor produced by [`encode_cursor`]
pub fn decode_cursor(cursor: &str) -> Result<i32, Error> {
    BASE64_STANDARD
        .decode(cursor)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|decoded| decoded.strip_prefix(CURSOR_PREFIX).and_then(|id| id.parse().ok()))
        .ok_or_else(|| errors::invalid_cursor(cursor))
}

/// Raw `first/after/last/before` connection arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    pub first: Option<i32>,
    pub after: Option<String>,
    pub last: Option<i32>,
    pub before: Option<String>,
}

impl PageArgs {
    pub fn new(first: Option<i32>, after: Option<String>, last: Option<i32>, before: Option<String>) -> Self {
        Self {
            first,
            after,
            last,
            before,
        }
    }

    /// Validates the argument combination and clamps the page size.
    pub fn into_request(self, config: &PaginationConfig) -> Result<PageRequest, Error> {
        if self.first.is_some() && self.last.is_some() {
            return Err(errors::invalid_pagination("'first' and 'last' cannot be combined"));
        }
        if self.after.is_some() && self.last.is_some() {
            return Err(errors::invalid_pagination("'after' can only be used with 'first'"));
        }
        if self.before.is_some() && self.first.is_some() {
            return Err(errors::invalid_pagination("'before' can only be used with 'last'"));
        }
        if self.after.is_some() && self.before.is_some() {
            return Err(errors::invalid_pagination("'after' and 'before' cannot be combined"));
        }

        let size = |requested: Option<i32>, name: &str| -> Result<u64, Error> {
            match requested {
                None => Ok(config.default_page_size),
                Some(n) if n < 0 => Err(errors::invalid_pagination(&format!("'{name}' must not be negative"))),
                Some(n) => Ok((n as u64).min(config.max_page_size)),
            }
        };

        if self.last.is_some() || self.before.is_some() {
            Ok(PageRequest::Backward {
                last: size(self.last, "last")?,
                before: self.before.as_deref().map(decode_cursor).transpose()?,
            })
        } else {
            Ok(PageRequest::Forward {
                first: size(self.first, "first")?,
                after: self.after.as_deref().map(decode_cursor).transpose()?,
            })
        }
    }
}

/// Builds a relay connection from a database page
///
/// `id` extracts the primary key used for the cursor, `convert` maps each item to its
/// GraphQL node.
pub fn into_connection<M, T, I, C>(page: Page<M>, id: I, mut convert: C) -> Result<Connection<T>, Error>
where
    T: OutputType,
    Edge<T>: OutputType,
    I: Fn(&M) -> i32,
    C: FnMut(M) -> Result<T, Error>,
{
    let edges = page
        .items
        .into_iter()
        .map(|item| {
            let cursor = encode_cursor(id(&item));
            Ok(Edge {
                cursor,
                node: convert(item)?,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let page_info = PageInfo {
        start_cursor: edges.first().map(|e| e.cursor.clone()),
        end_cursor: edges.last().map(|e| e.cursor.clone()),
        has_next_page: page.has_next_page,
        has_previous_page: page.has_previous_page,
    };

    Ok(Connection {
        edges,
        page_info,
        total_count: i64::try_from(page.total_count).unwrap_or(i64::MAX),
    })
}
