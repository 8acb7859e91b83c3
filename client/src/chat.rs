use std::collections::HashSet;

use crate::types::{Connection, Edge, Message, PageArgs, Participant};

/// Local copy of the message history between two participants.
///
/// Older pages loaded by backfill go to the front and newer pages loaded by polling go to the
/// back. Messages already held are skipped, so overlapping pages are harmless.
#[derive(Clone, Debug)]
pub struct MessageLog {
    owner: Participant,
    counterpart: Participant,
    entries: Vec<Edge<Message>>,
    ids: HashSet<i32>,
    has_older: bool,
}

impl MessageLog {
    pub fn new(owner: Participant, counterpart: Participant) -> Self {
        Self {
            owner,
            counterpart,
            entries: Vec::new(),
            ids: HashSet::new(),
            has_older: true,
        }
    }

    pub fn owner(&self) -> Participant {
        self.owner
    }

    pub fn counterpart(&self) -> Participant {
        self.counterpart
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages in ascending id order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().map(|e| &e.node)
    }

    /// Whether the server reported history before the oldest held message.
    pub fn has_older(&self) -> bool {
        self.has_older
    }

    pub fn oldest_cursor(&self) -> Option<&str> {
        self.entries.first().map(|e| e.cursor.as_str())
    }

    pub fn newest_cursor(&self) -> Option<&str> {
        self.entries.last().map(|e| e.cursor.as_str())
    }

    /// Arguments loading the page before the oldest held message.
    pub fn backfill_args(&self, page_size: i32) -> PageArgs {
        match self.oldest_cursor() {
            Some(cursor) => PageArgs::backward(page_size, cursor),
            None => PageArgs::last(page_size),
        }
    }

    /// Arguments loading messages after the newest held message.
    ///
    /// An empty log starts from the latest page.
    pub fn poll_args(&self, page_size: i32) -> PageArgs {
        match self.newest_cursor() {
            Some(cursor) => PageArgs::forward(page_size, cursor),
            None => PageArgs::last(page_size),
        }
    }

    /// Merges an older page at the front. Returns the number of new messages.
    pub fn prepend_older(&mut self, page: Connection<Message>) -> usize {
        self.has_older = page.page_info.has_previous_page;
        let fresh: Vec<_> = page.edges.into_iter().filter(|e| self.ids.insert(e.node.id)).collect();
        let added = fresh.len();
        self.entries.splice(0..0, fresh);
        self.restore_order();
        added
    }

    /// Merges a newer page at the back. Returns the number of new messages.
    pub fn append_newer(&mut self, page: Connection<Message>) -> usize {
        if self.entries.is_empty() {
            self.has_older = page.page_info.has_previous_page;
        }
        let fresh: Vec<_> = page.edges.into_iter().filter(|e| self.ids.insert(e.node.id)).collect();
        let added = fresh.len();
        self.entries.extend(fresh);
        self.restore_order();
        added
    }

    /// Ids of messages from the counterpart to the owner that are not seen yet.
    pub fn unseen_from_counterpart(&self) -> Vec<i32> {
        self.messages()
            .filter(|m| !m.is_seen && m.sender == self.counterpart && m.recipient == self.owner)
            .map(|m| m.id)
            .collect()
    }

    /// Flags held messages from the counterpart as seen, up to and including `up_to`.
    pub fn mark_seen_locally(&mut self, up_to: i32) {
        for edge in &mut self.entries {
            let m = &mut edge.node;
            if m.id <= up_to && m.sender == self.counterpart && m.recipient == self.owner {
                m.is_seen = true;
            }
        }
    }

    fn restore_order(&mut self) {
        if !self.entries.is_sorted_by_key(|e| e.node.id) {
            self.entries.sort_by_key(|e| e.node.id);
        }
    }
}
