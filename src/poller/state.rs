use std::collections::HashMap;

use crate::domain::FeedItem;

/// Outcome of comparing a fetched feed against the last announced title.
#[derive(Debug, PartialEq)]
pub enum Change<'a> {
    /// The feed returned no items.
    Empty,
    /// First successful poll: only the newest item is announced.
    Initialized(&'a FeedItem),
    /// Newest title matches the stored one.
    Unchanged,
    /// New items, oldest first.
    New(Vec<&'a FeedItem>),
}

impl<'a> Change<'a> {
    /// Items to announce, in announcement order.
    pub fn items(&self) -> Vec<&'a FeedItem> {
        match self {
            Change::Empty | Change::Unchanged => Vec::new(),
            Change::Initialized(item) => vec![*item],
            Change::New(items) => items.clone(),
        }
    }
}

/// Last announced title per feed URL.
///
/// Items are identified by title alone, so a new item that reuses the title
/// of the last announced one is taken as already seen.
#[derive(Debug, Default, Clone)]
pub struct FeedState {
    last_titles: HashMap<String, String>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_title(&self, feed_key: &str) -> Option<&str> {
        self.last_titles.get(feed_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.last_titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_titles.is_empty()
    }

    /// Work out which of `fetched` (newest first) are new. Does not modify state.
    pub fn detect<'a>(&self, feed_key: &str, fetched: &'a [FeedItem]) -> Change<'a> {
        let Some(newest) = fetched.first() else {
            return Change::Empty;
        };

        let Some(last_title) = self.last_title(feed_key) else {
            return Change::Initialized(newest);
        };

        if newest.title == last_title {
            return Change::Unchanged;
        }

        let mut new_items: Vec<&FeedItem> = fetched
            .iter()
            .take_while(|item| item.title != last_title)
            .collect();
        new_items.reverse();

        Change::New(new_items)
    }

    /// Remember the newest fetched title after its batch has been attempted.
    pub fn record(&mut self, feed_key: &str, fetched: &[FeedItem]) {
        if let Some(newest) = fetched.first() {
            self.last_titles
                .insert(feed_key.to_string(), newest.title.clone());
        }
    }
}
