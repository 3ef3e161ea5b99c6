//! Notification composition and delivery.
//!
//! - [`NotificationComposer`]: turns an item into a [`NotificationPayload`]
//! - [`Delivery`]: destination lookup and sending, implemented by
//!   [`DiscordClient`]

mod composer;
mod discord;

pub use composer::{excerpt, NotificationComposer, ELLIPSIS, EXCERPT_LIMIT, EXCERPT_PLACEHOLDER};
pub use discord::DiscordClient;

use async_trait::async_trait;

use crate::app::DeliveryError;
use crate::domain::NotificationPayload;

/// A resolved messaging destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub id: String,
    pub name: Option<String>,
}

impl Destination {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// Messaging platform seen by the poller.
#[async_trait]
pub trait Delivery {
    /// Look up a destination. `Ok(None)` means it does not exist or is not visible.
    async fn resolve(&self, destination_id: &str) -> Result<Option<Destination>, DeliveryError>;

    async fn send(
        &self,
        destination: &Destination,
        payload: &NotificationPayload,
    ) -> Result<(), DeliveryError>;
}
