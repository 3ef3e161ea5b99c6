pub mod feed;
pub mod item;
pub mod payload;

pub use feed::FeedConfig;
pub use item::FeedItem;
pub use payload::{Author, NotificationPayload};
