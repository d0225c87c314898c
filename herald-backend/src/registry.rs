//! Subscriber registry abstraction used by the command handler.

use crate::db::Database;
use crate::error::HeraldError;
use crate::models::Subscriber;

/// Durable set of subscribed chats. Every write is committed before returning.
pub trait SubscriberRegistry: Send + Sync {
    /// Upsert; a repeat call overwrites the username and timestamp.
    fn add(&self, chat_id: i64, username: Option<&str>) -> Result<(), HeraldError>;

    /// Delete if present, no-op otherwise.
    fn remove(&self, chat_id: i64) -> Result<(), HeraldError>;

    /// All subscribed chat IDs in storage order.
    fn list_ids(&self) -> Result<Vec<i64>, HeraldError>;

    /// All rows with metadata, for /adminlist.
    fn list_detailed(&self) -> Result<Vec<Subscriber>, HeraldError>;
}

impl SubscriberRegistry for Database {
    fn add(&self, chat_id: i64, username: Option<&str>) -> Result<(), HeraldError> {
        self.upsert_subscriber(chat_id, username)?;
        Ok(())
    }

    fn remove(&self, chat_id: i64) -> Result<(), HeraldError> {
        if !self.delete_subscriber(chat_id)? {
            log::debug!("Unsubscribe for {} which was not subscribed", chat_id);
        }
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<i64>, HeraldError> {
        Ok(self.list_subscriber_ids()?)
    }

    fn list_detailed(&self) -> Result<Vec<Subscriber>, HeraldError> {
        Ok(self.list_subscribers()?)
    }
}
