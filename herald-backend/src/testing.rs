//! Test doubles for the transport, clock and registry seams.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::broadcast::{DeliveryError, RenderMode, Sleeper, Transport};
use crate::db::Database;
use crate::error::HeraldError;
use crate::models::Subscriber;
use crate::registry::SubscriberRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub mode: RenderMode,
}

/// Records every send attempt; chats in `failing` always fail.
#[derive(Default)]
pub struct MockTransport {
    attempts: Mutex<Vec<SentMessage>>,
    failing: HashSet<i64>,
}

impl MockTransport {
    pub fn failing_for(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            failing: ids.into_iter().collect(),
        }
    }

    pub fn attempted_ids(&self) -> Vec<i64> {
        self.attempts.lock().unwrap().iter().map(|m| m.chat_id).collect()
    }

    pub fn attempts_for(&self, chat_id: i64) -> usize {
        self.attempted_ids().into_iter().filter(|id| *id == chat_id).count()
    }

    /// Successful sends only
    pub fn sent(&self) -> Vec<SentMessage> {
        self.attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !self.failing.contains(&m.chat_id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, chat_id: i64, text: &str, mode: RenderMode) -> Result<(), DeliveryError> {
        self.attempts.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            mode,
        });
        if self.failing.contains(&chat_id) {
            return Err(DeliveryError::permanent("Forbidden: bot was blocked by the user"));
        }
        Ok(())
    }
}

/// Returns immediately and remembers the requested durations
#[derive(Default)]
pub struct RecordingSleeper {
    durations: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.durations.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.durations.lock().unwrap().push(duration);
    }
}

/// In-memory database that counts every registry call
pub struct CountingRegistry {
    pub db: Database,
    calls: AtomicUsize,
}

impl CountingRegistry {
    pub fn new() -> Self {
        Self {
            db: Database::new(":memory:").expect("in-memory db"),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl SubscriberRegistry for CountingRegistry {
    fn add(&self, chat_id: i64, username: Option<&str>) -> Result<(), HeraldError> {
        self.bump();
        self.db.add(chat_id, username)
    }

    fn remove(&self, chat_id: i64) -> Result<(), HeraldError> {
        self.bump();
        self.db.remove(chat_id)
    }

    fn list_ids(&self) -> Result<Vec<i64>, HeraldError> {
        self.bump();
        self.db.list_ids()
    }

    fn list_detailed(&self) -> Result<Vec<Subscriber>, HeraldError> {
        self.bump();
        self.db.list_detailed()
    }
}

/// Registry whose store is always unavailable
pub struct BrokenRegistry;

impl SubscriberRegistry for BrokenRegistry {
    fn add(&self, _chat_id: i64, _username: Option<&str>) -> Result<(), HeraldError> {
        Err(rusqlite::Error::InvalidQuery.into())
    }

    fn remove(&self, _chat_id: i64) -> Result<(), HeraldError> {
        Err(rusqlite::Error::InvalidQuery.into())
    }

    fn list_ids(&self) -> Result<Vec<i64>, HeraldError> {
        Err(rusqlite::Error::InvalidQuery.into())
    }

    fn list_detailed(&self) -> Result<Vec<Subscriber>, HeraldError> {
        Err(rusqlite::Error::InvalidQuery.into())
    }
}
