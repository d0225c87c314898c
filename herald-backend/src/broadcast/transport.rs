//! Seams between the broadcast loop and the outside world: the outbound
//! message transport and the clock used for inter-send delays.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Rich-text mode used when rendering an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Telegram's legacy Markdown
    Markdown,
    MarkdownV2,
    Html,
    Plain,
}

impl RenderMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "markdown" => Some(RenderMode::Markdown),
            "markdownv2" | "markdown_v2" => Some(RenderMode::MarkdownV2),
            "html" => Some(RenderMode::Html),
            "plain" | "none" | "" => Some(RenderMode::Plain),
            _ => None,
        }
    }
}

/// Whether a failed delivery is likely to fail again for the same chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailureKind {
    /// Blocked bot, deleted chat, kicked from group
    Permanent,
    /// Network errors, timeouts, flood control
    Transient,
}

#[derive(Debug, Clone)]
pub struct DeliveryError {
    pub kind: DeliveryFailureKind,
    pub message: String,
}

impl DeliveryError {
    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            kind: DeliveryFailureKind::Permanent,
            message: message.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: DeliveryFailureKind::Transient,
            message: message.into(),
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DeliveryFailureKind::Permanent => "permanent",
            DeliveryFailureKind::Transient => "transient",
        };
        write!(f, "{} delivery failure: {}", kind, self.message)
    }
}

impl std::error::Error for DeliveryError {}

/// Outbound message primitive
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str, mode: RenderMode) -> Result<(), DeliveryError>;
}

/// Suspension point between sends
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real-time sleeper backed by the tokio timer
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
