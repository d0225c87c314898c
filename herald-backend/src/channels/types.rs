use crate::commands::Command;

/// A parsed command invocation, independent of the Telegram types
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Platform user ID of the sender (checked against the admin set)
    pub user_id: u64,
    /// Sender's @username, if they have one
    pub username: Option<String>,
    /// Conversation to reply to, and the identity stored on subscribe
    pub chat_id: i64,
    pub command: Command,
    /// Text of the message this command replies to
    pub reply_text: Option<String>,
}
