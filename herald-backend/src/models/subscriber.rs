/// One opted-in chat. Re-subscribing overwrites `username` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    pub chat_id: i64,
    pub username: Option<String>,
    /// RFC 3339, UTC
    pub created_at: Option<String>,
}

impl Subscriber {
    /// Line used in the /adminlist reply
    pub fn display_line(&self) -> String {
        format!(
            "{} — {}",
            self.username.as_deref().unwrap_or("(no username)"),
            self.chat_id
        )
    }
}
