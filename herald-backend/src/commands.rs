//! Command token parsing and the fixed reply texts.

/// Welcome text for /start
pub const WELCOME_TEXT: &str = "👋 Welcome!\n\n\
    Available commands:\n\
    /subscribe – subscribe to alerts\n\
    /unsubscribe – unsubscribe from alerts\n\
    /status – check your subscription status\n\
    /about – info and disclaimer";

pub const ABOUT_TEXT: &str = "For educational purposes only. This is not financial advice.";
pub const SUBSCRIBED_TEXT: &str = "✅ Subscription activated: you'll receive future alerts.";
pub const UNSUBSCRIBED_TEXT: &str = "❎ Subscription canceled.";
pub const STATUS_SUBSCRIBED_TEXT: &str = "🔔 You are subscribed.";
pub const STATUS_NOT_SUBSCRIBED_TEXT: &str = "🔕 You are not subscribed.";
pub const ADMINLIST_DENIED_TEXT: &str = "Admins only.";
pub const POST_DENIED_TEXT: &str = "This command is for admins only.";
pub const NO_SUBSCRIBERS_TEXT: &str = "No subscribers yet.";
pub const POST_USAGE_TEXT: &str = "Usage: /post <text> or reply to a message with /post.";
pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Use /start to see available commands.";
pub const STORAGE_FAILURE_TEXT: &str = "Sorry, something went wrong. Please try again later.";

/// Commands shown in the Telegram command menu. Admin commands are left out.
pub const PUBLIC_COMMANDS: &[(&str, &str)] = &[
    ("start", "show available commands"),
    ("subscribe", "subscribe to alerts"),
    ("unsubscribe", "unsubscribe from alerts"),
    ("status", "check your subscription status"),
    ("about", "info and disclaimer"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    About,
    Subscribe,
    Unsubscribe,
    Status,
    AdminList,
    /// Raw argument text after the command token (may be empty)
    Post(String),
    Unknown(String),
}

impl Command {
    /// Parse a message text into a command.
    ///
    /// Returns `None` for anything that is not a `/command`. The token is
    /// matched case-insensitively. A `@suffix` naming `bot_username` is
    /// ignored; a command addressed to another bot is `Unknown`.
    pub fn parse(text: &str, bot_username: &str) -> Option<Command> {
        let text = text.trim_start();
        let body = text.strip_prefix('/')?;

        let (token, rest) = match body.find(char::is_whitespace) {
            Some(idx) => {
                let sep_len = body[idx..].chars().next().map(char::len_utf8).unwrap_or(1);
                (&body[..idx], &body[idx + sep_len..])
            }
            None => (body, ""),
        };
        let (name, addressee) = match token.split_once('@') {
            Some((name, addressee)) => (name, Some(addressee)),
            None => (token, None),
        };
        let name = name.to_lowercase();
        if let Some(addressee) = addressee {
            if !addressee.eq_ignore_ascii_case(bot_username) {
                return Some(Command::Unknown(name));
            }
        }

        let command = match name.as_str() {
            "start" => Command::Start,
            "about" => Command::About,
            "subscribe" => Command::Subscribe,
            "unsubscribe" => Command::Unsubscribe,
            "status" => Command::Status,
            "adminlist" => Command::AdminList,
            "post" => Command::Post(rest.to_string()),
            _ => Command::Unknown(name),
        };
        Some(command)
    }

    /// Whether the command is restricted to the admin set
    pub fn requires_admin(&self) -> bool {
        matches!(self, Command::AdminList | Command::Post(_))
    }

    /// Reply sent to a non-admin invoking an admin-only command
    pub fn denial_text(&self) -> Option<&'static str> {
        match self {
            Command::AdminList => Some(ADMINLIST_DENIED_TEXT),
            Command::Post(_) => Some(POST_DENIED_TEXT),
            _ => None,
        }
    }
}
