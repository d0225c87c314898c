use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};
use teloxide::{ApiError, RequestError};

use crate::auth::AdminSet;
use crate::broadcast::{DeliveryError, RenderMode, Transport};
use crate::channels::handler::CommandHandler;
use crate::channels::types::Invocation;
use crate::commands::{self, Command};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Outbound transport backed by the Telegram Bot API
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send(&self, chat_id: i64, text: &str, mode: RenderMode) -> Result<(), DeliveryError> {
        let request = self.bot.send_message(ChatId(chat_id), text);
        let result = match parse_mode(mode) {
            Some(parse_mode) => request.parse_mode(parse_mode).await,
            None => request.await,
        };
        result.map(|_| ()).map_err(classify_error)
    }
}

#[allow(deprecated)]
fn parse_mode(mode: RenderMode) -> Option<ParseMode> {
    match mode {
        RenderMode::Markdown => Some(ParseMode::Markdown),
        RenderMode::MarkdownV2 => Some(ParseMode::MarkdownV2),
        RenderMode::Html => Some(ParseMode::Html),
        RenderMode::Plain => None,
    }
}

/// Chats that blocked or removed the bot will keep failing; everything else
/// (network, timeouts, flood control) may succeed later.
fn classify_error(e: RequestError) -> DeliveryError {
    match &e {
        RequestError::Api(
            ApiError::BotBlocked
            | ApiError::ChatNotFound
            | ApiError::UserDeactivated
            | ApiError::BotKicked,
        ) => DeliveryError::permanent(e.to_string()),
        _ => DeliveryError::transient(e.to_string()),
    }
}

/// Extract a command invocation from a Telegram message.
/// Returns None for non-text messages, non-commands and messages without a sender.
fn invocation_from_message(msg: &Message, bot_username: &str) -> Option<Invocation> {
    let text = msg.text()?;
    let command = Command::parse(text, bot_username)?;
    let user = msg.from()?;

    Some(Invocation {
        user_id: user.id.0,
        username: user.username.clone(),
        chat_id: msg.chat.id.0,
        command,
        reply_text: msg
            .reply_to_message()
            .and_then(|r| r.text())
            .map(str::to_string),
    })
}

/// Start the Telegram long-polling listener. Runs until ctrl-c.
pub async fn start_telegram_listener(
    bot: Bot,
    handler: Arc<CommandHandler>,
    admins: Arc<AdminSet>,
) -> Result<(), String> {
    log::info!("Telegram: Validating bot token...");
    let me = match bot.get_me().await {
        Ok(me) => {
            log::info!(
                "Telegram: Bot validated - username: @{}, id: {}",
                me.username(),
                me.id
            );
            me
        }
        Err(e) => {
            let error = format!("Invalid Telegram bot token: {}", e);
            log::error!("Telegram: {}", error);
            return Err(error);
        }
    };

    let menu: Vec<BotCommand> = commands::PUBLIC_COMMANDS
        .iter()
        .map(|(command, description)| BotCommand::new(*command, *description))
        .collect();
    if let Err(e) = bot.set_my_commands(menu).await {
        log::warn!("Telegram: Failed to register command menu: {}", e);
    }

    if admins.is_empty() {
        log::warn!("Telegram: No admins configured, /post and /adminlist are disabled");
    } else {
        log::info!(
            "Telegram: {} admin(s) configured for @{}",
            admins.len(),
            me.username()
        );
    }

    // Admin-only commands from anyone outside the admin set are answered by
    // `deny_invocation` and never reach the command handler.
    let bot_username = me.username().to_string();
    let schema = Update::filter_message()
        .filter_map(move |msg: Message| invocation_from_message(&msg, &bot_username))
        .branch(
            dptree::filter(|invocation: Invocation, admins: Arc<AdminSet>| {
                !admins.permits(&invocation.command, invocation.user_id)
            })
            .endpoint(deny_invocation),
        )
        .branch(dptree::endpoint(handle_invocation));

    let mut tg_dispatcher = Dispatcher::builder(bot, schema)
        .dependencies(dptree::deps![handler, admins])
        .default_handler(|update| async move {
            log::trace!("Telegram: Ignoring update {:?}", update.id);
        })
        .enable_ctrlc_handler()
        .build();

    log::info!("✅ Bot started. Listening...");
    tg_dispatcher.dispatch().await;
    log::info!("Telegram listener stopped");

    Ok(())
}

async fn deny_invocation(bot: Bot, msg: Message, invocation: Invocation) -> HandlerResult {
    log::info!(
        "Telegram: Filtered {:?} from non-admin user {}",
        invocation.command,
        invocation.user_id
    );
    let text = invocation
        .command
        .denial_text()
        .unwrap_or(commands::UNKNOWN_COMMAND_TEXT);
    reply(&bot, &msg, text).await
}

async fn handle_invocation(
    bot: Bot,
    msg: Message,
    invocation: Invocation,
    handler: Arc<CommandHandler>,
) -> HandlerResult {
    log::info!(
        "Telegram: {:?} from user {} in chat {}",
        invocation.command,
        invocation.user_id,
        invocation.chat_id
    );
    let text = handler.handle(&invocation).await;
    reply(&bot, &msg, &text).await
}

async fn reply(bot: &Bot, msg: &Message, text: &str) -> HandlerResult {
    if let Err(e) = bot.send_message(msg.chat.id, text).await {
        log::error!("Telegram: Failed to send reply to chat {}: {}", msg.chat.id, e);
    }
    Ok(())
}
