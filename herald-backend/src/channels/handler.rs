//! Command handler: maps one invocation to exactly one reply text.

use std::sync::Arc;

use crate::auth::AdminSet;
use crate::broadcast::Broadcaster;
use crate::channels::types::Invocation;
use crate::commands::{self, Command};
use crate::error::HeraldError;
use crate::registry::SubscriberRegistry;

pub struct CommandHandler {
    registry: Arc<dyn SubscriberRegistry>,
    admins: Arc<AdminSet>,
    broadcaster: Broadcaster,
}

impl CommandHandler {
    pub fn new(
        registry: Arc<dyn SubscriberRegistry>,
        admins: Arc<AdminSet>,
        broadcaster: Broadcaster,
    ) -> Self {
        Self {
            registry,
            admins,
            broadcaster,
        }
    }

    /// Denial reply for an admin-only command from a non-admin, if any
    pub fn denial(&self, invocation: &Invocation) -> Option<&'static str> {
        if self.admins.permits(&invocation.command, invocation.user_id) {
            return None;
        }
        log::info!(
            "Denied {:?} for non-admin user {}",
            invocation.command,
            invocation.user_id
        );
        invocation.command.denial_text()
    }

    pub async fn handle(&self, invocation: &Invocation) -> String {
        // The listener filters non-admins out before they get here; check again anyway
        if let Some(denial) = self.denial(invocation) {
            return denial.to_string();
        }

        let result = match &invocation.command {
            Command::Start => Ok(commands::WELCOME_TEXT.to_string()),
            Command::About => Ok(commands::ABOUT_TEXT.to_string()),
            Command::Subscribe => self.subscribe(invocation),
            Command::Unsubscribe => self.unsubscribe(invocation),
            Command::Status => self.status(invocation),
            Command::AdminList => self.admin_list(),
            Command::Post(argument) => self.post(argument, invocation.reply_text.as_deref()).await,
            Command::Unknown(name) => {
                log::debug!("Unknown command /{} from chat {}", name, invocation.chat_id);
                Ok(commands::UNKNOWN_COMMAND_TEXT.to_string())
            }
        };

        result.unwrap_or_else(|e| {
            log::error!(
                "Command {:?} failed for chat {}: {}",
                invocation.command,
                invocation.chat_id,
                e
            );
            commands::STORAGE_FAILURE_TEXT.to_string()
        })
    }

    fn subscribe(&self, invocation: &Invocation) -> Result<String, HeraldError> {
        self.registry
            .add(invocation.chat_id, invocation.username.as_deref())?;
        log::info!(
            "Chat {} subscribed ({})",
            invocation.chat_id,
            invocation.username.as_deref().unwrap_or("no username")
        );
        Ok(commands::SUBSCRIBED_TEXT.to_string())
    }

    fn unsubscribe(&self, invocation: &Invocation) -> Result<String, HeraldError> {
        self.registry.remove(invocation.chat_id)?;
        log::info!("Chat {} unsubscribed", invocation.chat_id);
        Ok(commands::UNSUBSCRIBED_TEXT.to_string())
    }

    fn status(&self, invocation: &Invocation) -> Result<String, HeraldError> {
        let subscribed = self.registry.list_ids()?.contains(&invocation.chat_id);
        Ok(if subscribed {
            commands::STATUS_SUBSCRIBED_TEXT
        } else {
            commands::STATUS_NOT_SUBSCRIBED_TEXT
        }
        .to_string())
    }

    fn admin_list(&self) -> Result<String, HeraldError> {
        let rows = self.registry.list_detailed()?;
        if rows.is_empty() {
            return Ok(commands::NO_SUBSCRIBERS_TEXT.to_string());
        }
        let lines: Vec<String> = rows.iter().map(|s| s.display_line()).collect();
        Ok(format!(
            "Total subscribers: {}\n\n{}",
            rows.len(),
            lines.join("\n")
        ))
    }

    async fn post(&self, argument: &str, reply_text: Option<&str>) -> Result<String, HeraldError> {
        let payload = if argument.trim().is_empty() {
            reply_text.unwrap_or_default()
        } else {
            argument
        };
        if payload.trim().is_empty() {
            return Ok(commands::POST_USAGE_TEXT.to_string());
        }

        let message = self.broadcaster.render(payload);
        // Snapshot: changes made while the job runs do not affect it
        let recipients = self.registry.list_ids()?;
        let report = self.broadcaster.deliver(&recipients, &message).await;

        Ok(format!("🟢 Message sent to {} subscribers.", report.delivered))
    }
}
