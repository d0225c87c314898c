use std::sync::Arc;
use std::time::Duration;

use super::format::format_broadcast;
use super::transport::{RenderMode, Sleeper, Transport};
use super::DeliveryFailureKind;
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct BroadcastSettings {
    /// Wait after each successful send
    pub cooldown: Duration,
    /// Wait after each failed send
    pub failure_delay: Duration,
    pub footer: String,
    pub render_mode: RenderMode,
}

impl BroadcastSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cooldown: config.cooldown,
            failure_delay: config.failure_delay,
            footer: config.footer.clone(),
            render_mode: config.render_mode,
        }
    }
}

/// Outcome of one broadcast job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Sends one message to a list of chats, strictly one at a time.
///
/// The delays are the only throttling, so sends are never run concurrently.
/// A failed recipient is logged and skipped; it is never retried or removed.
pub struct Broadcaster {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    settings: BroadcastSettings,
}

impl Broadcaster {
    pub fn new(
        transport: Arc<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
        settings: BroadcastSettings,
    ) -> Self {
        Self {
            transport,
            sleeper,
            settings,
        }
    }

    /// Apply dedent/trim and the configured footer
    pub fn render(&self, text: &str) -> String {
        format_broadcast(text, &self.settings.footer)
    }

    /// Deliver `message` to every chat in `recipients`, in order.
    pub async fn deliver(&self, recipients: &[i64], message: &str) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        log::info!("Broadcast: starting delivery to {} subscriber(s)", recipients.len());

        for &chat_id in recipients {
            report.attempted += 1;
            match self
                .transport
                .send(chat_id, message, self.settings.render_mode)
                .await
            {
                Ok(()) => {
                    report.delivered += 1;
                    log::debug!("Broadcast: delivered to {}", chat_id);
                    self.sleeper.sleep(self.settings.cooldown).await;
                }
                Err(e) => {
                    report.failed += 1;
                    // Never unsubscribed automatically, even when the chat looks gone
                    if e.kind == DeliveryFailureKind::Permanent {
                        log::warn!("Broadcast: chat {} is unreachable: {}", chat_id, e.message);
                    } else {
                        log::warn!("Broadcast: skipping {}: {}", chat_id, e);
                    }
                    self.sleeper.sleep(self.settings.failure_delay).await;
                }
            }
        }

        log::info!(
            "Broadcast: finished, {} delivered, {} failed",
            report.delivered,
            report.failed
        );
        report
    }
}
