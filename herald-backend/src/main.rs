//! Herald: Telegram bot that lets users opt in to alerts and lets admins
//! broadcast a message to every subscriber.

use dotenv::dotenv;
use std::sync::Arc;
use teloxide::Bot;

mod auth;
mod broadcast;
mod channels;
mod commands;
mod config;
mod db;
mod error;
mod models;
mod registry;
#[cfg(test)]
mod testing;

use broadcast::{BroadcastSettings, Broadcaster, TokioSleeper};
use channels::telegram::{self, TelegramTransport};
use channels::CommandHandler;
use config::Config;
use db::Database;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!("Initializing database at {}", config.db_path);
    let db = match Database::new(&config.db_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };
    match db.count_subscribers() {
        Ok(count) => log::info!("Loaded {} subscriber(s)", count),
        Err(e) => log::warn!("Failed to count subscribers: {}", e),
    }

    let bot = Bot::new(&config.bot_token);
    let admins = Arc::new(config.admins.clone());
    log::info!(
        "Broadcast cooldown {:?}, failure delay {:?}, footer {}",
        config.cooldown,
        config.failure_delay,
        if config.footer.is_empty() { "disabled" } else { "enabled" }
    );

    let broadcaster = Broadcaster::new(
        Arc::new(TelegramTransport::new(bot.clone())),
        Arc::new(TokioSleeper),
        BroadcastSettings::from_config(&config),
    );
    let handler = Arc::new(CommandHandler::new(db, admins.clone(), broadcaster));

    if let Err(e) = telegram::start_telegram_listener(bot, handler, admins).await {
        log::error!("Telegram listener error: {}", e);
        std::process::exit(1);
    }
}
