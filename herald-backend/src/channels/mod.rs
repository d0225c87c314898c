pub mod handler;
pub mod telegram;
pub mod types;

pub use handler::CommandHandler;
