//! Chat-bot front end: Telegram update types, text command parsing, and a
//! dispatcher that calls the same services as the HTTP API.

pub mod client;
pub mod command;
pub mod dispatch;

pub use client::TelegramClient;
pub use command::parse_command;
pub use dispatch::handle_command;

use serde::Deserialize;

/// The subset of a Telegram `Update` the bot reads.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<Sender>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sender {
    pub id: i64,
    pub username: Option<String>,
}
