//! Telegram front end for the status board.
//!
//! Boards are plain chat messages: `/create Room1 Room2` posts a message
//! with one button per name plus a ⚡ subscribe button. All board state is
//! kept in the buttons' callback data (see `statusboard_core`), so the bot
//! itself is stateless and every press is handled on its own.
//!
//! # Configuration
//!
//! The bot token is read from `/data/options.json` (`{"TOKEN": "..."}`)
//! when that file exists, otherwise from `--token` or the `TOKEN`
//! environment variable.
//!
//! # Commands
//!
//! - `/start`, `/help` - Show usage
//! - `/create <name1> ... <nameN>` - Post a new board

pub mod bot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod markup;
pub mod transport;

pub use bot::StatusBoardBot;
pub use config::{BotConfig, DEFAULT_OPTIONS_FILE, TOKEN_ENV};
pub use error::{Result, TelegramError};
pub use handlers::Command;
pub use markup::Interaction;
pub use transport::BoardTransport;
