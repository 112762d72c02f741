//! Command and callback handlers for the Telegram bot.
//!
//! Handlers never fail the update: board errors are logged and either
//! answered with a reply (commands) or turned into a no-op (presses).
//! Outbound calls are fire-and-forget; their errors are logged, not retried.

use statusboard_core::{create_board, parse_names, rebuild_board, BoardError};
use teloxide::types::ChatId;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::markup::Interaction;
use crate::transport::BoardTransport;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and get help")]
    Start,

    #[command(description = "Show help message")]
    Help,

    #[command(description = "Create a board: /create <name1> <name2> ... <nameN>")]
    Create(String),
}

/// Handle /start and /help.
pub async fn handle_help<T: BoardTransport + ?Sized>(transport: &T, chat_id: ChatId) {
    let help_text = format!(
        "Shared status board.\n\n\
        Create a board with /create followed by the names of the things to track. \
        Tap a button to mark it busy or free, tap ⚡ to get a message whenever \
        someone else changes the board.\n\n{}",
        Command::descriptions()
    );

    if let Err(e) = transport.send_text(chat_id, &help_text).await {
        warn!(chat_id = %chat_id, error = %e, "Failed to send help");
    }
}

/// Handle /create: post a fresh board with every item free.
pub async fn handle_create<T: BoardTransport + ?Sized>(transport: &T, chat_id: ChatId, args: &str) {
    info!(chat_id = %chat_id, args = %args, "Create requested");

    let board = match parse_names(args).and_then(|names| create_board(names.as_slice())) {
        Ok(board) => board,
        Err(e) => {
            let reply = match &e {
                BoardError::Usage => e.to_string(),
                BoardError::BudgetExceeded { .. } => {
                    "Failed to create buttons: names are too long".to_string()
                }
                BoardError::Json(_) => "Failed to create buttons".to_string(),
            };
            warn!(chat_id = %chat_id, error = %e, "Board not created");
            if let Err(e) = transport.send_text(chat_id, &reply).await {
                warn!(chat_id = %chat_id, error = %e, "Failed to send create error");
            }
            return;
        }
    };

    if let Err(e) = transport.send_board(chat_id, &board).await {
        warn!(chat_id = %chat_id, error = %e, "Failed to send board");
    }
}

/// Handle a button press on a board.
///
/// The board is rebuilt from the pressed message alone. If the rebuild is
/// rejected the press is answered without text and the message stays as it
/// was.
pub async fn handle_interaction<T: BoardTransport + ?Sized>(transport: &T, interaction: Interaction) {
    let Interaction {
        callback_id,
        chat_id,
        message_id,
        board,
        data,
        actor,
    } = interaction;

    info!(chat_id = %chat_id, user_id = actor.id, data = %data, "Button pressed");

    let rebuild = match rebuild_board(&board, &data, &actor) {
        Ok(rebuild) => rebuild,
        Err(e) => {
            warn!(chat_id = %chat_id, error = %e, "Board rebuild aborted, message left unchanged");
            if let Err(e) = transport.answer(&callback_id, None).await {
                warn!(chat_id = %chat_id, error = %e, "Failed to answer callback");
            }
            return;
        }
    };

    if let Err(e) = transport.answer(&callback_id, rebuild.toast.as_deref()).await {
        warn!(chat_id = %chat_id, error = %e, "Failed to answer callback");
    }

    if let Err(e) = transport.edit_board(chat_id, message_id, &rebuild.board).await {
        warn!(chat_id = %chat_id, error = %e, "Failed to edit board");
    }

    for notification in &rebuild.notifications {
        debug!(user_id = notification.user_id, "Notifying subscriber");
        if let Err(e) = transport
            .send_text(ChatId(notification.user_id), &notification.text)
            .await
        {
            warn!(user_id = notification.user_id, error = %e, "Failed to notify subscriber");
        }
    }
}

/// Dispatch commands to appropriate handlers.
pub async fn handle_command<T: BoardTransport + ?Sized>(transport: &T, chat_id: ChatId, cmd: Command) {
    match cmd {
        Command::Start | Command::Help => handle_help(transport, chat_id).await,
        Command::Create(args) => handle_create(transport, chat_id, &args).await,
    }
}
