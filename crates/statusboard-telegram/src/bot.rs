//! Main Telegram bot implementation.

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::error::{Result, TelegramError};
use crate::handlers::{handle_command, handle_help, handle_interaction, Command};
use crate::markup::Interaction;

/// The status board bot.
pub struct StatusBoardBot {
    /// The teloxide bot instance.
    bot: Bot,
}

impl StatusBoardBot {
    /// Create a bot from resolved configuration.
    pub fn new(config: &BotConfig) -> Self {
        Self {
            bot: Bot::new(config.token.clone()),
        }
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| TelegramError::BotStartFailed(e.to_string()))?;
        Ok(me.username().to_string())
    }

    /// Run the bot in long-polling mode until Ctrl+C.
    pub async fn start_polling(&self) -> Result<()> {
        info!("Starting status board bot in polling mode...");

        let handler = dptree::entry()
            .branch(Update::filter_callback_query().endpoint(
                |bot: Bot, q: CallbackQuery| async move {
                    match Interaction::from_query(&q) {
                        Some(interaction) => handle_interaction(&bot, interaction).await,
                        None => {
                            warn!(callback_id = %q.id, "Callback without data, accessible message or usable sender");
                            bot.answer_callback_query(q.id.clone()).await?;
                        }
                    }
                    respond(())
                },
            ))
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(|bot: Bot, msg: Message, cmd: Command| async move {
                        info!(chat_id = %msg.chat.id, "Command matched: {:?}", cmd);
                        handle_command(&bot, msg.chat.id, cmd).await;
                        respond(())
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Commands that exist but failed to parse, or unknown ones
                        msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(|bot: Bot, msg: Message| async move {
                        info!(text = ?msg.text(), "Unrecognized command - sending help");
                        handle_help(&bot, msg.chat.id).await;
                        respond(())
                    }),
            );

        info!("Bot is running! Send /create to build a board.");

        Dispatcher::builder(self.bot.clone(), handler)
            .default_handler(|upd| async move {
                tracing::debug!("Unhandled update: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
