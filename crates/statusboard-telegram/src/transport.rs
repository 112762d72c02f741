//! Outbound calls the board handlers make.

use async_trait::async_trait;
use statusboard_core::Board;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId};

use crate::error::Result;
use crate::markup::markup_from_keyboard;

/// Delivery side of the bot.
///
/// Implemented for [`Bot`]; handlers are generic over it so they can run
/// against an in-memory transport in tests.
#[async_trait]
pub trait BoardTransport: Send + Sync {
    /// Post a new board message.
    async fn send_board(&self, chat_id: ChatId, board: &Board) -> Result<()>;

    /// Replace the text and keyboard of an existing board message.
    async fn edit_board(&self, chat_id: ChatId, message_id: MessageId, board: &Board)
        -> Result<()>;

    /// Answer a button press, optionally with a toast.
    async fn answer(&self, callback_id: &str, text: Option<&str>) -> Result<()>;

    /// Send a plain text message.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;
}

#[async_trait]
impl BoardTransport for Bot {
    async fn send_board(&self, chat_id: ChatId, board: &Board) -> Result<()> {
        self.send_message(chat_id, board.text.clone())
            .reply_markup(markup_from_keyboard(&board.keyboard))
            .await?;
        Ok(())
    }

    async fn edit_board(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        board: &Board,
    ) -> Result<()> {
        self.edit_message_text(chat_id, message_id, board.text.clone())
            .reply_markup(markup_from_keyboard(&board.keyboard))
            .await?;
        Ok(())
    }

    async fn answer(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let mut req = self.answer_callback_query(callback_id.to_string());
        if let Some(text) = text {
            req = req.text(text.to_string());
        }
        req.await?;
        Ok(())
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.send_message(chat_id, text.to_string()).await?;
        Ok(())
    }
}
