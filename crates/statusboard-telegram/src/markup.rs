//! Conversions between teloxide types and board types.

use statusboard_core::{Actor, Board, Button, Keyboard};
use teloxide::types::{
    CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardButtonKind, InlineKeyboardMarkup,
    MessageId, User,
};
use tracing::{debug, warn};

/// Read the callback buttons of a message keyboard. Other button kinds
/// (URLs, switch-inline, ...) are not part of a board and are dropped.
pub fn keyboard_from_markup(markup: &InlineKeyboardMarkup) -> Keyboard {
    let rows = markup
        .inline_keyboard
        .iter()
        .map(|row| {
            row.iter()
                .filter_map(|button| match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => {
                        Some(Button::new(button.text.clone(), data.clone()))
                    }
                    _ => {
                        debug!(text = %button.text, "Skipping non-callback button");
                        None
                    }
                })
                .collect()
        })
        .collect();
    Keyboard::new(rows)
}

/// Render a board keyboard as inline callback buttons.
pub fn markup_from_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.text.clone(), button.data.clone()))
            .collect::<Vec<_>>()
    }))
}

/// Board actor for a Telegram user, or `None` if the id does not fit the
/// signed ids stored in subscriber lists.
pub fn actor_from_user(user: &User) -> Option<Actor> {
    let id = match i64::try_from(user.id.0) {
        Ok(id) => id,
        Err(_) => {
            warn!(user_id = user.id.0, "User id out of range");
            return None;
        }
    };
    Some(Actor::new(
        id,
        user.first_name.clone(),
        user.last_name.clone().unwrap_or_default(),
    ))
}

/// A button press on a board message.
#[derive(Debug, Clone)]
pub struct Interaction {
    /// Callback query ID, used to answer the press.
    pub callback_id: String,
    /// Chat holding the board message.
    pub chat_id: ChatId,
    /// The board message itself.
    pub message_id: MessageId,
    /// Board as currently shown.
    pub board: Board,
    /// Callback data of the pressed button.
    pub data: String,
    /// Who pressed.
    pub actor: Actor,
}

impl Interaction {
    /// Extract a press from a callback query.
    ///
    /// Returns `None` when the query has no data, its message is no longer
    /// accessible, or the sender cannot be represented.
    pub fn from_query(query: &CallbackQuery) -> Option<Self> {
        let data = query.data.clone()?;
        let message = query.regular_message()?;
        let actor = actor_from_user(&query.from)?;

        let board = Board {
            text: message.text().unwrap_or_default().to_string(),
            keyboard: message
                .reply_markup()
                .map(keyboard_from_markup)
                .unwrap_or_default(),
        };

        Some(Self {
            callback_id: query.id.to_string(),
            chat_id: message.chat.id,
            message_id: message.id,
            board,
            data,
            actor,
        })
    }
}
