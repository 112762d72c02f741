//! Board creation and rebuild.
//!
//! The message being edited is the only copy of the board. Each press
//! decodes every button of that message, applies the press, and produces a
//! complete replacement: a single row of item buttons in their original
//! order, followed by the subscribe button.

use tracing::debug;

use crate::error::{BoardError, Result};
use crate::item::{Actor, Item};
use crate::ledger::{toggle_subscription, SubscriberLedger};
use crate::token::{StateToken, TokenKind, BUSY_PREFIX, FREE_PREFIX, TOKEN_LIMIT};

/// Separator between item entries in the message text.
pub const ITEM_SEPARATOR: &str = "  ";

/// A callback button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub data: String,
}

impl Button {
    pub fn new(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: data.into(),
        }
    }
}

/// Button rows attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    pub fn single_row(buttons: Vec<Button>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }

    /// All buttons, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// Message text plus its keyboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub text: String,
    pub keyboard: Keyboard,
}

/// A direct message to a subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub user_id: i64,
    pub text: String,
}

/// Outcome of a press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuild {
    /// Replacement for the edited message.
    pub board: Board,
    /// Short answer shown to the presser.
    pub toast: Option<String>,
    /// Messages for subscribers other than the presser.
    pub notifications: Vec<Notification>,
}

/// Split `/create` arguments into item names.
pub fn parse_names(args: &str) -> Result<Vec<String>> {
    let names: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if names.is_empty() {
        return Err(BoardError::Usage);
    }
    Ok(names)
}

/// Build a new board with every item free and nobody subscribed.
pub fn create_board<S: AsRef<str>>(names: &[S]) -> Result<Board> {
    if names.is_empty() {
        return Err(BoardError::Usage);
    }

    let mut buttons = Vec::with_capacity(names.len() + 1);
    let mut entries = Vec::with_capacity(names.len());

    for name in names {
        let item = Item::free(name.as_ref());
        let data = item.callback_data().encode_within(TOKEN_LIMIT)?;
        entries.push(item.display());
        buttons.push(Button::new(item.label(), data));
    }

    buttons.push(subscribe_button(&SubscriberLedger::new())?);

    Ok(Board {
        text: entries.join(ITEM_SEPARATOR),
        keyboard: Keyboard::single_row(buttons),
    })
}

/// Apply the press carried by `pressed` to `previous` on behalf of `actor`.
///
/// Fails without producing anything if any rebuilt button would exceed the
/// payload limit.
pub fn rebuild_board(previous: &Board, pressed: &str, actor: &Actor) -> Result<Rebuild> {
    let pressed = StateToken::decode(pressed);
    let press_kind = pressed.kind();

    // The subscriber set has to be final before items are rebuilt, since
    // item presses notify it.
    let current: Vec<i64> = previous
        .keyboard
        .buttons()
        .map(|button| StateToken::decode(&button.data))
        .find(|token| token.kind() == TokenKind::Aggregator)
        .map(|token| token.notify().to_vec())
        .unwrap_or_default();
    let ledger = SubscriberLedger::from_ids(&toggle_subscription(
        &current,
        actor.id,
        press_kind == TokenKind::Aggregator,
    ));

    let mut buttons = Vec::new();
    let mut entries = Vec::new();
    let mut notifications = Vec::new();

    for button in previous.keyboard.buttons() {
        let token = StateToken::decode(&button.data);

        if let Some(mut item) = Item::from_token(&token) {
            if press_kind == TokenKind::Item && token.command() == pressed.command() {
                item.toggle(actor);
                debug!(item = %item.name, state = ?item.state, user_id = actor.id, "Item toggled");

                let text = format!("{} updated by {}", item.label(), actor.display_name());
                notifications.extend(ledger.recipients(actor.id).map(|user_id| Notification {
                    user_id,
                    text: text.clone(),
                }));
            }

            let data = item.callback_data().encode_within(TOKEN_LIMIT)?;
            entries.push(item.display());
            buttons.push(Button::new(item.label(), data));
        } else if token.kind() == TokenKind::Aggregator {
            continue;
        } else {
            let data = token.into_data().encode_within(TOKEN_LIMIT)?;
            entries.push(button.text.clone());
            buttons.push(Button::new(button.text.clone(), data));
        }
    }

    buttons.push(subscribe_button(&ledger)?);

    let text = if entries.is_empty() {
        previous.text.clone()
    } else {
        entries.join(ITEM_SEPARATOR)
    };

    let toast = match press_kind {
        TokenKind::Item => Some(format!(
            "{} updated by {}",
            item_name(pressed.command()),
            actor.display_name()
        )),
        TokenKind::Aggregator => Some(format!(
            "{} {} notifications",
            actor.display_name(),
            if ledger.contains(actor.id) {
                "enabled"
            } else {
                "disabled"
            }
        )),
        TokenKind::Opaque => None,
    };

    Ok(Rebuild {
        board: Board {
            text,
            keyboard: Keyboard::single_row(buttons),
        },
        toast,
        notifications,
    })
}

fn subscribe_button(ledger: &SubscriberLedger) -> Result<Button> {
    let data = ledger.callback_data().encode_within(TOKEN_LIMIT)?;
    Ok(Button::new(ledger.label(), data))
}

fn item_name(command: &str) -> &str {
    command
        .strip_prefix(BUSY_PREFIX)
        .or_else(|| command.strip_prefix(FREE_PREFIX))
        .unwrap_or(command)
}
