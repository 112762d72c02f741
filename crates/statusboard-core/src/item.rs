//! Free/Busy toggle for a single board item.
//!
//! The command carried by an item names the action its next press performs:
//! a free item carries `busy-<name>`, a busy one `free-<name>`.

use crate::shorten::{join_name, shorten_username};
use crate::token::{CallbackData, StateToken, BUSY_PREFIX, FREE_PREFIX};

/// Label glyph of a free item.
pub const FREE_GLYPH: &str = "🟢";

/// Label glyph of a busy item.
pub const BUSY_GLYPH: &str = "🏗️";

/// State of a board item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Free,
    Busy,
}

impl ItemState {
    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            ItemState::Free => ItemState::Busy,
            ItemState::Busy => ItemState::Free,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ItemState::Free => FREE_GLYPH,
            ItemState::Busy => BUSY_GLYPH,
        }
    }

    /// Command prefix an item in this state carries.
    fn action_prefix(self) -> &'static str {
        match self {
            ItemState::Free => BUSY_PREFIX,
            ItemState::Busy => FREE_PREFIX,
        }
    }
}

/// The user who pressed a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Actor {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Full display name, empty parts omitted.
    pub fn display_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

/// A named resource on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub state: ItemState,
    /// Who set the item busy. Always `None` while free.
    pub holder: Option<String>,
}

impl Item {
    /// A fresh, free item.
    pub fn free(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ItemState::Free,
            holder: None,
        }
    }

    /// Rebuild an item from a decoded token. `None` for non-item tokens.
    pub fn from_token(token: &StateToken) -> Option<Self> {
        let command = token.command();
        let (state, name) = if let Some(name) = command.strip_prefix(BUSY_PREFIX) {
            (ItemState::Free, name)
        } else if let Some(name) = command.strip_prefix(FREE_PREFIX) {
            (ItemState::Busy, name)
        } else {
            return None;
        };

        let holder = match state {
            ItemState::Busy => token.holder().filter(|h| !h.is_empty()).map(str::to_string),
            ItemState::Free => None,
        };

        Some(Self {
            name: name.to_string(),
            state,
            holder,
        })
    }

    /// The command this item's button carries.
    pub fn command(&self) -> String {
        format!("{}{}", self.state.action_prefix(), self.name)
    }

    /// Flip the state. Becoming busy records the actor as holder, becoming
    /// free clears it. Any actor may flip any item.
    pub fn toggle(&mut self, actor: &Actor) {
        self.state = self.state.toggled();
        self.holder = match self.state {
            ItemState::Busy => {
                let holder =
                    shorten_username(&self.command(), &actor.first_name, &actor.last_name);
                (!holder.is_empty()).then_some(holder)
            }
            ItemState::Free => None,
        };
    }

    /// Button label: glyph followed by the name.
    pub fn label(&self) -> String {
        format!("{}{}", self.state.glyph(), self.name)
    }

    /// Message text entry: the label, plus the holder while busy.
    pub fn display(&self) -> String {
        match (&self.state, &self.holder) {
            (ItemState::Busy, Some(holder)) => format!("{} ({})", self.label(), holder),
            _ => self.label(),
        }
    }

    /// Callback data for this item's button.
    pub fn callback_data(&self) -> CallbackData {
        let data = CallbackData::new(self.command());
        match &self.holder {
            Some(holder) => data.with_holder(holder.clone()),
            None => data,
        }
    }
}
