//! Status board protocol.
//!
//! A status board is a chat message whose inline keyboard holds one button
//! per named resource plus a trailing subscribe button. The keyboard is the
//! only place the board's state lives, so every button carries its state in
//! its callback data and the whole keyboard is decoded and rebuilt on each
//! press.
//!
//! # Example
//!
//! ```
//! use statusboard_core::{create_board, rebuild_board, Actor};
//!
//! let board = create_board(&["Room1", "Room2"]).unwrap();
//! assert_eq!(board.text, "🟢Room1  🟢Room2");
//!
//! let pressed = board.keyboard.rows[0][0].data.clone();
//! let rebuild = rebuild_board(&board, &pressed, &Actor::new(1, "Alice", "")).unwrap();
//! assert_eq!(rebuild.board.text, "🏗️Room1 (Alice)  🟢Room2");
//! ```

pub mod error;
pub mod item;
pub mod keyboard;
pub mod ledger;
pub mod shorten;
pub mod token;

pub use error::{BoardError, Result};
pub use item::{Actor, Item, ItemState, BUSY_GLYPH, FREE_GLYPH};
pub use keyboard::{
    create_board, parse_names, rebuild_board, Board, Button, Keyboard, Notification, Rebuild,
    ITEM_SEPARATOR,
};
pub use ledger::{toggle_subscription, SubscriberLedger};
pub use shorten::shorten_username;
pub use token::{
    within_budget, CallbackData, StateToken, TokenKind, BUSY_PREFIX, FREE_PREFIX,
    SUBSCRIBE_MARKER, TOKEN_LIMIT,
};
