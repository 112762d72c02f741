//! Callback-data codec.
//!
//! Every button carries its own state in its callback data. Two encodings
//! are understood:
//!
//! - compact: minified JSON `{"c":"busy-Room","u":"Alice","n":[1,2]}` with
//!   empty fields left out,
//! - legacy: a bare `busy-Room` / `free-Room` string from older boards.
//!
//! Decoding never fails; anything that is not valid compact JSON is kept as
//! a legacy token and classified by its prefix. Encoding always produces the
//! compact form.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{BoardError, Result};

/// Maximum length of a button payload, in Unicode scalar values.
pub const TOKEN_LIMIT: usize = 64;

/// Command prefix of an item whose press marks it free.
pub const FREE_PREFIX: &str = "free-";

/// Command prefix of an item whose press marks it busy.
pub const BUSY_PREFIX: &str = "busy-";

/// Command (and label) of the subscribe button.
pub const SUBSCRIBE_MARKER: &str = "⚡";

/// Structured callback data, serialized with one-letter keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackData {
    /// Item action (`busy-<name>` / `free-<name>`) or the subscribe marker.
    #[serde(rename = "c")]
    pub command: String,
    /// Holder display name; only present on busy items.
    #[serde(rename = "u", default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    /// Subscriber ids; only present on the subscribe button.
    #[serde(rename = "n", default, skip_serializing_if = "Vec::is_empty")]
    pub notify: Vec<i64>,
}

impl CallbackData {
    /// Callback data carrying only a command.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            holder: None,
            notify: Vec::new(),
        }
    }

    /// Sets the holder. Empty names are dropped.
    pub fn with_holder(mut self, holder: impl Into<String>) -> Self {
        let holder = holder.into();
        self.holder = (!holder.is_empty()).then_some(holder);
        self
    }

    /// Sets the subscriber list.
    pub fn with_notify(mut self, notify: Vec<i64>) -> Self {
        self.notify = notify;
        self
    }

    /// Serialize to the minified form.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize and reject the result if it exceeds `limit` characters.
    pub fn encode_within(&self, limit: usize) -> Result<String> {
        let encoded = self.encode()?;
        if !within_budget(&encoded, limit) {
            return Err(BoardError::BudgetExceeded {
                length: encoded.chars().count(),
                token: encoded,
                limit,
            });
        }
        Ok(encoded)
    }
}

/// What a decoded token refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An item button (`busy-`/`free-` prefix).
    Item,
    /// The subscribe button.
    Aggregator,
    /// Anything else; passed through untouched.
    Opaque,
}

impl TokenKind {
    /// Classify a command string by its prefix.
    pub fn of(command: &str) -> Self {
        if command.starts_with(FREE_PREFIX) || command.starts_with(BUSY_PREFIX) {
            TokenKind::Item
        } else if command.starts_with(SUBSCRIBE_MARKER) {
            TokenKind::Aggregator
        } else {
            TokenKind::Opaque
        }
    }
}

/// A decoded button payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateToken {
    /// Compact JSON token.
    Compact(CallbackData),
    /// Bare string from an older board, or an unknown payload.
    Legacy(String),
}

impl StateToken {
    /// Decode a raw payload. Structured parse first, legacy fallback.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<CallbackData>(raw) {
            Ok(data) => StateToken::Compact(data),
            Err(e) => {
                trace!(data = %raw, error = %e, "Callback data is not compact, using legacy form");
                StateToken::Legacy(raw.to_string())
            }
        }
    }

    /// The command string, whatever the encoding.
    pub fn command(&self) -> &str {
        match self {
            StateToken::Compact(data) => &data.command,
            StateToken::Legacy(raw) => raw,
        }
    }

    /// Holder display name, if any.
    pub fn holder(&self) -> Option<&str> {
        match self {
            StateToken::Compact(data) => data.holder.as_deref(),
            StateToken::Legacy(_) => None,
        }
    }

    /// Subscriber ids carried by the token.
    pub fn notify(&self) -> &[i64] {
        match self {
            StateToken::Compact(data) => &data.notify,
            StateToken::Legacy(_) => &[],
        }
    }

    pub fn kind(&self) -> TokenKind {
        TokenKind::of(self.command())
    }

    /// Convert to compact data; legacy strings become the command.
    pub fn into_data(self) -> CallbackData {
        match self {
            StateToken::Compact(data) => data,
            StateToken::Legacy(raw) => CallbackData::new(raw),
        }
    }

    /// Encode in compact form.
    pub fn encode(&self) -> Result<String> {
        self.clone().into_data().encode()
    }
}

/// Whether `raw` fits in `limit` Unicode scalar values.
pub fn within_budget(raw: &str, limit: usize) -> bool {
    raw.chars().count() <= limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_omits_empty_fields() {
        let data = CallbackData::new("busy-Room");
        assert_eq!(data.encode().unwrap(), r#"{"c":"busy-Room"}"#);
    }

    #[test]
    fn test_encode_all_fields() {
        let data = CallbackData::new("free-Room").with_holder("Alice");
        assert_eq!(data.encode().unwrap(), r#"{"c":"free-Room","u":"Alice"}"#);

        let data = CallbackData::new("⚡2").with_notify(vec![10, 20]);
        assert_eq!(data.encode().unwrap(), r#"{"c":"⚡2","n":[10,20]}"#);
    }

    #[test]
    fn test_empty_holder_is_dropped() {
        let data = CallbackData::new("free-Room").with_holder("");
        assert_eq!(data.holder, None);
    }

    #[test]
    fn test_decode_compact() {
        let token = StateToken::decode(r#"{"c":"free-A","u":"Bob"}"#);
        assert_eq!(token.command(), "free-A");
        assert_eq!(token.holder(), Some("Bob"));
        assert!(token.notify().is_empty());
        assert_eq!(token.kind(), TokenKind::Item);
    }

    #[test]
    fn test_decode_legacy_item() {
        let token = StateToken::decode("busy-A");
        assert_eq!(token, StateToken::Legacy("busy-A".to_string()));
        assert_eq!(token.kind(), TokenKind::Item);
        assert_eq!(token.holder(), None);
        assert_eq!(token.encode().unwrap(), r#"{"c":"busy-A"}"#);
    }

    #[test]
    fn test_decode_unknown_is_opaque() {
        assert_eq!(StateToken::decode("connect:foo").kind(), TokenKind::Opaque);
        assert_eq!(StateToken::decode("42").kind(), TokenKind::Opaque);
        assert_eq!(StateToken::decode(r#"{"x":1}"#).kind(), TokenKind::Opaque);
    }

    #[test]
    fn test_decode_legacy_marker() {
        let token = StateToken::decode("⚡");
        assert_eq!(token.kind(), TokenKind::Aggregator);
        assert!(token.notify().is_empty());
    }

    #[test]
    fn test_budget_counts_characters() {
        let cyrillic = "Ж".repeat(64);
        assert_eq!(cyrillic.len(), 128);
        assert!(within_budget(&cyrillic, TOKEN_LIMIT));
        assert!(!within_budget(&"Ж".repeat(65), TOKEN_LIMIT));
    }

    #[test]
    fn test_encode_within_rejects_oversized() {
        let data = CallbackData::new(format!("busy-{}", "x".repeat(60)));
        match data.encode_within(TOKEN_LIMIT) {
            Err(BoardError::BudgetExceeded { length, limit, .. }) => {
                assert_eq!(length, 73);
                assert_eq!(limit, TOKEN_LIMIT);
            }
            other => panic!("expected budget error, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_within_accepts_exact_limit() {
        // {"c":"busy-<51>"} is 64 characters
        let data = CallbackData::new(format!("busy-{}", "x".repeat(51)));
        let encoded = data.encode_within(TOKEN_LIMIT).unwrap();
        assert_eq!(encoded.chars().count(), TOKEN_LIMIT);

        let data = CallbackData::new(format!("busy-{}", "x".repeat(52)));
        assert!(data.encode_within(TOKEN_LIMIT).is_err());
    }

    fn callback_data() -> impl Strategy<Value = CallbackData> {
        (
            "(busy-|free-|⚡)[a-zA-Zа-я0-9 _\"\\\\]{0,20}",
            proptest::option::of("[a-zA-Zа-я .'\"]{1,20}"),
            proptest::collection::vec(any::<i64>(), 0..4),
        )
            .prop_map(|(command, holder, notify)| CallbackData {
                command,
                holder,
                notify,
            })
    }

    proptest! {
        #[test]
        fn prop_compact_round_trip(data in callback_data()) {
            let encoded = data.encode().unwrap();
            prop_assert_eq!(StateToken::decode(&encoded), StateToken::Compact(data));
        }
    }
}
