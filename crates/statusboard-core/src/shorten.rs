//! Display-name truncation for the holder field.
//!
//! The holder shares the 64-character payload with the command, so the name
//! has to be cut down before it is stored. All lengths here are counted in
//! Unicode scalar values of the JSON-escaped text, the same unit the budget
//! check sees after encoding.

use crate::token::TOKEN_LIMIT;

/// Characters taken by `{"c":"","u":""}` plus slack for the holder quotes.
pub const STRUCTURE_OVERHEAD: usize = 18;

/// Shorten `first_name last_name` so it fits next to `command` in one token.
///
/// Tries, in order: the full name, the first name with a last-name initial,
/// a prefix of the first name, a prefix of the last name. Returns an empty
/// string when nothing fits or both names are empty.
pub fn shorten_username(command: &str, first_name: &str, last_name: &str) -> String {
    let used = STRUCTURE_OVERHEAD + escaped_len(command);
    if used >= TOKEN_LIMIT {
        return String::new();
    }
    let limit = TOKEN_LIMIT - used;

    if first_name.is_empty() && last_name.is_empty() {
        return String::new();
    }

    let full = join_name(first_name, last_name);
    if escaped_len(&full) <= limit {
        return full;
    }

    let first_len = escaped_len(first_name);

    if first_len > 0 {
        if let Some(initial) = last_name.chars().next() {
            let short = format!("{} {}.", first_name, initial);
            if escaped_len(&short) <= limit {
                return short;
            }
        }
    }

    if first_len > 0 && first_len >= limit {
        return truncate_escaped(first_name, limit);
    }

    if escaped_len(last_name) > limit {
        return truncate_escaped(last_name, limit);
    }

    String::new()
}

/// Length of `text` once written inside a JSON string.
fn escaped_len(text: &str) -> usize {
    text.chars().map(escaped_char_len).sum()
}

fn escaped_char_len(c: char) -> usize {
    match c {
        '"' | '\\' | '\n' | '\r' | '\t' | '\u{08}' | '\u{0c}' => 2,
        c if c < '\u{20}' => 6,
        _ => 1,
    }
}

/// Longest prefix of `text` whose escaped length is at most `limit`.
fn truncate_escaped(text: &str, limit: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|&c| {
            used += escaped_char_len(c);
            used <= limit
        })
        .collect()
}

/// Join the non-empty name parts with a single space.
pub fn join_name(first_name: &str, last_name: &str) -> String {
    match (first_name.is_empty(), last_name.is_empty()) {
        (false, false) => format!("{} {}", first_name, last_name),
        (false, true) => first_name.to_string(),
        (true, false) => last_name.to_string(),
        (true, true) => String::new(),
    }
}
