//! Subscriber list carried by the subscribe button.

use crate::token::{CallbackData, SUBSCRIBE_MARKER};

/// Ordered set of subscriber ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriberLedger {
    members: Vec<i64>,
}

impl SubscriberLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a decoded list, dropping repeated ids.
    pub fn from_ids(ids: &[i64]) -> Self {
        let mut ledger = Self::new();
        for &id in ids {
            if !ledger.contains(id) {
                ledger.members.push(id);
            }
        }
        ledger
    }

    pub fn contains(&self, id: i64) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[i64] {
        &self.members
    }

    /// Add `id` if absent, remove it if present. Returns whether `id` is
    /// subscribed afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if let Some(pos) = self.members.iter().position(|&m| m == id) {
            self.members.remove(pos);
            false
        } else {
            self.members.push(id);
            true
        }
    }

    /// Subscribers to notify about a change made by `actor`.
    pub fn recipients(&self, actor: i64) -> impl Iterator<Item = i64> + '_ {
        self.members.iter().copied().filter(move |&m| m != actor)
    }

    /// Button label: the marker, followed by the count when non-empty.
    pub fn label(&self) -> String {
        if self.members.is_empty() {
            SUBSCRIBE_MARKER.to_string()
        } else {
            format!("{}{}", SUBSCRIBE_MARKER, self.members.len())
        }
    }

    /// Callback data for the subscribe button.
    pub fn callback_data(&self) -> CallbackData {
        CallbackData::new(self.label()).with_notify(self.members.clone())
    }
}

/// Subscriber set after an interaction by `actor`.
///
/// Pressing the subscribe button toggles the actor's membership; any other
/// press carries the set over unchanged.
pub fn toggle_subscription(current: &[i64], actor: i64, subscribe_pressed: bool) -> Vec<i64> {
    let mut ledger = SubscriberLedger::from_ids(current);
    if subscribe_pressed {
        ledger.toggle(actor);
    }
    ledger.members
}
