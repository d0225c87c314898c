//! Admin allow-list.
//!
//! The same `AdminSet::permits` predicate guards admin commands twice: once as
//! a dptree filter in the Telegram listener and again inside `CommandHandler`.

use std::collections::HashSet;

use crate::commands::Command;

/// Immutable set of Telegram user IDs allowed to run admin commands
#[derive(Debug, Clone, Default)]
pub struct AdminSet {
    ids: HashSet<u64>,
}

impl AdminSet {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.ids.contains(&user_id)
    }

    /// Whether `user_id` may run `command`
    pub fn permits(&self, command: &Command, user_id: u64) -> bool {
        !command.requires_admin() || self.is_admin(user_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
