//! In-process number store.

use std::collections::BTreeSet;

use crate::error::BotError;
use crate::ports::NumberStore;

/// Number store held in memory; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    members: BTreeSet<i64>,
}

impl NumberStore for MemoryStore {
    fn add(&mut self, value: i64) -> Result<bool, BotError> {
        Ok(self.members.insert(value))
    }

    fn contains(&mut self, value: i64) -> Result<bool, BotError> {
        Ok(self.members.contains(&value))
    }

    fn count(&mut self) -> Result<u64, BotError> {
        Ok(self.members.len() as u64)
    }

    fn clear(&mut self) -> Result<bool, BotError> {
        let had_members = !self.members.is_empty();
        self.members.clear();
        Ok(had_members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_reports_new_members_only() {
        let mut store = MemoryStore::default();
        assert!(store.add(3).unwrap());
        assert!(!store.add(3).unwrap());
        assert!(store.contains(3).unwrap());
        assert!(!store.contains(4).unwrap());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn clear_reports_whether_anything_was_removed() {
        let mut store = MemoryStore::default();
        assert!(!store.clear().unwrap());
        store.add(1).unwrap();
        store.add(2).unwrap();
        assert!(store.clear().unwrap());
        assert_eq!(store.count().unwrap(), 0);
    }
}
