//! Set-membership store port used to remember issued numbers.

use crate::error::BotError;

/// A persistent set of integers addressed by a single key.
///
/// Calls are synchronous; every method may fail if the store is unreachable.
pub trait NumberStore {
    /// Add `value` to the set. Returns `true` if it was not already present.
    fn add(&mut self, value: i64) -> Result<bool, BotError>;

    /// Check whether `value` is in the set.
    fn contains(&mut self, value: i64) -> Result<bool, BotError>;

    /// Number of members in the set.
    fn count(&mut self) -> Result<u64, BotError>;

    /// Delete the whole set. Returns `true` if there was anything to delete.
    fn clear(&mut self) -> Result<bool, BotError>;
}

impl<S: NumberStore + ?Sized> NumberStore for Box<S> {
    fn add(&mut self, value: i64) -> Result<bool, BotError> {
        (**self).add(value)
    }

    fn contains(&mut self, value: i64) -> Result<bool, BotError> {
        (**self).contains(value)
    }

    fn count(&mut self) -> Result<u64, BotError> {
        (**self).count()
    }

    fn clear(&mut self) -> Result<bool, BotError> {
        (**self).clear()
    }
}
