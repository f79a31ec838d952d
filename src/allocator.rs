//! Unique random number allocation over a persisted issued-set.
//!
//! The allocator draws uniformly from a closed range and records every value it
//! hands out in a [`NumberStore`]. Once the store holds every value in the range
//! the set is cleared and the cycle starts again.

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use crate::error::BotError;
use crate::ports::NumberStore;

/// Draws per range value before sampling gives up.
const DRAWS_PER_VALUE: u64 = 32;

/// Lower bound on the draw budget, so tiny ranges still get a fair number of tries.
const MIN_DRAW_BUDGET: u64 = 64;

/// Closed interval `[min, max]` of allocatable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    min: i64,
    max: i64,
}

impl ValueRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::EmptyRange`] if `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self, BotError> {
        if min > max {
            return Err(BotError::EmptyRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of values in the range, saturating at `u64::MAX`.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.max.abs_diff(self.min).saturating_add(1)
    }
}

/// Hands out random values from a range without repeats until the range is used up.
pub struct UniqueValueAllocator<S, R = ThreadRng> {
    store: S,
    range: ValueRange,
    rng: R,
}

impl<S: NumberStore> UniqueValueAllocator<S> {
    /// Create an allocator drawing from the thread-local RNG.
    pub fn new(store: S, range: ValueRange) -> Self {
        Self::with_rng(store, range, rand::rng())
    }
}

impl<S: NumberStore, R: Rng> UniqueValueAllocator<S, R> {
    /// Create an allocator with an explicit random source.
    pub fn with_rng(store: S, range: ValueRange, rng: R) -> Self {
        Self { store, range, rng }
    }

    /// The range this allocator draws from.
    #[must_use]
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Return a value not issued since the last reset, and record it.
    ///
    /// Clears the issued-set first if it already covers the whole range.
    ///
    /// # Errors
    ///
    /// Propagates store failures, and returns [`BotError::AllocationStalled`]
    /// if the draw budget runs out without finding an unused value.
    pub fn allocate(&mut self) -> Result<i64, BotError> {
        self.reset_if_exhausted()?;

        let budget = self.range.size().saturating_mul(DRAWS_PER_VALUE).max(MIN_DRAW_BUDGET);
        for attempt in 1..=budget {
            let candidate = self.rng.random_range(self.range.min..=self.range.max);
            if !self.store.contains(candidate)? {
                self.store.add(candidate)?;
                debug!(value = candidate, attempt, "allocated value");
                return Ok(candidate);
            }
        }

        Err(BotError::AllocationStalled {
            attempts: budget,
            used: self.store.count()?,
            size: self.range.size(),
        })
    }

    /// Allocate `n` values in sequence.
    ///
    /// The exhaustion check runs before every draw, so a reset can happen
    /// part-way through and a value may then appear twice in one batch.
    ///
    /// # Errors
    ///
    /// Returns the first error hit; values allocated before it stay recorded.
    pub fn allocate_many(&mut self, n: usize) -> Result<Vec<i64>, BotError> {
        let cap = usize::try_from(self.range.size()).unwrap_or(usize::MAX);
        let mut values = Vec::with_capacity(n.min(cap));
        for _ in 0..n {
            self.reset_if_exhausted()?;
            values.push(self.allocate()?);
        }
        Ok(values)
    }

    /// Clear the issued-set if it holds every value in the range.
    ///
    /// Returns `true` if a reset was performed.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn reset_if_exhausted(&mut self) -> Result<bool, BotError> {
        let used = self.store.count()?;
        if used >= self.range.size() {
            self.store.clear()?;
            info!(used, size = self.range.size(), "all values issued, reset issued-set");
            return Ok(true);
        }
        Ok(false)
    }

    /// Whether `value` has been issued since the last reset.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn is_used(&mut self, value: i64) -> Result<bool, BotError> {
        self.store.contains(value)
    }

    /// Number of values issued since the last reset.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn count(&mut self) -> Result<u64, BotError> {
        self.store.count()
    }

    /// Forget every issued value. Returns `true` if anything was cleared.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn clear(&mut self) -> Result<bool, BotError> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::adapters::memory::MemoryStore;

    fn allocator(min: i64, max: i64, seed: u64) -> UniqueValueAllocator<MemoryStore, StdRng> {
        UniqueValueAllocator::with_rng(
            MemoryStore::default(),
            ValueRange::new(min, max).unwrap(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn range_rejects_min_above_max() {
        assert!(matches!(ValueRange::new(5, 4), Err(BotError::EmptyRange { min: 5, max: 4 })));
    }

    #[test]
    fn range_size_and_bounds() {
        let range = ValueRange::new(0, 879).unwrap();
        assert_eq!(range.size(), 880);
        assert_eq!(range.min(), 0);
        assert_eq!(range.max(), 879);
        assert_eq!(ValueRange::new(-5, 5).unwrap().size(), 11);
        assert_eq!(ValueRange::new(7, 7).unwrap().size(), 1);
        assert_eq!(ValueRange::new(i64::MIN, i64::MAX).unwrap().size(), u64::MAX);
    }

    #[test]
    fn three_value_range_issues_each_once() {
        let mut alloc = allocator(0, 2, 1);
        let drawn: BTreeSet<i64> = (0..3).map(|_| alloc.allocate().unwrap()).collect();
        assert_eq!(drawn, BTreeSet::from([0, 1, 2]));
        assert_eq!(alloc.count().unwrap(), 3);

        // Fourth call resets, then issues one value again.
        let fourth = alloc.allocate().unwrap();
        assert!((0..=2).contains(&fourth));
        assert_eq!(alloc.count().unwrap(), 1);
    }

    #[test]
    fn full_cycle_has_no_repeats() {
        for seed in 0..5 {
            let mut alloc = allocator(10, 109, seed);
            let drawn: Vec<i64> = (0..100).map(|_| alloc.allocate().unwrap()).collect();
            let distinct: BTreeSet<i64> = drawn.iter().copied().collect();
            assert_eq!(distinct.len(), 100, "seed {seed} repeated a value");
            assert!(drawn.iter().all(|v| (10..=109).contains(v)));
        }
    }

    #[test]
    fn allocated_value_is_marked_used() {
        let mut alloc = allocator(0, 879, 42);
        for _ in 0..20 {
            let v = alloc.allocate().unwrap();
            assert!(alloc.is_used(v).unwrap());
        }
        assert_eq!(alloc.count().unwrap(), 20);
    }

    #[test]
    fn clear_forgets_issued_values() {
        let mut alloc = allocator(0, 9, 3);
        let drawn = alloc.allocate_many(4).unwrap();
        assert!(alloc.clear().unwrap());
        assert_eq!(alloc.count().unwrap(), 0);
        for v in drawn {
            assert!(!alloc.is_used(v).unwrap());
        }
        assert!(!alloc.clear().unwrap());
    }

    #[test]
    fn reset_only_when_exhausted() {
        let mut alloc = allocator(0, 1, 9);
        assert!(!alloc.reset_if_exhausted().unwrap());
        alloc.allocate().unwrap();
        assert!(!alloc.reset_if_exhausted().unwrap());
        alloc.allocate().unwrap();
        assert!(alloc.reset_if_exhausted().unwrap());
        assert_eq!(alloc.count().unwrap(), 0);
    }

    #[test]
    fn allocate_many_resets_mid_batch() {
        let mut alloc = allocator(0, 2, 11);
        let drawn = alloc.allocate_many(5).unwrap();
        assert_eq!(drawn.len(), 5);

        let first_cycle: BTreeSet<i64> = drawn[..3].iter().copied().collect();
        assert_eq!(first_cycle, BTreeSet::from([0, 1, 2]));
        assert_ne!(drawn[3], drawn[4]);
        assert_eq!(alloc.count().unwrap(), 2);
    }

    #[test]
    fn single_value_range_cycles() {
        let mut alloc = allocator(5, 5, 0);
        assert_eq!(alloc.allocate_many(3).unwrap(), vec![5, 5, 5]);
    }

    /// Store that claims every value is taken while reporting an empty set.
    struct InconsistentStore;

    impl NumberStore for InconsistentStore {
        fn add(&mut self, _value: i64) -> Result<bool, BotError> {
            Ok(false)
        }

        fn contains(&mut self, _value: i64) -> Result<bool, BotError> {
            Ok(true)
        }

        fn count(&mut self) -> Result<u64, BotError> {
            Ok(0)
        }

        fn clear(&mut self) -> Result<bool, BotError> {
            Ok(false)
        }
    }

    #[test]
    fn sampling_stops_when_store_is_inconsistent() {
        let mut alloc = UniqueValueAllocator::with_rng(
            InconsistentStore,
            ValueRange::new(0, 9).unwrap(),
            StdRng::seed_from_u64(0),
        );
        match alloc.allocate() {
            Err(BotError::AllocationStalled { attempts, used, size }) => {
                assert_eq!(attempts, 320);
                assert_eq!(used, 0);
                assert_eq!(size, 10);
            }
            other => panic!("expected stall, got {other:?}"),
        }
    }

    /// Store that accepts a fixed number of writes, then refuses connections.
    struct FlakyStore {
        inner: MemoryStore,
        writes_left: usize,
    }

    impl NumberStore for FlakyStore {
        fn add(&mut self, value: i64) -> Result<bool, BotError> {
            if self.writes_left == 0 {
                return Err(refused());
            }
            self.writes_left -= 1;
            self.inner.add(value)
        }

        fn contains(&mut self, value: i64) -> Result<bool, BotError> {
            self.inner.contains(value)
        }

        fn count(&mut self) -> Result<u64, BotError> {
            self.inner.count()
        }

        fn clear(&mut self) -> Result<bool, BotError> {
            self.inner.clear()
        }
    }

    /// Store whose server is gone. Counts calls so tests can see nothing retried.
    #[derive(Default)]
    struct UnreachableStore {
        calls: usize,
    }

    impl UnreachableStore {
        fn fail(&mut self) -> BotError {
            self.calls += 1;
            refused()
        }
    }

    impl NumberStore for UnreachableStore {
        fn add(&mut self, _value: i64) -> Result<bool, BotError> {
            Err(self.fail())
        }

        fn contains(&mut self, _value: i64) -> Result<bool, BotError> {
            Err(self.fail())
        }

        fn count(&mut self) -> Result<u64, BotError> {
            Err(self.fail())
        }

        fn clear(&mut self) -> Result<bool, BotError> {
            Err(self.fail())
        }
    }

    fn refused() -> BotError {
        BotError::Io(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"))
    }

    fn unreachable() -> UniqueValueAllocator<UnreachableStore, StdRng> {
        UniqueValueAllocator::with_rng(
            UnreachableStore::default(),
            ValueRange::new(0, 9).unwrap(),
            StdRng::seed_from_u64(0),
        )
    }

    fn is_refused<T>(result: Result<T, BotError>) -> bool {
        matches!(
            result,
            Err(BotError::Io(ref e)) if e.kind() == std::io::ErrorKind::ConnectionRefused
        )
    }

    #[test]
    fn huge_batch_request_returns_store_error() {
        let mut alloc = UniqueValueAllocator::with_rng(
            FlakyStore { inner: MemoryStore::default(), writes_left: 4 },
            ValueRange::new(0, 2).unwrap(),
            StdRng::seed_from_u64(3),
        );
        assert!(is_refused(alloc.allocate_many(usize::MAX)));
        // One full cycle plus one value from the next.
        assert_eq!(alloc.count().unwrap(), 1);
    }

    #[test]
    fn unreachable_store_fails_every_operation() {
        let mut alloc = unreachable();
        assert!(is_refused(alloc.allocate()));
        assert!(is_refused(alloc.allocate_many(3)));
        assert!(is_refused(alloc.is_used(4)));
        assert!(is_refused(alloc.count()));
        assert!(is_refused(alloc.clear()));
        assert!(is_refused(alloc.reset_if_exhausted()));
    }

    #[test]
    fn unreachable_store_is_not_retried() {
        let mut alloc = unreachable();
        assert!(is_refused(alloc.allocate()));
        assert_eq!(alloc.store.calls, 1);
        assert!(is_refused(alloc.allocate_many(5)));
        assert_eq!(alloc.store.calls, 2);
    }

    #[test]
    fn out_of_range_members_trigger_early_reset() {
        let mut store = MemoryStore::default();
        store.add(100).unwrap();
        store.add(0).unwrap();
        let mut alloc = UniqueValueAllocator::with_rng(
            store,
            ValueRange::new(0, 1).unwrap(),
            StdRng::seed_from_u64(0),
        );
        // {0, 100} already counts as two members for a two-value range.
        assert!(alloc.reset_if_exhausted().unwrap());
        assert_eq!(alloc.count().unwrap(), 0);
    }
}
