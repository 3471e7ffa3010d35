//! Ring Log Module
//!
//! Bounded append-only log that evicts its oldest entries once capacity is exceeded.

use std::collections::VecDeque;

// == Ring Log ==
/// Append-only log retaining at most `capacity` entries.
///
/// Entries are stored in a VecDeque where:
/// - Front = Oldest entry (next eviction candidate)
/// - Back = Most recent entry
#[derive(Debug, Clone)]
pub struct RingLog<T> {
    /// Entries in insertion order
    entries: VecDeque<T>,
    /// Maximum number of retained entries
    capacity: usize,
}

impl<T> RingLog<T> {
    // == Constructor ==
    /// Creates an empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    // == Record ==
    /// Appends an entry, dropping the oldest entries while over capacity.
    ///
    /// Returns the number of entries evicted by this append.
    pub fn record(&mut self, entry: T) -> usize {
        self.entries.push_back(entry);
        self.truncate_to_capacity()
    }

    // == Record Batch ==
    /// Appends every entry from `entries`, then trims to capacity.
    pub fn record_all<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        self.entries.extend(entries);
        self.truncate_to_capacity()
    }

    fn truncate_to_capacity(&mut self) -> usize {
        let excess = self.entries.len().saturating_sub(self.capacity);
        self.entries.drain(..excess);
        excess
    }

    // == Recent ==
    /// Returns the last `n` entries in insertion order.
    ///
    /// Returns fewer than `n` entries if the log is shorter.
    pub fn recent(&self, n: usize) -> Vec<&T> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }

    // == Aggregate ==
    /// Folds every entry matching `predicate` into an accumulator.
    pub fn aggregate<A, P, F>(&self, predicate: P, init: A, reducer: F) -> A
    where
        P: Fn(&T) -> bool,
        F: FnMut(A, &T) -> A,
    {
        self.entries.iter().filter(|e| predicate(*e)).fold(init, reducer)
    }

    // == Count ==
    /// Counts entries matching `predicate`.
    pub fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.aggregate(predicate, 0, |acc, _| acc + 1)
    }

    /// Iterates over all entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Returns the most recently recorded entry.
    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
