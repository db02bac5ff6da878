#![forbid(unsafe_code)]

//! Bounded snapshot history for whole-store undo/redo.
//!
//! [`VersionedStore`] keeps the live state next to an ordered sequence of
//! [`Snapshot`]s and a cursor into that sequence:
//!
//! - **Commit** copies the live state onto the end of the sequence.
//! - **Undo/redo** only move the cursor and restore the live state from the
//!   snapshot it lands on, returning that step's description for display.
//! - **Branch truncation**: committing after one or more undos first
//!   discards every snapshot past the cursor; the redoable future is gone.
//! - **Bounded depth**: the sequence never exceeds the configured cap; the
//!   oldest snapshots are evicted first, never the newest.
//!
//! ```text
//! commit("op3")
//! ┌──────────────────────────────────────────────┐
//! │ Snapshots: [initial, op1, op2, op3]          │
//! │ Cursor:                            ▲         │
//! └──────────────────────────────────────────────┘
//!
//! undo() x2   → returns "op3", then "op2"
//! ┌──────────────────────────────────────────────┐
//! │ Snapshots: [initial, op1, op2, op3]          │
//! │ Cursor:              ▲                       │
//! └──────────────────────────────────────────────┘
//!
//! commit("op4")   → the op2/op3 future is discarded
//! ┌──────────────────────────────────────────────┐
//! │ Snapshots: [initial, op1, op4]               │
//! │ Cursor:                   ▲                  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `snapshots` is never empty; slot 0 starts out as the construction-time
//!    state under [`INITIAL_DESCRIPTION`].
//! 2. `cursor < snapshots.len()` after every operation.
//! 3. `snapshots.len() <= max_snapshots` after every operation.
//! 4. Immediately after `commit`/`undo`/`redo` the live state equals the
//!    cursor snapshot; mutating the live state afterwards never alters a
//!    stored snapshot.
//!
//! # Memory Model
//!
//! Every snapshot is a full `clone` of the state. For an in-memory record
//! store this is a `Vec` memcpy plus string clones, bounded by the depth
//! cap; there is no structural sharing and no reference back into the live
//! state.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Depth cap applied when no explicit [`HistoryConfig`] is given.
pub const DEFAULT_MAX_SNAPSHOTS: usize = 200;

/// Description attached to the snapshot taken at construction time.
pub const INITIAL_DESCRIPTION: &str = "initial state";

/// Errors raised when history navigation runs out of snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// `undo` was called with the cursor already on the oldest snapshot.
    #[error("nothing to undo")]
    NothingToUndo,
    /// `redo` was called with the cursor already on the newest snapshot.
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Configuration for the snapshot history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of snapshots retained. Values below 1 are treated as
    /// 1; the snapshot the cursor sits on is never evicted.
    pub max_snapshots: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_snapshots: DEFAULT_MAX_SNAPSHOTS,
        }
    }
}

impl HistoryConfig {
    /// Create a configuration with the given depth cap.
    #[must_use]
    pub fn new(max_snapshots: usize) -> Self {
        Self { max_snapshots }
    }

    /// No depth cap (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_snapshots: usize::MAX,
        }
    }

    fn cap(&self) -> usize {
        self.max_snapshots.max(1)
    }
}

/// One committed state: an independent copy plus what produced it.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    state: T,
    description: String,
}

impl<T> Snapshot<T> {
    fn new(state: T, description: impl Into<String>) -> Self {
        Self {
            state,
            description: description.into(),
        }
    }

    /// The stored state copy.
    #[must_use]
    pub fn state(&self) -> &T {
        &self.state
    }

    /// Human-readable description of the operation that produced this state.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Live state plus its bounded, navigable snapshot history.
///
/// The store owns the live state outright; callers mutate it through
/// [`current_mut`](Self::current_mut) and never hold an alias into a stored
/// snapshot.
pub struct VersionedStore<T: Clone> {
    live: T,
    snapshots: Vec<Snapshot<T>>,
    cursor: usize,
    config: HistoryConfig,
}

impl<T: Clone> fmt::Debug for VersionedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionedStore")
            .field("snapshots", &self.snapshots.len())
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Clone> VersionedStore<T> {
    /// Wrap `initial` with a default-capacity history.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_config(initial, HistoryConfig::default())
    }

    /// Wrap `initial` with an explicit history configuration.
    #[must_use]
    pub fn with_config(initial: T, config: HistoryConfig) -> Self {
        let snapshots = vec![Snapshot::new(initial.clone(), INITIAL_DESCRIPTION)];
        Self {
            live: initial,
            snapshots,
            cursor: 0,
            config,
        }
    }

    // ========================================================================
    // Live state
    // ========================================================================

    /// The live state. Equal to the cursor snapshot right after any
    /// commit/undo/redo; diverges while [`current_mut`](Self::current_mut)
    /// mutations accumulate and converges again on the next commit.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.live
    }

    /// Mutable access to the live state. Stored snapshots are unaffected.
    pub fn current_mut(&mut self) -> &mut T {
        &mut self.live
    }

    // ========================================================================
    // Core operations
    // ========================================================================

    /// Record the live state as the newest snapshot.
    ///
    /// Discards any redoable snapshots past the cursor, then evicts from the
    /// front if the depth cap is exceeded. The cursor always ends on the
    /// snapshot just taken.
    pub fn commit(&mut self, description: impl Into<String>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots
            .push(Snapshot::new(self.live.clone(), description));
        self.cursor = self.snapshots.len() - 1;

        let excess = self.snapshots.len().saturating_sub(self.config.cap());
        if excess > 0 {
            // The cursor sits on the entry just pushed, so at most
            // `cursor` entries are evictable and the subtraction holds.
            self.snapshots.drain(..excess);
            self.cursor -= excess;
        }
        debug!(
            cursor = self.cursor,
            depth = self.snapshots.len(),
            description = self.snapshots[self.cursor].description(),
            "committed snapshot"
        );
    }

    /// Step the cursor back one snapshot and restore the live state from it.
    ///
    /// Returns the description of the operation that was undone.
    pub fn undo(&mut self) -> Result<String, HistoryError> {
        if self.cursor == 0 {
            return Err(HistoryError::NothingToUndo);
        }
        self.cursor -= 1;
        self.live = self.snapshots[self.cursor].state.clone();
        let undone = self.snapshots[self.cursor + 1].description.clone();
        debug!(cursor = self.cursor, description = %undone, "undid operation");
        Ok(undone)
    }

    /// Step the cursor forward one snapshot and restore the live state.
    ///
    /// Returns the description of the operation that was redone.
    pub fn redo(&mut self) -> Result<String, HistoryError> {
        if self.cursor + 1 == self.snapshots.len() {
            return Err(HistoryError::NothingToRedo);
        }
        self.cursor += 1;
        self.live = self.snapshots[self.cursor].state.clone();
        let redone = self.snapshots[self.cursor].description.clone();
        debug!(cursor = self.cursor, description = %redone, "redid operation");
        Ok(redone)
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of snapshots currently retained.
    #[must_use]
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Description of the operation `undo` would revert.
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.can_undo()
            .then(|| self.snapshots[self.cursor].description())
    }

    /// Description of the operation `redo` would reapply.
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.can_redo()
            .then(|| self.snapshots[self.cursor + 1].description())
    }

    /// The snapshot the cursor currently sits on.
    #[must_use]
    pub fn cursor_snapshot(&self) -> &Snapshot<T> {
        &self.snapshots[self.cursor]
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Bump the live counter and commit under a numbered description.
    fn commit_next(store: &mut VersionedStore<u64>, value: u64) {
        *store.current_mut() = value;
        store.commit(format!("op{value}"));
    }

    #[test]
    fn fresh_store_has_single_initial_snapshot() {
        let store = VersionedStore::new(7u64);
        assert_eq!(store.snapshot_count(), 1);
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.cursor_snapshot().description(), INITIAL_DESCRIPTION);
        assert_eq!(*store.current(), 7);
    }

    #[test]
    fn commit_enables_undo_but_not_redo() {
        let mut store = VersionedStore::new(0u64);
        commit_next(&mut store, 1);
        assert!(store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.snapshot_count(), 2);
    }

    #[test]
    fn undo_restores_state_and_returns_the_undone_description() {
        let mut store = VersionedStore::new(0u64);
        commit_next(&mut store, 1);
        commit_next(&mut store, 2);

        assert_eq!(store.undo(), Ok("op2".to_string()));
        assert_eq!(*store.current(), 1);
        assert!(store.can_redo());

        assert_eq!(store.undo(), Ok("op1".to_string()));
        assert_eq!(*store.current(), 0);
        assert_eq!(store.undo(), Err(HistoryError::NothingToUndo));
    }

    #[test]
    fn redo_restores_state_and_returns_the_redone_description() {
        let mut store = VersionedStore::new(0u64);
        commit_next(&mut store, 1);
        commit_next(&mut store, 2);
        store.undo().unwrap();

        assert_eq!(store.redo(), Ok("op2".to_string()));
        assert_eq!(*store.current(), 2);
        assert_eq!(store.redo(), Err(HistoryError::NothingToRedo));
    }

    #[test]
    fn commit_after_undo_discards_the_future() {
        let mut store = VersionedStore::new(0u64);
        commit_next(&mut store, 1); // "op1"
        commit_next(&mut store, 2); // "op2"
        store.undo().unwrap();
        commit_next(&mut store, 3); // "op3" replaces the op2 branch

        assert_eq!(store.snapshot_count(), 3);
        assert!(!store.can_redo());
        assert_eq!(store.redo(), Err(HistoryError::NothingToRedo));
        assert_eq!(store.undo(), Ok("op3".to_string()));
        assert_eq!(*store.current(), 1);
    }

    #[test]
    fn depth_cap_evicts_the_oldest_snapshots() {
        let mut store = VersionedStore::with_config(0u64, HistoryConfig::new(3));
        for value in 1..=5 {
            commit_next(&mut store, value);
        }

        assert_eq!(store.snapshot_count(), 3);
        assert_eq!(*store.current(), 5);
        assert_eq!(store.undo(), Ok("op5".to_string()));
        assert_eq!(store.undo(), Ok("op4".to_string()));
        assert_eq!(*store.current(), 3);
        // op3 is the oldest survivor; the cursor cannot move past it.
        assert_eq!(store.undo(), Err(HistoryError::NothingToUndo));
    }

    #[test]
    fn fifty_commits_past_the_cap_evict_exactly_the_first_fifty() {
        let mut store = VersionedStore::new(0u64);
        let cap = DEFAULT_MAX_SNAPSHOTS as u64;
        for value in 1..=(cap + 50) {
            commit_next(&mut store, value);
        }

        assert_eq!(store.snapshot_count(), DEFAULT_MAX_SNAPSHOTS);
        assert!(!store.can_redo());
        assert_eq!(*store.current(), cap + 50);

        let mut undos = 0;
        while store.can_undo() {
            store.undo().unwrap();
            undos += 1;
        }
        assert_eq!(undos, DEFAULT_MAX_SNAPSHOTS - 1);
        // The initial snapshot and the first 50 commits were evicted.
        assert_eq!(*store.current(), 51);
        assert_eq!(store.cursor_snapshot().description(), "op51");
    }

    #[test]
    fn unlimited_config_never_evicts() {
        let mut store = VersionedStore::with_config(0u64, HistoryConfig::unlimited());
        for value in 1..=300 {
            commit_next(&mut store, value);
        }
        assert_eq!(store.snapshot_count(), 301);
    }

    #[test]
    fn zero_cap_is_clamped_to_one() {
        let mut store = VersionedStore::with_config(0u64, HistoryConfig::new(0));
        store.commit("op1");
        assert_eq!(store.snapshot_count(), 1);
        assert!(!store.can_undo());
        assert_eq!(store.cursor_snapshot().description(), "op1");
    }

    #[test]
    fn live_mutation_does_not_touch_stored_snapshots() {
        let mut store = VersionedStore::new(vec![1u32]);
        store.current_mut().push(2);
        store.commit("grow");

        store.current_mut().push(3);
        assert_eq!(store.cursor_snapshot().state(), &vec![1, 2]);

        assert_eq!(store.undo(), Ok("grow".to_string()));
        assert_eq!(store.current(), &vec![1]);

        // The uncommitted [1, 2, 3] state is gone; redo lands on the commit.
        assert_eq!(store.redo(), Ok("grow".to_string()));
        assert_eq!(store.current(), &vec![1, 2]);
    }

    #[test]
    fn next_descriptions_track_the_cursor() {
        let mut store = VersionedStore::new(0u64);
        commit_next(&mut store, 1);
        assert_eq!(store.next_undo_description(), Some("op1"));
        assert_eq!(store.next_redo_description(), None);

        store.undo().unwrap();
        assert_eq!(store.next_undo_description(), None);
        assert_eq!(store.next_redo_description(), Some("op1"));
    }

    #[test]
    fn error_messages_are_distinct() {
        assert_eq!(HistoryError::NothingToUndo.to_string(), "nothing to undo");
        assert_eq!(HistoryError::NothingToRedo.to_string(), "nothing to redo");
    }

    #[test]
    fn debug_impl_reports_depth_and_cursor() {
        let store = VersionedStore::new(0u64);
        let rendered = format!("{store:?}");
        assert!(rendered.contains("VersionedStore"));
        assert!(rendered.contains("cursor"));
    }

    #[test]
    fn config_accessor_round_trips() {
        let store = VersionedStore::with_config(0u64, HistoryConfig::new(42));
        assert_eq!(store.config().max_snapshots, 42);
    }
}
