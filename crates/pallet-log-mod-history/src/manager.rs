/// Snapshot history manager.
///
/// Every effective mutation appends a full copy of the document to a linear
/// log. Reverting truncates the log back to the chosen snapshot; mutating
/// after a revert never resurrects the discarded tail.
use std::fmt;

use crate::error::HistoryError;
use crate::snapshot::{Snapshot, SnapshotId, INITIAL_DESCRIPTION};

/// How a mutation produces the next document state.
pub enum Update<T> {
    /// Use this value as the new state.
    Replace(T),
    /// Derive the new state from the current one.
    Apply(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    /// Wraps a state transformer.
    pub fn apply<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> T + 'static,
    {
        Self::Apply(Box::new(f))
    }

    fn resolve(self, current: &T) -> T {
        match self {
            Self::Replace(value) => value,
            Self::Apply(f) => f(current),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
            Self::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}

/// Linear history of document snapshots for a single owner.
///
/// The log always holds at least the initial snapshot and the pointer
/// always indexes an existing entry. Consecutive snapshots are never
/// structurally equal.
#[derive(Clone)]
pub struct SnapshotHistory<T> {
    /// Snapshots in causal order, index 0 is the initial state.
    log: Vec<Snapshot<T>>,
    /// Index of the current snapshot.
    pointer: usize,
    /// Next id to hand out.
    next_id: u64,
}

impl<T> fmt::Debug for SnapshotHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotHistory")
            .field("len", &self.log.len())
            .field("pointer", &self.pointer)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<T: PartialEq> SnapshotHistory<T> {
    /// Creates a history whose only snapshot is `initial`.
    pub fn new(initial: T) -> Self {
        let mut history = Self {
            log: Vec::new(),
            pointer: 0,
            next_id: 0,
        };
        let id = history.fresh_id();
        history
            .log
            .push(Snapshot::new(initial, INITIAL_DESCRIPTION.to_string(), id));
        history
    }

    /// The state of the current snapshot.
    pub fn current(&self) -> &T {
        self.log[self.pointer].state()
    }

    /// The current snapshot including its metadata.
    pub fn current_snapshot(&self) -> &Snapshot<T> {
        &self.log[self.pointer]
    }

    /// Index of the current snapshot.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Number of snapshots in the log (never zero).
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Always false; the log keeps at least the initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Full log, oldest first.
    pub fn list_history(&self) -> &[Snapshot<T>] {
        &self.log
    }

    /// Whether there is an earlier snapshot to revert to.
    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    /// Whether snapshots exist past the pointer.
    ///
    /// Reverting truncates the tail, so this only turns true if a future
    /// variant keeps abandoned snapshots around.
    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.log.len()
    }

    /// Applies an update and records the result.
    ///
    /// Returns `false` when the resolved state equals the current one, in
    /// which case nothing is recorded.
    pub fn mutate(&mut self, update: Update<T>, description: impl Into<String>) -> bool {
        let next = update.resolve(self.current());
        self.record(next, description.into())
    }

    /// Records `value` as the new state.
    pub fn replace(&mut self, value: T, description: impl Into<String>) -> bool {
        self.record(value, description.into())
    }

    /// Records the state produced by `f` from the current state.
    pub fn apply<F>(&mut self, f: F, description: impl Into<String>) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(self.current());
        self.record(next, description.into())
    }

    /// Makes snapshot `index` current and discards every later snapshot.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::OutOfRange` without touching the log when
    /// `index` does not exist.
    pub fn revert(&mut self, index: usize) -> Result<(), HistoryError> {
        let len = self.log.len();
        if index >= len {
            tracing::warn!("Ignoring revert to snapshot {index}: history has {len} entries");
            return Err(HistoryError::OutOfRange { index, len });
        }
        self.log.truncate(index + 1);
        self.pointer = index;
        tracing::debug!(
            "Reverted to snapshot {index} ({}), dropped {} later",
            self.log[index].description(),
            len - self.log.len()
        );
        Ok(())
    }

    /// Reverts to the snapshot right before the current one.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NothingToUndo` when already at the initial state.
    pub fn undo_last(&mut self) -> Result<(), HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NothingToUndo);
        }
        self.revert(self.pointer - 1)
    }

    fn record(&mut self, next: T, description: String) -> bool {
        if next == *self.current() {
            return false;
        }
        self.log.truncate(self.pointer + 1);
        let id = self.fresh_id();
        tracing::debug!("Recording snapshot {id}: {description}");
        self.log.push(Snapshot::new(next, description, id));
        self.pointer = self.log.len() - 1;
        true
    }

    fn fresh_id(&mut self) -> SnapshotId {
        let id = SnapshotId(self.next_id);
        self.next_id += 1;
        id
    }
}
