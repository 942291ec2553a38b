/// Snapshot records stored in the history log.
use std::fmt;

/// Description attached to the snapshot created at construction time.
pub const INITIAL_DESCRIPTION: &str = "initial state";

/// Identifier of a snapshot, unique within one `SnapshotHistory`.
///
/// Assigned from a monotonic counter. Meant for rendering keys only;
/// ordering decisions always go through log indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotId(pub u64);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snap-{}", self.0)
    }
}

/// An immutable recorded document state plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    state: T,
    description: String,
    id: SnapshotId,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(state: T, description: String, id: SnapshotId) -> Self {
        Self {
            state,
            description,
            id,
        }
    }

    /// The document state captured by this snapshot.
    pub fn state(&self) -> &T {
        &self.state
    }

    /// Human-readable label of the mutation that produced this snapshot.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn id(&self) -> SnapshotId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_id_display() {
        assert_eq!(SnapshotId(7).to_string(), "snap-7");
    }

    #[test]
    fn test_snapshot_ids_order_by_counter() {
        assert!(SnapshotId(1) < SnapshotId(2));
    }

    #[test]
    fn test_snapshot_accessors() {
        let snap = Snapshot::new(vec![1, 2], "added".to_string(), SnapshotId(3));
        assert_eq!(snap.state(), &vec![1, 2]);
        assert_eq!(snap.description(), "added");
        assert_eq!(snap.id(), SnapshotId(3));
    }
}
