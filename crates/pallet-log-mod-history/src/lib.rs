//! Linear snapshot history with revert.
//!
//! Provides a `SnapshotHistory` that wraps an arbitrary document value and
//! records an immutable snapshot after every effective mutation. Any earlier
//! snapshot can be made current again by reverting to it, which permanently
//! discards everything recorded after it.
//!
//! History lives only in memory for the lifetime of the manager.
pub mod error;
pub mod manager;
pub mod snapshot;

pub use error::HistoryError;
pub use manager::{SnapshotHistory, Update};
pub use snapshot::{Snapshot, SnapshotId, INITIAL_DESCRIPTION};
