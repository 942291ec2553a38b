// Re-exports from pallet-log-mod-history, specialized for the ledger.
pub use pallet_log_mod_history::{
    HistoryError, Snapshot, SnapshotHistory, SnapshotId, Update, INITIAL_DESCRIPTION,
};

use crate::ledger::Ledger;

/// Action history over delivery ledgers.
pub type LedgerHistory = SnapshotHistory<Ledger>;
