/// CRUD coordinator tying the delivery store to the action history.
///
/// Each edit is first accepted by the store, then recorded as a new ledger
/// snapshot. Reverting reconciles the store with the restored ledger.
use anyhow::{Context, Result};

use crate::delivery::{Delivery, DeliveryId, DeliveryPatch, NewDelivery};
use crate::describe::{describe_add, describe_delete, describe_update};
use crate::history::{HistoryError, LedgerHistory};
use crate::ledger::Ledger;
use crate::store::{DeliveryStore, MemoryStore, StoreChange};

/// Owns the ledger history and the store it mirrors.
pub struct Journal {
    history: LedgerHistory,
    store: Box<dyn DeliveryStore>,
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("rows", &self.ledger().len())
            .field("history", &self.history)
            .finish()
    }
}

impl Journal {
    /// Loads the stored deliveries as the initial snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot list its rows.
    pub fn open(store: Box<dyn DeliveryStore>) -> Result<Self> {
        let rows = store.list().context("Failed to load deliveries")?;
        tracing::info!("Loaded {} deliveries", rows.len());
        Ok(Self {
            history: LedgerHistory::new(Ledger::new(rows)),
            store,
        })
    }

    /// An empty journal whose rows only live in memory.
    pub fn in_memory() -> Self {
        Self {
            history: LedgerHistory::new(Ledger::default()),
            store: Box::new(MemoryStore::new()),
        }
    }

    /// The current ledger.
    pub fn ledger(&self) -> &Ledger {
        self.history.current()
    }

    /// The action history, oldest first.
    pub fn history(&self) -> &LedgerHistory {
        &self.history
    }

    /// Rows as the store currently lists them.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub fn stored_rows(&self) -> Result<Vec<Delivery>> {
        self.store.list()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Validates and stores a new delivery, then records it.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for bad input or the store's error.
    pub fn add(&mut self, new: NewDelivery) -> Result<Delivery> {
        let row = new.into_delivery()?;
        self.store
            .insert(&row)
            .with_context(|| format!("Failed to store delivery for {}", row.supplier))?;

        let description = describe_add(&row);
        let added = row.clone();
        self.history
            .apply(move |ledger| ledger.with_added(added), description);
        Ok(row)
    }

    /// Applies `patch` to delivery `id`.
    ///
    /// Returns `false` when the row is unknown or the patch changes nothing.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the history is left untouched.
    pub fn update(&mut self, id: &DeliveryId, patch: &DeliveryPatch) -> Result<bool> {
        let Some(row) = self.ledger().find(id) else {
            tracing::warn!("Update for unknown delivery {id}");
            return Ok(false);
        };
        let updated = patch.merged_into(row);
        if &updated == row {
            return Ok(false);
        }
        let description = describe_update(Some(row), patch);

        self.store
            .update(&updated)
            .with_context(|| format!("Failed to update delivery {id}"))?;
        Ok(self
            .history
            .apply(|ledger| ledger.with_patched(id, patch), description))
    }

    /// Sets the pallet count of delivery `id`.
    ///
    /// # Errors
    ///
    /// See [`Journal::update`].
    pub fn update_pallets(&mut self, id: &DeliveryId, pallets: u32) -> Result<bool> {
        self.update(id, &DeliveryPatch::pallets(pallets))
    }

    /// Deletes delivery `id`. Returns `false` if it is not in the ledger.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the history is left untouched.
    pub fn delete(&mut self, id: &DeliveryId) -> Result<bool> {
        let Some(row) = self.ledger().find(id) else {
            return Ok(false);
        };
        let description = describe_delete(row);

        self.store
            .delete(id)
            .with_context(|| format!("Failed to delete delivery {id}"))?;
        Ok(self
            .history
            .apply(|ledger| ledger.without(id), description))
    }

    /// Reverts the history to snapshot `index` and brings the store in line.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::OutOfRange` for an unknown index (nothing
    /// changes), or the store's error if reconciling fails.
    pub fn revert(&mut self, index: usize) -> Result<()> {
        let len = self.history.len();
        let target = self
            .history
            .list_history()
            .get(index)
            .map(|s| s.state().clone())
            .ok_or(HistoryError::OutOfRange { index, len })?;

        let changes = changes_between(self.ledger(), &target);
        self.store
            .apply_batch(&changes)
            .with_context(|| format!("Failed to restore deliveries of snapshot {index}"))?;
        self.history.revert(index)?;
        tracing::info!("Reverted to snapshot {index}");
        Ok(())
    }

    /// Reverts the most recent action. Returns `false` if there is none.
    ///
    /// # Errors
    ///
    /// See [`Journal::revert`].
    pub fn undo_last(&mut self) -> Result<bool> {
        if !self.history.can_undo() {
            return Ok(false);
        }
        self.revert(self.history.pointer() - 1)?;
        Ok(true)
    }
}

/// Store changes that turn the rows of `from` into those of `to`.
///
/// Inserts come first and deletes last, so undoing a partial batch only
/// needs deletes and updates.
fn changes_between(from: &Ledger, to: &Ledger) -> Vec<StoreChange> {
    let mut inserts = Vec::new();
    let mut updates = Vec::new();
    for row in to {
        match from.find(&row.id) {
            None => inserts.push(StoreChange::Insert(row.clone())),
            Some(old) if old != row => updates.push(StoreChange::Update {
                old: old.clone(),
                new: row.clone(),
            }),
            Some(_) => {}
        }
    }
    let deletes = from
        .iter()
        .filter(|row| to.find(&row.id).is_none())
        .map(|row| StoreChange::Delete(row.clone()));

    inserts.into_iter().chain(updates).chain(deletes).collect()
}
