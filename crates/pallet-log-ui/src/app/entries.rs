//! Delivery actions triggered from the UI: add, edit, delete, revert.
//!
//! Every action goes through the journal, so the store and the action
//! history stay in step. Failures land in the status bar.

use pallet_log_core::history::HistoryError;
use pallet_log_core::DeliveryId;

use super::{today, App};
use crate::form::{EditOutcome, PalletEdit};

/// Maps a row of the newest-first history list to the snapshot index that
/// undoes it.
///
/// Row 0 is the most recent action; reverting to the snapshot before it
/// undoes that action. The initial state has no row.
pub(crate) fn revert_index_for_row(history_len: usize, row: usize) -> Option<usize> {
    history_len.checked_sub(2)?.checked_sub(row)
}

impl App {
    /// Adds the delivery described by the entry form, dated today.
    pub fn add_entry(&mut self) {
        let Some(new) = self.form.to_new_delivery(today()) else {
            return;
        };
        match self.journal.add(new) {
            Ok(row) => {
                tracing::debug!("Added delivery {}", row.id);
                self.form.clear_pallets();
                self.status = None;
            }
            Err(e) => self.report("Failed to add delivery", &e),
        }
    }

    /// Starts editing the pallet count of a card.
    pub fn start_edit(&mut self, id: &DeliveryId, current: u32) {
        self.editing = Some(PalletEdit::new(id.clone(), current));
    }

    /// Ends the inline edit, saving the typed count when it is valid.
    pub fn finish_edit(&mut self) {
        let Some(edit) = self.editing.take() else {
            return;
        };
        match edit.outcome() {
            EditOutcome::Save(pallets) => {
                match self.journal.update_pallets(&edit.id, pallets) {
                    Ok(_) => self.status = None,
                    Err(e) => self.report("Failed to update delivery", &e),
                }
            }
            EditOutcome::Unchanged => {}
            EditOutcome::Invalid => {
                tracing::debug!("Discarded invalid pallet count '{}'", edit.text);
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Deletes a delivery. An inline edit of another row is saved first.
    pub fn delete_entry(&mut self, id: &DeliveryId) {
        match self.editing.as_ref().map(|e| &e.id == id) {
            Some(true) => self.editing = None,
            Some(false) => self.finish_edit(),
            None => {}
        }
        match self.journal.delete(id) {
            Ok(_) => self.status = None,
            Err(e) => self.report("Failed to delete delivery", &e),
        }
    }

    /// Undoes the action on `row` of the history window (0 = newest) along
    /// with everything after it, then closes the window.
    pub fn revert_action(&mut self, row: usize) {
        let len = self.journal.history().len();
        let result = match revert_index_for_row(len, row) {
            Some(index) => self.journal.revert(index),
            None => Err(HistoryError::OutOfRange { index: row, len }.into()),
        };
        match result {
            Ok(()) => {
                self.editing = None;
                self.history_open = false;
                self.status = None;
            }
            Err(e) => self.report("Failed to undo", &e),
        }
    }

    /// Undoes the most recent action, if any.
    pub fn undo_last(&mut self) {
        self.editing = None;
        match self.journal.undo_last() {
            Ok(true) => self.status = None,
            Ok(false) => {}
            Err(e) => self.report("Failed to undo", &e),
        }
    }

    fn report(&mut self, what: &str, err: &anyhow::Error) {
        tracing::warn!("{what}: {err:#}");
        self.status = Some(format!("{what}: {err}"));
    }
}
