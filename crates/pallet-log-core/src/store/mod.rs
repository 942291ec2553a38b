//! Persistence collaborators for delivery rows.
//!
//! The journal talks to storage only through `DeliveryStore`, so the same
//! CRUD flow runs against the on-disk database or an in-memory list.

mod disk;

pub use disk::RedbStore;

use anyhow::{bail, Result};

use crate::delivery::{Delivery, DeliveryId};

/// Insert/update/delete/list access to persisted deliveries.
pub trait DeliveryStore {
    /// Stores a new delivery.
    fn insert(&mut self, delivery: &Delivery) -> Result<()>;

    /// Replaces the stored delivery with the same id.
    ///
    /// Fails if no such delivery exists.
    fn update(&mut self, delivery: &Delivery) -> Result<()>;

    /// Removes a delivery. Removing an unknown id succeeds.
    fn delete(&mut self, id: &DeliveryId) -> Result<()>;

    /// All stored deliveries, newest day first, most recently created first
    /// within a day.
    fn list(&self) -> Result<Vec<Delivery>>;

    /// Applies `changes` in order, all or nothing.
    ///
    /// The default issues one call per change and, when one fails, rolls
    /// back the changes already made before returning the error.
    fn apply_batch(&mut self, changes: &[StoreChange]) -> Result<()> {
        for (done, change) in changes.iter().enumerate() {
            if let Err(e) = change.apply_to(self) {
                for applied in changes[..done].iter().rev() {
                    if let Err(undo) = applied.inverse().apply_to(self) {
                        tracing::error!("Failed to roll back {applied:?}: {undo:#}");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

/// One row-level change, carrying the row it replaces so it can be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Insert(Delivery),
    Update { old: Delivery, new: Delivery },
    Delete(Delivery),
}

impl StoreChange {
    /// The change that undoes this one.
    pub fn inverse(&self) -> Self {
        match self {
            Self::Insert(row) => Self::Delete(row.clone()),
            Self::Update { old, new } => Self::Update {
                old: new.clone(),
                new: old.clone(),
            },
            Self::Delete(row) => Self::Insert(row.clone()),
        }
    }

    fn apply_to<S: DeliveryStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        match self {
            Self::Insert(row) => store.insert(row),
            Self::Update { new, .. } => store.update(new),
            Self::Delete(row) => store.delete(&row.id),
        }
    }
}

/// Orders rows by day, then by id (creation order), both descending.
pub(crate) fn sort_newest_first(rows: &mut [Delivery]) {
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
}

/// Keeps deliveries in a `Vec`. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<Delivery>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `rows`.
    pub fn with_rows(rows: Vec<Delivery>) -> Self {
        Self { rows }
    }
}

impl DeliveryStore for MemoryStore {
    fn insert(&mut self, delivery: &Delivery) -> Result<()> {
        if self.rows.iter().any(|r| r.id == delivery.id) {
            bail!("Delivery {} already exists", delivery.id);
        }
        self.rows.push(delivery.clone());
        Ok(())
    }

    fn update(&mut self, delivery: &Delivery) -> Result<()> {
        match self.rows.iter_mut().find(|r| r.id == delivery.id) {
            Some(row) => {
                *row = delivery.clone();
                Ok(())
            }
            None => bail!("Delivery {} not found", delivery.id),
        }
    }

    fn delete(&mut self, id: &DeliveryId) -> Result<()> {
        self.rows.retain(|r| &r.id != id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Delivery>> {
        let mut rows = self.rows.clone();
        sort_newest_first(&mut rows);
        Ok(rows)
    }
}
