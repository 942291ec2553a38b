/// Delivery storage backed by redb.
///
/// Uses a single redb database file with one table, `deliveries`, mapping
/// each delivery id to its bincode-serialized `Delivery`.
use std::path::Path;

use anyhow::{bail, Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, Table, TableDefinition};

use super::{sort_newest_first, DeliveryStore, StoreChange};
use crate::delivery::{Delivery, DeliveryId};

/// Delivery table: id → bincode-serialized Delivery.
const DELIVERIES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("deliveries");

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "deliveries.redb";

/// On-disk delivery store.
///
/// Every call, including a whole batch, runs in its own redb transaction,
/// so a failed call leaves the database as it was.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish()
    }
}

impl RedbStore {
    /// Opens or creates the delivery database in the given directory.
    ///
    /// Creates the directory and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the database
    /// cannot be opened.
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join(DB_FILE_NAME);
        let db = Database::create(&db_path)
            .with_context(|| format!("Failed to open delivery database: {}", db_path.display()))?;

        // Ensure the table exists
        let write_txn = db
            .begin_write()
            .context("Failed to begin initial write transaction")?;
        {
            let _ = write_txn
                .open_table(DELIVERIES_TABLE)
                .context("Failed to create deliveries table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial transaction")?;

        tracing::info!("Opened delivery database at {}", db_path.display());
        Ok(Self { db })
    }

    /// Runs `changes` in one write transaction, committing only if all
    /// of them succeed.
    fn write_batch(&self, changes: &[StoreChange]) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        let applied = {
            let mut table = write_txn
                .open_table(DELIVERIES_TABLE)
                .context("Failed to open deliveries table")?;
            changes
                .iter()
                .try_for_each(|change| apply_change(&mut table, change))
        };
        if let Err(e) = applied {
            write_txn
                .abort()
                .context("Failed to abort write transaction")?;
            return Err(e);
        }
        write_txn
            .commit()
            .context("Failed to commit write transaction")?;
        Ok(())
    }
}

fn apply_change(
    table: &mut Table<'_, &'static str, &'static [u8]>,
    change: &StoreChange,
) -> Result<()> {
    match change {
        StoreChange::Insert(row) => put_row(table, row, false),
        StoreChange::Update { new, .. } => put_row(table, new, true),
        StoreChange::Delete(row) => {
            table
                .remove(row.id.as_str())
                .context("Failed to remove delivery")?;
            Ok(())
        }
    }
}

/// Writes `delivery`, requiring the id to exist (`update`) or to be new.
fn put_row(
    table: &mut Table<'_, &'static str, &'static [u8]>,
    delivery: &Delivery,
    must_exist: bool,
) -> Result<()> {
    let key = delivery.id.as_str();
    let exists = table
        .get(key)
        .context("Failed to read delivery")?
        .is_some();
    match (exists, must_exist) {
        (false, true) => bail!("Delivery {key} not found"),
        (true, false) => bail!("Delivery {key} already exists"),
        _ => {}
    }

    let bytes = bincode::serialize(delivery).context("Failed to serialize delivery")?;
    table
        .insert(key, bytes.as_slice())
        .context("Failed to write delivery")?;
    Ok(())
}

impl DeliveryStore for RedbStore {
    fn insert(&mut self, delivery: &Delivery) -> Result<()> {
        self.write_batch(&[StoreChange::Insert(delivery.clone())])
    }

    fn update(&mut self, delivery: &Delivery) -> Result<()> {
        // The previous row is only needed for rollback, which a transaction
        // does not use.
        self.write_batch(&[StoreChange::Update {
            old: delivery.clone(),
            new: delivery.clone(),
        }])
    }

    fn delete(&mut self, id: &DeliveryId) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(DELIVERIES_TABLE)
                .context("Failed to open deliveries table")?;
            table
                .remove(id.as_str())
                .context("Failed to remove delivery")?;
        }
        write_txn.commit().context("Failed to commit deletion")?;
        Ok(())
    }

    fn apply_batch(&mut self, changes: &[StoreChange]) -> Result<()> {
        self.write_batch(changes)
    }

    fn list(&self) -> Result<Vec<Delivery>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(DELIVERIES_TABLE)
            .context("Failed to open deliveries table")?;

        let mut rows = Vec::new();
        for entry in table.iter().context("Failed to iterate deliveries table")? {
            let (_, value_guard) = entry.context("Failed to read delivery entry")?;
            let row: Delivery = bincode::deserialize(value_guard.value())
                .context("Failed to deserialize delivery")?;
            rows.push(row);
        }

        sort_newest_first(&mut rows);
        Ok(rows)
    }
}
