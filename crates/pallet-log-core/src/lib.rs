//! Delivery log domain: rows, ledger, storage and the journal that records
//! every change in a revertible history.
pub mod dates;
pub mod delivery;
pub mod describe;
pub mod history;
pub mod journal;
pub mod ledger;
pub mod store;

pub use delivery::{parse_pallets, Delivery, DeliveryId, DeliveryPatch, NewDelivery, ValidationError};
pub use journal::Journal;
pub use ledger::{DayGroup, Ledger};
pub use store::{DeliveryStore, MemoryStore, RedbStore, StoreChange};
