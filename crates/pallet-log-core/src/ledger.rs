/// The delivery ledger: the document tracked by the action history.
///
/// All edits return a new ledger so each history snapshot stays immutable.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::delivery::{Delivery, DeliveryId, DeliveryPatch};

/// Ordered list of deliveries, most recently added first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    rows: Vec<Delivery>,
}

/// Deliveries of a single day with their pallet total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub deliveries: Vec<&'a Delivery>,
    pub total: u64,
}

impl Ledger {
    pub fn new(rows: Vec<Delivery>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Delivery] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Delivery> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: &DeliveryId) -> Option<&Delivery> {
        self.rows.iter().find(|r| &r.id == id)
    }

    /// Returns a ledger with `delivery` in front.
    pub fn with_added(&self, delivery: Delivery) -> Self {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(delivery);
        rows.extend(self.rows.iter().cloned());
        Self { rows }
    }

    /// Returns a ledger without the delivery `id`.
    pub fn without(&self, id: &DeliveryId) -> Self {
        Self {
            rows: self.rows.iter().filter(|r| &r.id != id).cloned().collect(),
        }
    }

    /// Returns a ledger where delivery `id` has `patch` applied.
    pub fn with_patched(&self, id: &DeliveryId, patch: &DeliveryPatch) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|r| {
                    if &r.id == id {
                        patch.merged_into(r)
                    } else {
                        r.clone()
                    }
                })
                .collect(),
        }
    }

    /// Sum of pallets over every delivery.
    pub fn grand_total(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.pallets)).sum()
    }

    /// Groups deliveries by day, newest day first.
    ///
    /// Within a day, deliveries keep ledger order.
    pub fn grouped_by_date(&self) -> Vec<DayGroup<'_>> {
        let mut groups: Vec<DayGroup<'_>> = Vec::new();
        for row in &self.rows {
            match groups.iter_mut().find(|g| g.date == row.date) {
                Some(group) => {
                    group.deliveries.push(row);
                    group.total += u64::from(row.pallets);
                }
                None => groups.push(DayGroup {
                    date: row.date,
                    deliveries: vec![row],
                    total: u64::from(row.pallets),
                }),
            }
        }
        groups.sort_by(|a, b| b.date.cmp(&a.date));
        groups
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Delivery;
    type IntoIter = std::slice::Iter<'a, Delivery>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
