// Action labels shown in the history window.

use crate::delivery::{Delivery, DeliveryPatch};

pub fn describe_add(row: &Delivery) -> String {
    format!("Added: {} pallets for {}", row.pallets, row.supplier)
}

pub fn describe_delete(row: &Delivery) -> String {
    format!("Deleted: {} pallets from {}", row.pallets, row.supplier)
}

/// Label for an update of `row`; falls back to a generic label when the
/// row is unknown or the patch does not touch the pallet count.
pub fn describe_update(row: Option<&Delivery>, patch: &DeliveryPatch) -> String {
    match (row, patch.pallets) {
        (Some(row), Some(pallets)) => format!(
            "Changed pallets for {} from {} to {}",
            row.supplier, row.pallets, pallets
        ),
        (Some(row), None) => format!("Updated entry for {}", row.supplier),
        (None, _) => "Updated entry".to_string(),
    }
}
