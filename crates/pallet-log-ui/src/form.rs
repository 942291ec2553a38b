/// Input state for the entry form and the inline pallet editor.
use chrono::NaiveDate;
use pallet_log_core::{parse_pallets, DeliveryId, NewDelivery};

/// State of the "add delivery" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub supplier: String,
    pub pallets_text: String,
}

impl EntryForm {
    pub fn new(supplier: impl Into<String>) -> Self {
        Self {
            supplier: supplier.into(),
            pallets_text: String::new(),
        }
    }

    /// The typed pallet count, if it is a whole number above zero.
    pub fn pallets(&self) -> Option<u32> {
        parse_pallets(&self.pallets_text).ok().filter(|&n| n > 0)
    }

    /// Whether "Add" should be enabled.
    pub fn can_submit(&self) -> bool {
        self.pallets().is_some() && !self.supplier.trim().is_empty()
    }

    /// Builds the payload for a delivery on `date`, or `None` while the
    /// form is incomplete.
    pub fn to_new_delivery(&self, date: NaiveDate) -> Option<NewDelivery> {
        if !self.can_submit() {
            return None;
        }
        Some(NewDelivery {
            supplier: self.supplier.clone(),
            pallets: self.pallets()?,
            date,
        })
    }

    /// Clears the pallet field. The supplier stays selected for the next entry.
    pub fn clear_pallets(&mut self) {
        self.pallets_text.clear();
    }
}

/// A pallet count being edited in place on a delivery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalletEdit {
    pub id: DeliveryId,
    pub text: String,
    original: u32,
    pub(crate) focus_requested: bool,
}

/// Result of ending an inline edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Store the new count.
    Save(u32),
    /// Same value as before; nothing to record.
    Unchanged,
    /// Not a number; the card falls back to the stored value.
    Invalid,
}

impl PalletEdit {
    pub fn new(id: DeliveryId, current: u32) -> Self {
        Self {
            id,
            text: current.to_string(),
            original: current,
            focus_requested: true,
        }
    }

    pub fn outcome(&self) -> EditOutcome {
        match parse_pallets(&self.text) {
            Ok(n) if n == self.original => EditOutcome::Unchanged,
            Ok(n) => EditOutcome::Save(n),
            Err(_) => EditOutcome::Invalid,
        }
    }
}
