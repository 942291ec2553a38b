/// Delivery records and their validation.
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier of a delivery row (`row-<uuid v7>`).
///
/// Ids generated by one process sort in creation order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(String);

impl DeliveryId {
    /// Generates a fresh time-ordered id.
    pub fn generate() -> Self {
        Self(format!("row-{}", uuid::Uuid::now_v7()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeliveryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logged delivery: a supplier dropped off some pallets on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub supplier: String,
    pub pallets: u32,
    pub date: NaiveDate,
}

/// Form payload for a delivery that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDelivery {
    pub supplier: String,
    pub pallets: u32,
    pub date: NaiveDate,
}

impl NewDelivery {
    /// Checks the payload and builds a delivery with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for a blank supplier or zero pallets.
    pub fn into_delivery(self) -> Result<Delivery, ValidationError> {
        let supplier = self.supplier.trim().to_string();
        if supplier.is_empty() {
            return Err(ValidationError::EmptySupplier);
        }
        if self.pallets == 0 {
            return Err(ValidationError::ZeroPallets);
        }
        Ok(Delivery {
            id: DeliveryId::generate(),
            supplier,
            pallets: self.pallets,
            date: self.date,
        })
    }
}

/// Partial update of a delivery. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryPatch {
    pub supplier: Option<String>,
    pub pallets: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl DeliveryPatch {
    pub fn pallets(pallets: u32) -> Self {
        Self {
            pallets: Some(pallets),
            ..Self::default()
        }
    }

    /// Returns `row` with the patch merged in.
    pub fn merged_into(&self, row: &Delivery) -> Delivery {
        Delivery {
            id: row.id.clone(),
            supplier: self
                .supplier
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map_or_else(|| row.supplier.clone(), str::to_string),
            pallets: self.pallets.unwrap_or(row.pallets),
            date: self.date.unwrap_or(row.date),
        }
    }
}

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("supplier name is required")]
    EmptySupplier,
    #[error("pallet count must be greater than zero")]
    ZeroPallets,
    #[error("'{0}' is not a valid pallet count")]
    InvalidPallets(String),
}

/// Parses a pallet count typed by the user. Zero is accepted.
///
/// # Errors
///
/// Returns `ValidationError::InvalidPallets` for anything that is not a
/// non-negative integer.
pub fn parse_pallets(text: &str) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidPallets(trimmed.to_string()))
}
