//! Product model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product row — the current-state view of one inventory line.
///
/// `name` is the de-facto business key: mutation logic matches it
/// case-insensitively. The row itself must always equal the net effect of the
/// ledger entries recorded for that name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    /// Time-derived unique id, stable for the lifetime of the product
    pub id: String,
    /// Display name
    pub name: String,
    /// Units on hand, never negative
    pub quantity: i64,
    /// Last-known unit price
    pub price: f64,
    /// Creation timestamp, doubles as display-only "last updated"
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Case-insensitive business-key comparison
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
