//! Response DTOs

use serde::{Deserialize, Serialize};

use crate::models::{Product, Role, StockTransaction};

/// Public view of a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub role: Role,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Dashboard aggregates over the current snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Sum of all product quantities
    pub total_items: i64,
    /// Sum of `quantity * price` over products
    pub total_value: f64,
    /// Sum of `quantity * price` over OUT entries this calendar month
    pub monthly_sales: f64,
    /// Products with `0 < quantity <= threshold`
    pub low_stock: Vec<Product>,
    /// Products with `quantity == 0`
    pub out_of_stock: Vec<Product>,
    /// The threshold the low-stock list was computed with
    pub low_stock_threshold: i64,
}

/// Export payload for a date-ranged report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
    /// Name filter the report was computed with, if any
    pub product: Option<String>,
    /// Revenue over OUT entries in range
    pub total_sales: f64,
    /// Value over IN and RETURN entries in range
    pub total_stock_in_value: f64,
    /// Current products with stock on hand
    pub available_stock: Vec<Product>,
    /// Current products at zero quantity
    pub out_of_stock: Vec<Product>,
    /// The entries the totals were derived from, newest first
    pub transactions: Vec<StockTransaction>,
}

/// Plain acknowledgement for destructive operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
