//! Reports API Handlers
//!
//! Read-side aggregation endpoints. All numbers are derived on demand from a
//! fresh snapshot via the pure functions in [`crate::reporting`].

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Datelike, Days, Local, Months, NaiveDate};

use shared::request::LedgerQuery;
use shared::response::{InventoryStats, ReportSummary};

use crate::core::ServerState;
use crate::db::repository::{ProductRepository, TransactionRepository};
use crate::reporting;
use crate::utils::AppResult;

/// GET /api/reports/stats - dashboard aggregates
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<InventoryStats>> {
    let products = ProductRepository::new(state.get_pool()).find_all().await?;
    let transactions = TransactionRepository::new(state.get_pool())
        .find_all()
        .await?;

    let threshold = state.config.low_stock_threshold;
    let stats = InventoryStats {
        total_items: reporting::total_items(&products),
        total_value: reporting::total_value(&products),
        monthly_sales: reporting::monthly_sales(&transactions, Local::now()),
        low_stock: reporting::low_stock(&products, threshold),
        out_of_stock: reporting::out_of_stock(&products),
        low_stock_threshold: threshold,
    };

    Ok(Json(stats))
}

/// GET /api/reports/summary?start=&end=&product= - export payload for a
/// date-ranged report. Defaults to the current calendar month.
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<ReportSummary>> {
    let today = Local::now().date_naive();
    let (default_start, default_end) = month_bounds(today);
    let query = LedgerQuery {
        start: Some(query.start.unwrap_or(default_start)),
        end: Some(query.end.unwrap_or(default_end)),
        product: query.product,
    };

    let products = ProductRepository::new(state.get_pool()).find_all().await?;
    let transactions = TransactionRepository::new(state.get_pool())
        .find_all()
        .await?;
    let filtered = reporting::filter_transactions(&transactions, &query);

    let summary = ReportSummary {
        start: query.start.unwrap_or(default_start),
        end: query.end.unwrap_or(default_end),
        product: query.product.clone(),
        total_sales: reporting::sales_revenue(&filtered),
        total_stock_in_value: reporting::stock_in_value(&filtered),
        available_stock: reporting::available_stock(&products),
        out_of_stock: reporting::out_of_stock(&products),
        transactions: filtered,
    };

    Ok(Json(summary))
}

/// First and last day of the month containing `date`
fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(date);
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_cover_the_whole_month() {
        let (first, last) = month_bounds(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (first, last) = month_bounds(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }
}
