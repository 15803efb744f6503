//! Query/Reporting Adapter
//!
//! Pure read-side derivations over a snapshot of the product list and the
//! ledger. No mutation, no cached state: every function is a plain fold over
//! the slices it is given, so calling twice without an intervening mutation
//! yields identical results.

use chrono::{DateTime, Datelike, Local};

use shared::request::LedgerQuery;
use shared::{Product, StockTransaction, TxKind};

/// Default low-stock alert threshold (units)
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 50;

/// Sum of all product quantities
pub fn total_items(products: &[Product]) -> i64 {
    products.iter().map(|p| p.quantity).sum()
}

/// Sum of `quantity * price` over current products
pub fn total_value(products: &[Product]) -> f64 {
    products.iter().map(|p| p.quantity as f64 * p.price).sum()
}

/// Revenue over OUT entries whose timestamp falls in the calendar month of
/// `now` (caller's local calendar)
pub fn monthly_sales(transactions: &[StockTransaction], now: DateTime<Local>) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::Out)
        .filter(|t| {
            let local = t.timestamp.with_timezone(&Local);
            local.year() == now.year() && local.month() == now.month()
        })
        .map(StockTransaction::value)
        .sum()
}

/// Products with `0 < quantity <= threshold`
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.quantity > 0 && p.quantity <= threshold)
        .cloned()
        .collect()
}

/// Products with `quantity == 0`
pub fn out_of_stock(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.quantity == 0)
        .cloned()
        .collect()
}

/// Products with `quantity > 0`
pub fn available_stock(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.quantity > 0)
        .cloned()
        .collect()
}

/// Date-ranged, product-filtered ledger listing.
///
/// Bounds are inclusive and compared against the date-only prefix of each
/// entry's timestamp; the name filter is case-insensitive.
pub fn filter_transactions(
    transactions: &[StockTransaction],
    query: &LedgerQuery,
) -> Vec<StockTransaction> {
    transactions
        .iter()
        .filter(|t| {
            let date = t.timestamp.date_naive();
            if let Some(start) = query.start
                && date < start
            {
                return false;
            }
            if let Some(end) = query.end
                && date > end
            {
                return false;
            }
            if let Some(name) = &query.product
                && t.name.to_lowercase() != name.to_lowercase()
            {
                return false;
            }
            true
        })
        .cloned()
        .collect()
}

/// Revenue over OUT entries in the given slice
pub fn sales_revenue(transactions: &[StockTransaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::Out)
        .map(StockTransaction::value)
        .sum()
}

/// Value over IN and RETURN entries in the given slice
pub fn stock_in_value(transactions: &[StockTransaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::In || t.kind == TxKind::Return)
        .map(StockTransaction::value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn product(name: &str, quantity: i64, price: f64) -> Product {
        Product {
            id: format!("id-{name}"),
            name: name.to_string(),
            quantity,
            price,
            created_at: Utc::now(),
        }
    }

    fn entry(kind: TxKind, name: &str, quantity: i64, price: Option<f64>) -> StockTransaction {
        StockTransaction {
            id: Utc::now().timestamp_millis().to_string(),
            kind,
            name: name.to_string(),
            quantity,
            price,
            channel: None,
            reason: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn totals_sum_over_products() {
        let products = vec![product("A", 10, 2.0), product("B", 3, 5.0), product("C", 0, 9.0)];
        assert_eq!(total_items(&products), 13);
        assert_eq!(total_value(&products), 35.0);
    }

    #[test]
    fn totals_are_zero_on_empty_snapshot() {
        assert_eq!(total_items(&[]), 0);
        assert_eq!(total_value(&[]), 0.0);
        assert_eq!(monthly_sales(&[], Local::now()), 0.0);
    }

    #[test]
    fn monthly_sales_counts_only_out_in_current_month() {
        let now = Local::now();
        let mut this_month = entry(TxKind::Out, "A", 2, Some(10.0));
        this_month.timestamp = Utc::now();

        let mut long_ago = entry(TxKind::Out, "A", 100, Some(10.0));
        long_ago.timestamp = Utc::now() - Duration::days(400);

        let in_entry = entry(TxKind::In, "A", 50, Some(10.0));

        let sales = monthly_sales(&[this_month, long_ago, in_entry], now);
        assert_eq!(sales, 20.0);
    }

    #[test]
    fn low_and_out_of_stock_split_by_threshold() {
        let products = vec![
            product("plenty", 200, 1.0),
            product("low", 50, 1.0),
            product("lower", 1, 1.0),
            product("gone", 0, 1.0),
        ];
        let low = low_stock(&products, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(
            low.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["low", "lower"]
        );
        let out = out_of_stock(&products);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "gone");
        assert_eq!(available_stock(&products).len(), 3);
    }

    #[test]
    fn filter_is_inclusive_and_case_insensitive() {
        let today = Utc::now().date_naive();
        let mut old = entry(TxKind::Out, "Widget", 1, Some(1.0));
        old.timestamp = Utc::now() - Duration::days(30);
        let recent = entry(TxKind::Out, "Widget", 2, Some(1.0));
        let other = entry(TxKind::In, "Gadget", 3, Some(1.0));

        let all = vec![old.clone(), recent.clone(), other.clone()];

        let query = LedgerQuery {
            start: Some(today),
            end: Some(today),
            product: None,
        };
        let filtered = filter_transactions(&all, &query);
        assert_eq!(filtered.len(), 2);

        let query = LedgerQuery {
            start: None,
            end: None,
            product: Some("widget".to_string()),
        };
        let filtered = filter_transactions(&all, &query);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|t| t.name == "Widget"));
    }

    #[test]
    fn report_values_split_by_direction() {
        let entries = vec![
            entry(TxKind::In, "A", 10, Some(2.0)),
            entry(TxKind::Return, "A", 1, Some(2.0)),
            entry(TxKind::Out, "A", 3, Some(5.0)),
            entry(TxKind::Delete, "B", 7, Some(100.0)),
            entry(TxKind::Return, "A", 4, None),
        ];
        assert_eq!(sales_revenue(&entries), 15.0);
        // RETURN without a recorded price contributes nothing
        assert_eq!(stock_in_value(&entries), 22.0);
    }

    #[test]
    fn queries_are_idempotent_without_mutation() {
        let products = vec![product("A", 10, 2.0)];
        let entries = vec![entry(TxKind::Out, "A", 2, Some(3.0))];
        assert_eq!(total_items(&products), total_items(&products));
        assert_eq!(
            filter_transactions(&entries, &LedgerQuery::default()),
            filter_transactions(&entries, &LedgerQuery::default())
        );
    }
}
