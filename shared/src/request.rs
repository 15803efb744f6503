//! Request DTOs
//!
//! The write surface is the three stock verbs plus delete — there is no
//! generic "replace product" request, so the quantity invariants stay
//! enforceable in one place.
//!
//! Numeric fields tolerate string encoding: HTML form clients send
//! `"quantity": "10"` as readily as `"quantity": 10`, so `quantity` and
//! `price` deserialize from either. Anything non-numeric is rejected at the
//! serde boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de};

use crate::models::{Role, SalesChannel};

/// Deserialize an integer that may arrive as a JSON number or a string
fn flexible_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) if v.fract() == 0.0 => Ok(v as i64),
        Raw::Float(v) => Err(de::Error::custom(format!("expected an integer, got {v}"))),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("expected an integer, got \"{s}\""))),
    }
}

/// Deserialize a float that may arrive as a JSON number or a string
fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(v) => Ok(v),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got \"{s}\""))),
    }
}

/// Stock-in: receive units of a product, creating it on first sight
#[derive(Debug, Clone, Deserialize)]
pub struct StockInRequest {
    pub name: String,
    #[serde(deserialize_with = "flexible_i64")]
    pub quantity: i64,
    #[serde(deserialize_with = "flexible_f64")]
    pub price: f64,
    /// Event date; defaults to now when omitted
    pub date: Option<DateTime<Utc>>,
}

/// Stock-out: sell units through a sales channel
#[derive(Debug, Clone, Deserialize)]
pub struct StockOutRequest {
    pub name: String,
    #[serde(deserialize_with = "flexible_i64")]
    pub quantity: i64,
    #[serde(deserialize_with = "flexible_f64")]
    pub price: f64,
    pub channel: SalesChannel,
}

/// Return: reinstate units of an existing product
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnStockRequest {
    pub name: String,
    #[serde(deserialize_with = "flexible_i64")]
    pub quantity: i64,
    pub reason: String,
}

/// Login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// New user registration (admin only)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Date-ranged, product-filtered ledger query.
///
/// Dates are inclusive and compared against the date-only prefix of the
/// entry timestamp.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerQuery {
    pub start: Option<chrono::NaiveDate>,
    pub end: Option<chrono::NaiveDate>,
    /// Case-insensitive product name filter
    pub product: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_number_or_string() {
        let from_num: StockInRequest =
            serde_json::from_str(r#"{"name":"Widget","quantity":10,"price":5.0}"#).unwrap();
        assert_eq!(from_num.quantity, 10);

        let from_str: StockInRequest =
            serde_json::from_str(r#"{"name":"Widget","quantity":"10","price":"5.50"}"#).unwrap();
        assert_eq!(from_str.quantity, 10);
        assert_eq!(from_str.price, 5.5);
    }

    #[test]
    fn non_numeric_quantity_is_rejected() {
        let res = serde_json::from_str::<StockInRequest>(
            r#"{"name":"Widget","quantity":"ten","price":5.0}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn fractional_quantity_is_rejected() {
        let res = serde_json::from_str::<StockInRequest>(
            r#"{"name":"Widget","quantity":2.5,"price":5.0}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn stock_out_parses_channel() {
        let req: StockOutRequest = serde_json::from_str(
            r#"{"name":"Widget","quantity":4,"price":"6.0","channel":"TikTok"}"#,
        )
        .unwrap();
        assert_eq!(req.channel, SalesChannel::TikTok);

        let other: StockOutRequest = serde_json::from_str(
            r#"{"name":"Widget","quantity":1,"price":2,"channel":"Car Boot Sale"}"#,
        )
        .unwrap();
        assert_eq!(other.channel, SalesChannel::Other("Car Boot Sale".into()));
    }
}
