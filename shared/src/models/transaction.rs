//! Ledger entry model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger entry type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum TxKind {
    /// Stock received
    In,
    /// Stock sold through a sales channel
    Out,
    /// Stock reinstated (customer return)
    Return,
    /// Product removed from inventory entirely
    Delete,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::In => "IN",
            TxKind::Out => "OUT",
            TxKind::Return => "RETURN",
            TxKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales channel for stock-out events.
///
/// A fixed set of known platforms plus a free-text fallback; persisted as
/// plain text so unknown channels survive round trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SalesChannel {
    OfficialWebsite,
    TikTok,
    WhatsApp,
    Lazada,
    Shopee,
    NvsSamaSama,
    Other(String),
}

impl SalesChannel {
    pub fn as_str(&self) -> &str {
        match self {
            SalesChannel::OfficialWebsite => "Official Website",
            SalesChannel::TikTok => "TikTok",
            SalesChannel::WhatsApp => "WhatsApp",
            SalesChannel::Lazada => "Lazada",
            SalesChannel::Shopee => "Shopee",
            SalesChannel::NvsSamaSama => "NVS SAMA SAMA",
            SalesChannel::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for SalesChannel {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Official Website" => SalesChannel::OfficialWebsite,
            "TikTok" => SalesChannel::TikTok,
            "WhatsApp" => SalesChannel::WhatsApp,
            "Lazada" => SalesChannel::Lazada,
            "Shopee" => SalesChannel::Shopee,
            "NVS SAMA SAMA" => SalesChannel::NvsSamaSama,
            _ => SalesChannel::Other(s),
        }
    }
}

impl From<SalesChannel> for String {
    fn from(c: SalesChannel) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for SalesChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable ledger entry.
///
/// Entries are appended, never updated or deleted individually (bulk reset is
/// the only administrative exception). `name` is a plain string, not a foreign
/// key — history must survive product deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StockTransaction {
    /// Time-derived unique id; ordering by id approximates chronology
    pub id: String,
    /// Entry type
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub kind: TxKind,
    /// Product name at the time of the event
    pub name: String,
    /// Units affected, positive
    pub quantity: i64,
    /// Unit price at time of event; present for IN/OUT
    pub price: Option<f64>,
    /// Sales channel, meaningful for OUT only
    pub channel: Option<String>,
    /// Free text, meaningful for RETURN/DELETE
    pub reason: Option<String>,
    /// Event time, immutable once written
    pub timestamp: DateTime<Utc>,
}

impl StockTransaction {
    /// Monetary value of this entry (`quantity * price`), 0 when no price was
    /// recorded
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_round_trips_known_and_unknown() {
        let known = SalesChannel::from("TikTok".to_string());
        assert_eq!(known, SalesChannel::TikTok);
        assert_eq!(known.as_str(), "TikTok");

        let other = SalesChannel::from("Night Market".to_string());
        assert_eq!(other, SalesChannel::Other("Night Market".to_string()));
        assert_eq!(other.as_str(), "Night Market");
    }

    #[test]
    fn tx_kind_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&TxKind::Return).unwrap(), "\"RETURN\"");
        let kind: TxKind = serde_json::from_str("\"OUT\"").unwrap();
        assert_eq!(kind, TxKind::Out);
    }
}
