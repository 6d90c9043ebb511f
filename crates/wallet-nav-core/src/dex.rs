//! DEX domain types: assets, trading pairs and chart candles

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A tradable asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub decimals: u8,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, decimals: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            decimals,
        }
    }
}

/// A market pair as listed on the DEX market screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartPair {
    pub id: String,
    pub amount_asset: Asset,
    pub price_asset: Asset,
    /// Whether the user pinned this pair to their watchlist
    pub is_checked: bool,
    /// Whether this pair belongs to the curated general list
    pub is_general: bool,
    pub sort_level: i32,
}

impl SmartPair {
    pub fn new(amount_asset: Asset, price_asset: Asset) -> Self {
        Self {
            id: format!("{}/{}", amount_asset.id, price_asset.id),
            amount_asset,
            price_asset,
            is_checked: false,
            is_general: false,
            sort_level: 0,
        }
    }

    /// Copy of this pair with the checked flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            is_checked: !self.is_checked,
            ..self.clone()
        }
    }

    /// Case-insensitive match against either asset's name or id
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            &self.amount_asset.name,
            &self.amount_asset.id,
            &self.price_asset.name,
            &self.price_asset.id,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Pair summary handed to the pair-info screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoPair {
    pub amount_asset: Asset,
    pub price_asset: Asset,
    pub is_general: bool,
}

impl From<&SmartPair> for InfoPair {
    fn from(pair: &SmartPair) -> Self {
        Self {
            amount_asset: pair.amount_asset.clone(),
            price_asset: pair.price_asset.clone(),
            is_general: pair.is_general,
        }
    }
}

/// Candle aggregation interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "5")]
    M5,
    #[serde(rename = "15")]
    M15,
    #[serde(rename = "30")]
    M30,
    #[serde(rename = "60")]
    H1,
    #[serde(rename = "180")]
    H3,
    #[serde(rename = "1440")]
    H24,
}

impl TimeFrame {
    /// Interval length in minutes
    pub fn minutes(self) -> i64 {
        match self {
            TimeFrame::M5 => 5,
            TimeFrame::M15 => 15,
            TimeFrame::M30 => 30,
            TimeFrame::H1 => 60,
            TimeFrame::H3 => 180,
            TimeFrame::H24 => 1440,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::minutes(self.minutes())
    }
}

/// One OHLCV candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}
