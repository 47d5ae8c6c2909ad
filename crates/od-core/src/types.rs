//! # Domain Types
//!
//! Small value types shared across the catalog, cart and checkout modules.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    Category     │   │    EntryId      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  NEW ARRIVAL    │   │  UUID v4 per    │       │
//! │  │  1600 = 16%     │   │  O-D WICH  ...  │   │  cart insertion │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │   OrderType     │                                                    │
//! │  │  Delivery       │                                                    │
//! │  │  Pickup         │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1600 bps = 16% (the store's GST rate).
/// Integer bps keep tax math in integers end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// The store's sales tax: 16%.
    pub const STANDARD: TaxRate = TaxRate(1600);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Human label such as `"16%"` or `"8.25%"`.
    pub fn label(&self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        match frac {
            0 => format!("{}%", whole),
            f if f % 10 == 0 => format!("{}.{}%", whole, f / 10),
            f => format!("{}.{:02}%", whole, f),
        }
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::STANDARD
    }
}

// =============================================================================
// Category
// =============================================================================

/// Menu section an item is listed under.
///
/// Serialized with the exact labels the menu shows, which are also the
/// labels the customization rules match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[serde(rename = "NEW ARRIVAL")]
    NewArrival,
    #[serde(rename = "MONDAY OVERDOSE")]
    MondayOverdose,
    #[serde(rename = "OD ON THE GO")]
    OdOnTheGo,
    #[serde(rename = "O-DONUT")]
    ODonut,
    #[serde(rename = "EXCLUSIVE DEALS")]
    ExclusiveDeals,
    #[serde(rename = "O-D WICH")]
    ODWich,
    #[serde(rename = "O-COMBOS")]
    OCombos,
}

impl Category {
    /// All categories in menu display order.
    pub const ALL: [Category; 7] = [
        Category::NewArrival,
        Category::MondayOverdose,
        Category::OdOnTheGo,
        Category::ODonut,
        Category::ExclusiveDeals,
        Category::ODWich,
        Category::OCombos,
    ];

    /// The menu label, e.g. `"O-D WICH"`.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::NewArrival => "NEW ARRIVAL",
            Category::MondayOverdose => "MONDAY OVERDOSE",
            Category::OdOnTheGo => "OD ON THE GO",
            Category::ODonut => "O-DONUT",
            Category::ExclusiveDeals => "EXCLUSIVE DEALS",
            Category::ODWich => "O-D WICH",
            Category::OCombos => "O-COMBOS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Entry Id
// =============================================================================

/// Identity of one cart insertion.
///
/// Two admissions of the same product with the same options still get
/// distinct ids: identity is per insertion, not per product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EntryId(String);

impl EntryId {
    /// Generates a fresh id (UUID v4).
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        EntryId(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        EntryId(value.to_string())
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// How the customer receives the order (picked on the welcome screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Delivery,
    #[default]
    Pickup,
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" => Ok(OrderType::Delivery),
            "pickup" | "pick-up" => Ok(OrderType::Pickup),
            _ => Err(ValidationError::NotAllowed {
                field: "order type".to_string(),
                allowed: vec!["delivery".to_string(), "pickup".to_string()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
