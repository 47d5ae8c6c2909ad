//! # Catalog
//!
//! The read-only list of sellable items.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  catalog.json  ──► CatalogListing ──► CatalogItem ──► StaticCatalog     │
//! │  (price: "1,629.00")   (raw)          (Money)         (CatalogProvider) │
//! │                                                                         │
//! │  Screens read it through:                                               │
//! │    sections()  → menu grouped by category, in display order             │
//! │    search(q)   → name/description substring match                       │
//! │    find(id)    → the item a customization starts from                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Category;
use crate::validation::validate_search_query;

/// The shipped store menu.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable product definition.
///
/// `name` is not only display text: the customization rules match on it
/// (see [`crate::customization::Resolver::classify`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    /// Price before add-ons. Never negative.
    pub base_price: Money,
    /// Pre-discount price, display only.
    pub original_price: Option<Money>,
    /// Display only, e.g. "Hot 🔥".
    pub badge: Option<String>,
    /// Display only, e.g. "15% Off".
    pub discount_info: Option<String>,
    /// Display only, e.g. "Top Trending".
    pub tag: Option<String>,
    pub image_ref: Option<String>,
}

impl CatalogItem {
    /// Creates an item with only the fields pricing and classification use.
    pub fn new(id: u32, name: impl Into<String>, category: Category, base_price: Money) -> Self {
        CatalogItem {
            id,
            name: name.into(),
            description: None,
            category,
            base_price,
            original_price: None,
            badge: None,
            discount_info: None,
            tag: None,
            image_ref: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

// =============================================================================
// Raw Listing
// =============================================================================

/// A menu entry as the content team writes it: prices are display strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: String,
    #[serde(default)]
    pub original_price: Option<String>,
    #[serde(default)]
    pub discount: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub category: Category,
}

impl TryFrom<CatalogListing> for CatalogItem {
    type Error = ValidationError;

    fn try_from(listing: CatalogListing) -> Result<Self, Self::Error> {
        let base_price = Money::parse(&listing.price)?;
        let original_price = listing
            .original_price
            .as_deref()
            .map(Money::parse)
            .transpose()?;

        Ok(CatalogItem {
            id: listing.id,
            name: listing.name,
            description: listing.description,
            category: listing.category,
            base_price,
            original_price,
            badge: listing.badge,
            discount_info: listing.discount,
            tag: listing.tag,
            image_ref: listing.image,
        })
    }
}

// =============================================================================
// Provider
// =============================================================================

/// Source of catalog items. Static, not paginated, read-only.
pub trait CatalogProvider {
    fn list_items(&self) -> &[CatalogItem];

    fn find(&self, id: u32) -> Option<&CatalogItem> {
        self.list_items().iter().find(|item| item.id == id)
    }
}

/// One menu section: a category and its items in listing order.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct CatalogSection {
    pub category: Category,
    pub items: Vec<CatalogItem>,
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    /// Wraps already-built items. Item ids must be unique.
    pub fn new(items: Vec<CatalogItem>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        if let Some(dup) = items.iter().find(|item| !seen.insert(item.id)) {
            return Err(CoreError::CatalogLoadFailed(format!(
                "duplicate item id {}",
                dup.id
            )));
        }
        Ok(StaticCatalog { items })
    }

    /// Decodes a JSON array of [`CatalogListing`]s.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let listings: Vec<CatalogListing> = serde_json::from_str(json)?;
        let items = listings
            .into_iter()
            .map(|listing| {
                let id = listing.id;
                CatalogItem::try_from(listing).map_err(|e| {
                    CoreError::CatalogLoadFailed(format!("item {}: {}", id, e))
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(items)
    }

    /// The shipped store menu.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Items listed under `category`, in listing order.
    pub fn items_in(&self, category: Category) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// The menu: every category in display order with its items.
    /// Empty categories are kept so the tab bar stays stable.
    pub fn sections(&self) -> Vec<CatalogSection> {
        Category::ALL
            .iter()
            .map(|&category| CatalogSection {
                category,
                items: self.items_in(category).cloned().collect(),
            })
            .collect()
    }

    /// Case-insensitive substring search over name and description.
    /// An empty query returns every item.
    pub fn search(&self, query: &str) -> Result<Vec<&CatalogItem>, ValidationError> {
        let needle = validate_search_query(query)?.to_lowercase();
        Ok(self.items.iter().filter(|item| item.matches(&needle)).collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_items(&self) -> &[CatalogItem] {
        &self.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = StaticCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 34);

        let thank_you = catalog.find(2).unwrap();
        assert_eq!(thank_you.name, "Thank You");
        assert_eq!(thank_you.base_price, Money::from_rupees(1629, 0));
        assert_eq!(thank_you.badge.as_deref(), Some("Best Seller"));
    }

    #[test]
    fn test_builtin_catalog_parses_odd_prices() {
        let catalog = StaticCatalog::builtin().unwrap();
        // ",4440.00" in the listing
        assert_eq!(catalog.find(29).unwrap().base_price.paisa(), 444_000);
        // "500.0" in the listing
        assert_eq!(catalog.find(14).unwrap().base_price.paisa(), 50_000);
        assert_eq!(
            catalog.find(6).unwrap().original_price,
            Some(Money::from_rupees(2922, 0))
        );
    }

    #[test]
    fn test_sections_follow_menu_order() {
        let catalog = StaticCatalog::builtin().unwrap();
        let sections = catalog.sections();
        let order: Vec<Category> = sections.iter().map(|s| s.category).collect();
        assert_eq!(order, Category::ALL.to_vec());

        let total: usize = sections.iter().map(|s| s.items.len()).sum();
        assert_eq!(total, catalog.len());
        assert_eq!(catalog.items_in(Category::ODWich).count(), 5);
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let catalog = StaticCatalog::builtin().unwrap();

        let hits = catalog.search("MORTADELLA").unwrap();
        assert!(hits.iter().any(|i| i.name == "Mortadella"));
        // Every O-D WICH description mentions Chicken Mortadella
        assert!(hits.len() >= 5);

        let glazed = catalog.search("glazed").unwrap();
        assert!(glazed.iter().all(|i| i.category == Category::MondayOverdose));

        assert_eq!(catalog.search("").unwrap().len(), catalog.len());
        assert!(catalog.search("pizza").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let a = CatalogItem::new(1, "A", Category::OCombos, Money::zero());
        let b = CatalogItem::new(1, "B", Category::OCombos, Money::zero());
        assert!(matches!(
            StaticCatalog::new(vec![a, b]),
            Err(CoreError::CatalogLoadFailed(_))
        ));
    }

    #[test]
    fn test_bad_listing_price_is_reported() {
        let json = r#"[{ "id": 7, "name": "X", "price": "12.345", "category": "O-COMBOS" }]"#;
        let err = StaticCatalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("item 7"));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let json = r#"[{ "id": 1, "name": "X", "price": "1.00", "category": "PIZZA" }]"#;
        assert!(StaticCatalog::from_json(json).is_err());
    }
}
