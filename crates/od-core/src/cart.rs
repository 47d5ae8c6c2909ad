//! # Cart Engine
//!
//! Owns the ordered list of cart entries and every price derived from it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Engine Operations                               │
//! │                                                                         │
//! │  UI Action               Engine Call             State Change           │
//! │  ─────────               ───────────             ────────────           │
//! │                                                                         │
//! │  "Add to Cart" ────────► add_entry() ──────────► entries.push(new)     │
//! │                          (Resolver::check first)                        │
//! │                                                                         │
//! │  + / - stepper ────────► set_quantity() ───────► entry.qty = max(n, 1) │
//! │                                                                         │
//! │  Trash icon ───────────► remove_entry() ───────► entries.retain(..)    │
//! │                                                                         │
//! │  Order placed ─────────► clear() ──────────────► entries.clear()       │
//! │                                                                         │
//! │  Totals ───────────────► subtotal()/tax()/grand_total()                │
//! │                          recomputed from entries on every call          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is owned by whoever drives the UI and handed to screens by
//! reference; there is no global cart.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::CatalogItem;
use crate::customization::{AddOnPricing, Resolver, Selection, StaticAddOnPrices};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{EntryId, TaxRate};

// =============================================================================
// Cart Entry
// =============================================================================

/// One admitted, customized line in the cart.
///
/// ## Snapshot Pattern
/// The item is copied in at admission, and the selection is frozen with
/// it. Re-customizing produces a new entry; only `quantity` ever changes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    entry_id: EntryId,
    item: CatalogItem,
    selection: Selection,
    quantity: i64,
}

impl CartEntry {
    pub fn entry_id(&self) -> &EntryId {
        &self.entry_id
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Always ≥ 1.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub entry_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
}

// =============================================================================
// Cart Engine
// =============================================================================

/// The cart.
///
/// ## Invariants
/// - Every entry passed [`Resolver::check`] at admission
/// - Every quantity is ≥ 1
/// - Entries are never merged: the same configuration added twice is
///   two lines
#[derive(Debug, Clone)]
pub struct CartEngine<P = StaticAddOnPrices> {
    entries: Vec<CartEntry>,
    tax_rate: TaxRate,
    prices: P,
}

impl CartEngine<StaticAddOnPrices> {
    /// Empty cart with the menu's add-on prices and the 16% tax rate.
    pub fn new() -> Self {
        Self::with_pricing(StaticAddOnPrices, TaxRate::STANDARD)
    }
}

impl Default for CartEngine<StaticAddOnPrices> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: AddOnPricing> CartEngine<P> {
    pub fn with_pricing(prices: P, tax_rate: TaxRate) -> Self {
        CartEngine {
            entries: Vec::new(),
            tax_rate,
            prices,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Admits a new entry and returns its id.
    ///
    /// Fails with a validation error if the selection does not satisfy the
    /// item's required option groups. A quantity below 1 is raised to 1.
    pub fn add_entry(
        &mut self,
        item: &CatalogItem,
        selection: Selection,
        quantity: i64,
    ) -> CoreResult<EntryId> {
        Resolver::check(item, &selection)?;

        let entry = CartEntry {
            entry_id: EntryId::generate(),
            item: item.clone(),
            selection,
            quantity: quantity.max(1),
        };
        let id = entry.entry_id.clone();

        debug!(entry_id = %id, item_id = item.id, quantity = entry.quantity, "cart entry added");
        self.entries.push(entry);
        Ok(id)
    }

    /// Removes an entry. Absent ids are ignored.
    pub fn remove_entry(&mut self, entry_id: &EntryId) {
        let before = self.entries.len();
        self.entries.retain(|e| &e.entry_id != entry_id);
        if self.entries.len() != before {
            debug!(entry_id = %entry_id, "cart entry removed");
        }
    }

    /// Sets an entry's quantity, clamped to a minimum of 1.
    ///
    /// Returns the quantity actually stored.
    pub fn set_quantity(&mut self, entry_id: &EntryId, quantity: i64) -> CoreResult<i64> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| &e.entry_id == entry_id)
            .ok_or_else(|| CoreError::EntryNotFound(entry_id.to_string()))?;

        entry.quantity = quantity.max(1);
        debug!(entry_id = %entry_id, quantity = entry.quantity, "cart quantity set");
        Ok(entry.quantity)
    }

    /// The cart screen's "+" button.
    pub fn increment(&mut self, entry_id: &EntryId) -> CoreResult<i64> {
        let current = self.quantity_of(entry_id)?;
        self.set_quantity(entry_id, current.saturating_add(1))
    }

    /// The cart screen's "-" button. Stays at 1 once there.
    pub fn decrement(&mut self, entry_id: &EntryId) -> CoreResult<i64> {
        let current = self.quantity_of(entry_id)?;
        self.set_quantity(entry_id, current - 1)
    }

    /// Empties the cart (after an order is placed).
    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "cart cleared");
        self.entries.clear();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn entry(&self, entry_id: &EntryId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| &e.entry_id == entry_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Units across every entry; saturates rather than overflowing.
    pub fn total_quantity(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |acc, e| acc.saturating_add(e.quantity))
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// The add-on price table this cart charges from.
    pub fn prices(&self) -> &P {
        &self.prices
    }

    /// Unit price this cart would charge for a configuration, admitted
    /// or not.
    pub fn quote(&self, item: &CatalogItem, selection: &Selection) -> Money {
        let add_ons: Money = selection
            .add_ons()
            .iter()
            .map(|label| self.prices.price_of(label))
            .sum();
        item.base_price + add_ons
    }

    /// Base price plus selected add-ons, for a single unit.
    pub fn unit_price(&self, entry: &CartEntry) -> Money {
        self.quote(&entry.item, &entry.selection)
    }

    /// `(base + add-ons) × quantity`.
    pub fn entry_price(&self, entry: &CartEntry) -> Money {
        self.unit_price(entry) * entry.quantity
    }

    /// Sum of every entry price.
    pub fn subtotal(&self) -> Money {
        self.entries.iter().map(|e| self.entry_price(e)).sum()
    }

    /// Tax on an arbitrary subtotal at this cart's rate.
    pub fn tax_on(&self, subtotal: Money) -> Money {
        subtotal.calculate_tax(self.tax_rate)
    }

    /// Tax on the current subtotal.
    pub fn tax(&self) -> Money {
        self.tax_on(self.subtotal())
    }

    /// Subtotal plus tax.
    pub fn grand_total(&self) -> Money {
        let subtotal = self.subtotal();
        subtotal + self.tax_on(subtotal)
    }

    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = self.tax_on(subtotal);
        CartTotals {
            entry_count: self.len(),
            total_quantity: self.total_quantity(),
            subtotal,
            tax,
            grand_total: subtotal + tax,
        }
    }

    fn quantity_of(&self, entry_id: &EntryId) -> CoreResult<i64> {
        self.entry(entry_id)
            .map(|e| e.quantity)
            .ok_or_else(|| CoreError::EntryNotFound(entry_id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
