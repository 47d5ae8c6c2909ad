//! # Cart Commands
//!
//! Commands behind the cart screen.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │            add_customization_to_cart                place_order         │
//! │            update_cart_quantity                     (checkout.rs)       │
//! │            increment / decrement                          │             │
//! │            remove_from_cart                               │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ─────────────────────► (back to empty)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use od_core::{CartEngine, CartEntry, CartTotals, EntryId, Money, Selection};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// One cart line as the cart screen shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub entry_id: EntryId,
    pub item_id: u32,
    pub name: String,
    pub image_ref: Option<String>,
    /// "Sandwich: Pulled Beef", "Add-ons: Cheese Slice", ...
    pub options: Vec<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

impl CartLineView {
    fn new(cart: &CartEngine, entry: &CartEntry) -> Self {
        CartLineView {
            entry_id: entry.entry_id().clone(),
            item_id: entry.item().id,
            name: entry.item().name.clone(),
            image_ref: entry.item().image_ref.clone(),
            options: entry.selection().summary_lines(),
            quantity: entry.quantity(),
            unit_price: cart.unit_price(entry),
            line_total: cart.entry_price(entry),
        }
    }
}

/// Cart response including entries and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub entries: Vec<CartLineView>,
    pub totals: CartTotals,
    /// e.g. "16%".
    pub tax_label: String,
}

impl From<&CartEngine> for CartResponse {
    fn from(cart: &CartEngine) -> Self {
        CartResponse {
            entries: cart
                .entries()
                .iter()
                .map(|entry| CartLineView::new(cart, entry))
                .collect(),
            totals: cart.totals(),
            tax_label: cart.tax_rate().label(),
        }
    }
}

fn snapshot(cart: &CartState) -> CartResponse {
    cart.with_cart(|c| CartResponse::from(c))
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  My Cart                                                                │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  Buy 2 OD-Wich Only !           [-] 1 [+]      Rs. 861.00  🗑  │    │
/// │  │    Sandwich: Pulled Beef                                       │    │
/// │  │    Bread: Croissant                                            │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Subtotal                                      Rs. 861.00      │    │
/// │  │  Tax (16%)                                     Rs. 137.76      │    │
/// │  │  Total                                         Rs. 998.76      │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    snapshot(cart)
}

/// Adds a menu item with a ready-made selection.
///
/// The "+" on a menu card uses this with an empty selection; it only
/// succeeds for items that need no choices.
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    item_id: u32,
    selection: Selection,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(item_id = item_id, quantity = quantity, "add_to_cart command");

    let item = catalog.item(item_id)?;
    cart.with_cart_mut(|c| c.add_entry(item, selection, quantity))?;

    Ok(snapshot(cart))
}

/// Sets an entry's quantity. Values below 1 become 1.
pub fn update_cart_quantity(
    cart: &CartState,
    entry_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(entry_id = %entry_id, quantity = quantity, "update_cart_quantity command");
    cart.with_cart_mut(|c| c.set_quantity(&EntryId::from(entry_id), quantity))?;
    Ok(snapshot(cart))
}

/// The cart line's "+" button.
pub fn increment_cart_entry(cart: &CartState, entry_id: &str) -> Result<CartResponse, ApiError> {
    debug!(entry_id = %entry_id, "increment_cart_entry command");
    cart.with_cart_mut(|c| c.increment(&EntryId::from(entry_id)))?;
    Ok(snapshot(cart))
}

/// The cart line's "-" button. Stops at 1; removal is a separate action.
pub fn decrement_cart_entry(cart: &CartState, entry_id: &str) -> Result<CartResponse, ApiError> {
    debug!(entry_id = %entry_id, "decrement_cart_entry command");
    cart.with_cart_mut(|c| c.decrement(&EntryId::from(entry_id)))?;
    Ok(snapshot(cart))
}

/// Removes an entry. Removing an entry that is already gone is a no-op.
pub fn remove_from_cart(cart: &CartState, entry_id: &str) -> CartResponse {
    debug!(entry_id = %entry_id, "remove_from_cart command");
    cart.with_cart_mut(|c| c.remove_entry(&EntryId::from(entry_id)));
    snapshot(cart)
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| c.clear());
    snapshot(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use od_core::OptionGroupKind;

    fn deal_selection() -> Selection {
        Selection::new()
            .with_choice(OptionGroupKind::Sandwich, "Pulled Beef")
            .with_choice(OptionGroupKind::Bread, "Croissant")
    }

    #[test]
    fn test_add_deal_and_totals() {
        let catalog = CatalogState::builtin().unwrap();
        let cart = CartState::new();

        let response = add_to_cart(&catalog, &cart, 1, deal_selection(), None).unwrap();

        assert_eq!(response.entries.len(), 1);
        assert_eq!(
            response.entries[0].options,
            vec!["Sandwich: Pulled Beef", "Bread: Croissant"]
        );
        assert_eq!(response.totals.subtotal, Money::from_paisa(86100));
        assert_eq!(response.totals.tax, Money::from_paisa(13776));
        assert_eq!(response.totals.grand_total, Money::from_paisa(99876));
        assert_eq!(response.tax_label, "16%");
    }

    #[test]
    fn test_add_without_required_choice_fails() {
        let catalog = CatalogState::builtin().unwrap();
        let cart = CartState::new();

        let err = add_to_cart(&catalog, &cart, 8, Selection::new(), Some(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(get_cart(&cart).entries.is_empty());

        let err = add_to_cart(&catalog, &cart, 404, Selection::new(), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_same_configuration_twice_is_two_lines() {
        let catalog = CatalogState::builtin().unwrap();
        let cart = CartState::new();

        add_to_cart(&catalog, &cart, 7, Selection::new(), None).unwrap();
        let response = add_to_cart(&catalog, &cart, 7, Selection::new(), None).unwrap();

        assert_eq!(response.entries.len(), 2);
        assert_ne!(response.entries[0].entry_id, response.entries[1].entry_id);
    }

    #[test]
    fn test_quantity_steppers() {
        let catalog = CatalogState::builtin().unwrap();
        let cart = CartState::new();
        let response = add_to_cart(&catalog, &cart, 7, Selection::new(), Some(2)).unwrap();
        let id = response.entries[0].entry_id.to_string();

        assert_eq!(increment_cart_entry(&cart, &id).unwrap().entries[0].quantity, 3);
        assert_eq!(update_cart_quantity(&cart, &id, 0).unwrap().entries[0].quantity, 1);
        assert_eq!(decrement_cart_entry(&cart, &id).unwrap().entries[0].quantity, 1);

        let err = update_cart_quantity(&cart, "missing", 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_remove_and_clear() {
        let catalog = CatalogState::builtin().unwrap();
        let cart = CartState::new();
        add_to_cart(&catalog, &cart, 7, Selection::new(), None).unwrap();
        let brownies = Selection::new().with_choice(OptionGroupKind::Flavor, "Glazed");
        let response = add_to_cart(&catalog, &cart, 4, brownies, None).unwrap();
        let first = response.entries[0].entry_id.to_string();

        let response = remove_from_cart(&cart, &first);
        assert_eq!(response.entries.len(), 1);
        // Already gone: no error
        assert_eq!(remove_from_cart(&cart, &first).entries.len(), 1);

        let response = clear_cart(&cart);
        assert!(response.entries.is_empty());
        assert_eq!(response.totals.grand_total, Money::zero());
    }
}
