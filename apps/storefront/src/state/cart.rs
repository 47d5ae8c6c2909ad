//! # Cart State
//!
//! Owns the one cart the app has.
//!
//! ## Ownership
//! The storefront runs every command on the UI thread, so the cart lives in
//! a `Rc<RefCell<_>>`: cheap to hand to every screen, one borrow at a time.
//! Auth tasks never see this handle.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Screen Action            Command                   Cart Change         │
//! │  ─────────────            ───────                   ───────────         │
//! │                                                                         │
//! │  "Add to Cart" ─────────► add_customization_to_cart ► entries.push()   │
//! │                                                                         │
//! │  + / - stepper ─────────► increment / decrement ───► entry.qty ± 1     │
//! │                                                                         │
//! │  Trash icon ────────────► remove_from_cart() ──────► entries.remove()  │
//! │                                                                         │
//! │  Order placed ──────────► place_order() ───────────► entries.clear()   │
//! │                                                                         │
//! │  Cart screen ───────────► get_cart() ──────────────► (read only)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use od_core::{CartEngine, StaticAddOnPrices, TaxRate};

/// Shared handle to the cart.
///
/// Clones point at the same cart.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Rc<RefCell<CartEngine>>,
}

impl CartState {
    /// Creates an empty cart taxed at the standard rate.
    pub fn new() -> Self {
        Self::with_tax_rate(TaxRate::STANDARD)
    }

    /// Creates an empty cart taxed at `tax_rate`.
    pub fn with_tax_rate(tax_rate: TaxRate) -> Self {
        CartState {
            cart: Rc::new(RefCell::new(CartEngine::with_pricing(
                StaticAddOnPrices,
                tax_rate,
            ))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartEngine) -> R,
    {
        f(&self.cart.borrow())
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.increment(&entry_id))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartEngine) -> R,
    {
        f(&mut self.cart.borrow_mut())
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use od_core::{CatalogItem, Category, Money, Selection};

    #[test]
    fn test_clones_share_one_cart() {
        let state = CartState::new();
        let other = state.clone();
        let item = CatalogItem::new(7, "Sprite", Category::OdOnTheGo, Money::from_rupees(150, 0));

        state
            .with_cart_mut(|cart| cart.add_entry(&item, Selection::new(), 2))
            .unwrap();

        assert_eq!(other.with_cart(|cart| cart.total_quantity()), 2);
    }

    #[test]
    fn test_tax_rate_is_injected() {
        let state = CartState::with_tax_rate(TaxRate::from_bps(500));
        assert_eq!(state.with_cart(|cart| cart.tax_rate().bps()), 500);
    }
}
