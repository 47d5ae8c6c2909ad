//! # Customization State
//!
//! The item detail sheet that is currently open, if any.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Menu item tapped ──► CustomizationSession::new(item)                   │
//! │                           │  selection empty, quantity 1                │
//! │                           ▼                                             │
//! │  Option tapped ─────► select() / toggle_add_on()                        │
//! │  Stepper tapped ────► increment() / decrement()                         │
//! │                           │                                             │
//! │                           ▼                                             │
//! │  can_submit()? ── no ──► "Add to Cart" disabled                         │
//! │         │                                                               │
//! │        yes                                                              │
//! │         ▼                                                               │
//! │  "Add to Cart" ─────► CartEngine::add_entry(item, selection, qty)       │
//! │                       session closed                                    │
//! │                                                                         │
//! │  Sheet dismissed ───► session closed, nothing added                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;

use od_core::{
    AddOnPricing, CartEngine, CatalogItem, Money, OptionGroup, OptionGroupKind, Profile, Resolver,
    Selection, ValidationError,
};

/// One open customization sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomizationSession {
    item: CatalogItem,
    selection: Selection,
    quantity: i64,
}

impl CustomizationSession {
    pub fn new(item: CatalogItem) -> Self {
        CustomizationSession {
            item,
            selection: Selection::new(),
            quantity: 1,
        }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn profile(&self) -> Profile {
        Resolver::classify(&self.item)
    }

    pub fn option_groups(&self) -> &'static [OptionGroup] {
        Resolver::option_groups(&self.item)
    }

    /// Sets a single-choice group. A rejected label leaves the selection
    /// as it was.
    pub fn select(&mut self, kind: OptionGroupKind, label: &str) -> Result<(), ValidationError> {
        self.selection = Resolver::select(&self.item, &self.selection, kind, label)?;
        Ok(())
    }

    /// Toggles an add-on the item's add-on group lists.
    ///
    /// Returns whether the add-on is now selected. A fourth add-on is
    /// ignored.
    pub fn toggle_add_on(&mut self, label: &str) -> Result<bool, ValidationError> {
        self.selection = Resolver::toggle_add_on_for(&self.item, &self.selection, label)?;
        Ok(self.selection.add_ons().iter().any(|a| a == label))
    }

    /// Sets the quantity, floored at 1.
    pub fn set_quantity(&mut self, quantity: i64) -> i64 {
        self.quantity = quantity.max(1);
        self.quantity
    }

    pub fn increment(&mut self) -> i64 {
        self.set_quantity(self.quantity.saturating_add(1))
    }

    pub fn decrement(&mut self) -> i64 {
        self.set_quantity(self.quantity - 1)
    }

    /// First unmet requirement, if any.
    pub fn check(&self) -> Result<(), ValidationError> {
        Resolver::check(&self.item, &self.selection)
    }

    /// Whether "Add to Cart" is enabled.
    pub fn can_submit(&self) -> bool {
        Resolver::validate(&self.item, &self.selection)
    }

    /// Price of one unit as configured so far, quoted by the cart it
    /// will be added to.
    pub fn unit_price<P: AddOnPricing>(&self, cart: &CartEngine<P>) -> Money {
        cart.quote(&self.item, &self.selection)
    }

    /// What the sheet's "Add to Cart" button shows.
    pub fn total_price<P: AddOnPricing>(&self, cart: &CartEngine<P>) -> Money {
        self.unit_price(cart) * self.quantity
    }

    /// Hands the finished configuration to the cart.
    pub fn into_parts(self) -> (CatalogItem, Selection, i64) {
        (self.item, self.selection, self.quantity)
    }
}

/// Slot for the open sheet. Opening a new one replaces the old.
#[derive(Debug, Default)]
pub struct CustomizationState {
    session: RefCell<Option<CustomizationSession>>,
}

impl CustomizationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, item: CatalogItem) {
        *self.session.borrow_mut() = Some(CustomizationSession::new(item));
    }

    /// Closes the sheet, returning what it held.
    pub fn close(&self) -> Option<CustomizationSession> {
        self.session.borrow_mut().take()
    }

    pub fn is_open(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Runs `f` on the open session; `None` if no sheet is open.
    pub fn with_session<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&CustomizationSession) -> R,
    {
        self.session.borrow().as_ref().map(f)
    }

    /// Runs `f` on the open session mutably; `None` if no sheet is open.
    pub fn with_session_mut<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut CustomizationSession) -> R,
    {
        self.session.borrow_mut().as_mut().map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use od_core::Category;

    fn sandwich() -> CatalogItem {
        CatalogItem::new(8, "Chicken Mortadella", Category::ODWich, Money::from_paisa(65790))
    }

    fn donut_box() -> CatalogItem {
        CatalogItem::new(14, "Box Of 2 Regular", Category::ODonut, Money::from_rupees(500, 0))
    }

    #[test]
    fn test_sandwich_needs_both_choices() {
        let mut session = CustomizationSession::new(sandwich());
        assert_eq!(session.profile(), Profile::Sandwich);
        assert!(!session.can_submit());

        session.select(OptionGroupKind::Sandwich, "Pulled Beef").unwrap();
        assert!(!session.can_submit());

        session.select(OptionGroupKind::Bread, "Croissant").unwrap();
        assert!(session.can_submit());
    }

    #[test]
    fn test_rejected_choice_keeps_selection() {
        let mut session = CustomizationSession::new(sandwich());
        session.select(OptionGroupKind::Bread, "Ciabatta").unwrap();

        assert!(session.select(OptionGroupKind::Bread, "Rye").is_err());
        assert_eq!(session.selection().bread(), Some("Ciabatta"));

        assert!(matches!(
            session.select(OptionGroupKind::Flavor, "Glazed"),
            Err(ValidationError::GroupNotApplicable { .. })
        ));
    }

    #[test]
    fn test_quantity_floors_at_one() {
        let mut session = CustomizationSession::new(donut_box());
        assert_eq!(session.decrement(), 1);
        assert_eq!(session.increment(), 2);
        assert_eq!(session.set_quantity(-4), 1);
    }

    #[test]
    fn test_price_preview_includes_add_ons() {
        let cart = CartEngine::new();
        let mut session = CustomizationSession::new(sandwich());
        let base = session.unit_price(&cart);
        let cheese = OptionGroupKind::SandwichAddOns.choices()[0];

        assert!(session.toggle_add_on(cheese.label).unwrap());
        session.increment();

        assert_eq!(session.unit_price(&cart), base + cheese.price);
        assert_eq!(session.total_price(&cart), (base + cheese.price) * 2);
    }

    #[test]
    fn test_price_preview_matches_cart_pricing() {
        struct HappyHour;
        impl AddOnPricing for HappyHour {
            fn price_of(&self, _label: &str) -> Money {
                Money::from_rupees(20, 0)
            }
        }

        let mut cart = CartEngine::with_pricing(HappyHour, od_core::TaxRate::STANDARD);
        let mut session = CustomizationSession::new(sandwich());
        session.select(OptionGroupKind::Sandwich, "Pulled Beef").unwrap();
        session.select(OptionGroupKind::Bread, "Croissant").unwrap();
        session.toggle_add_on("Cheese Slice").unwrap();
        session.toggle_add_on("Pesto Chicken").unwrap();

        let previewed = session.total_price(&cart);
        assert_eq!(previewed, Money::from_paisa(65790 + 4000));

        let (item, selection, quantity) = session.into_parts();
        let id = cart.add_entry(&item, selection, quantity).unwrap();
        let charged = cart.entry_price(cart.entry(&id).unwrap());
        assert_eq!(charged, previewed);
    }

    #[test]
    fn test_state_open_and_close() {
        let state = CustomizationState::new();
        assert!(!state.is_open());
        assert_eq!(state.with_session(|s| s.quantity()), None);

        state.open(donut_box());
        assert_eq!(state.with_session_mut(|s| s.increment()), Some(2));

        let session = state.close().unwrap();
        assert_eq!(session.quantity(), 2);
        assert!(!state.is_open());
    }
}
