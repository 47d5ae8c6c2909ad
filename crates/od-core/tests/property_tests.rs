//! # Property-Based Tests
//!
//! Cart aggregate and customization invariants checked with proptest.

use od_core::{
    CartEngine, CatalogItem, Category, EntryId, Money, OptionGroupKind, Resolver, Selection,
    MAX_ADD_ONS,
};
use proptest::collection::vec;
use proptest::prelude::*;

const ADD_ON_LABELS: [&str; 8] = [
    "Cheese Slice",
    "Double Cheese Slice",
    "Pesto Chicken",
    "Chicken Mortadella",
    "Spicy Pakistani",
    "Chicken Honey Mustard",
    "Pulled Beef",
    "Not On The Menu",
];

fn sandwich(price_paisa: i64) -> CatalogItem {
    CatalogItem::new(33, "SandWich", Category::ODWich, Money::from_paisa(price_paisa))
}

fn built(add_ons: &[usize]) -> Selection {
    add_ons.iter().fold(
        Selection::new()
            .with_choice(OptionGroupKind::Sandwich, "Pulled Beef")
            .with_choice(OptionGroupKind::Bread, "Croissant"),
        |sel, &i| sel.with_add_on(ADD_ON_LABELS[i % ADD_ON_LABELS.len()]),
    )
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Subtotal is the sum of entry prices after any mix of mutations.
    #[test]
    fn subtotal_equals_sum_of_entry_prices(
        ops in vec((0u8..3, 0i64..500_000, -3i64..20, 0usize..16, vec(0usize..8, 0..5)), 1..40)
    ) {
        let mut cart = CartEngine::new();
        let mut ids: Vec<EntryId> = Vec::new();

        for (op, price, qty, pick, add_ons) in ops {
            match op {
                0 => {
                    let id = cart.add_entry(&sandwich(price), built(&add_ons), qty).expect("valid selection");
                    ids.push(id);
                }
                1 if !ids.is_empty() => {
                    let id = ids.remove(pick % ids.len());
                    cart.remove_entry(&id);
                }
                _ if !ids.is_empty() => {
                    let id = &ids[pick % ids.len()];
                    cart.set_quantity(id, qty).expect("entry exists");
                }
                _ => {}
            }

            let expected: Money = cart.entries().iter().map(|e| cart.entry_price(e)).sum();
            prop_assert_eq!(cart.subtotal(), expected);
            prop_assert_eq!(cart.grand_total(), cart.subtotal() + cart.tax());
            prop_assert!(cart.entries().iter().all(|e| e.quantity() >= 1));
            prop_assert_eq!(cart.len(), ids.len());
        }
    }

    /// Toggling add-ons never leaves more than three selected.
    #[test]
    fn add_on_cap_holds(toggles in vec(0usize..8, 0..30)) {
        let mut selection = Selection::new();
        for i in toggles {
            let before = selection.clone();
            let label = ADD_ON_LABELS[i];
            selection = Resolver::toggle_add_on(&selection, label);

            prop_assert!(selection.add_ons().len() <= MAX_ADD_ONS);
            // A fourth distinct label leaves the set unchanged
            if before.add_ons().len() == MAX_ADD_ONS && !before.add_ons().iter().any(|a| a == label) {
                prop_assert_eq!(&selection, &before);
            }
        }
    }

    /// Sandwich items stay invalid without both base choices, whatever the add-ons.
    #[test]
    fn sandwich_needs_both_choices(add_ons in vec(0usize..8, 0..4), has_sandwich: bool, has_bread: bool) {
        let item = sandwich(65_790);
        let mut selection = add_ons
            .iter()
            .fold(Selection::new(), |sel, &i| sel.with_add_on(ADD_ON_LABELS[i]));
        if has_sandwich {
            selection.set_choice(OptionGroupKind::Sandwich, "Pesto Chicken");
        }
        if has_bread {
            selection.set_choice(OptionGroupKind::Bread, "Ciabatta");
        }

        prop_assert_eq!(Resolver::validate(&item, &selection), has_sandwich && has_bread);
    }

    /// Money parsing accepts any rupee/paisa pair written with separators.
    #[test]
    fn parse_with_separators(rupees in 0i64..10_000_000, paisa in 0i64..100) {
        let plain = format!("{}.{:02}", rupees, paisa);
        let grouped = plain
            .split_once('.')
            .map(|(whole, frac)| {
                let digits: Vec<char> = whole.chars().collect();
                let mut out = String::new();
                for (i, c) in digits.iter().enumerate() {
                    if i > 0 && (digits.len() - i) % 3 == 0 {
                        out.push(',');
                    }
                    out.push(*c);
                }
                format!("{}.{}", out, frac)
            })
            .unwrap_or_default();

        let expected = Money::from_rupees(rupees, paisa);
        prop_assert_eq!(Money::parse(&plain).unwrap(), expected);
        prop_assert_eq!(Money::parse(&grouped).unwrap(), expected);
    }
}
