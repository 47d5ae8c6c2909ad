//! # Customization Commands
//!
//! Drive the item detail sheet: open it, pick options, set the quantity,
//! and hand the result to the cart.
//!
//! ## Sheet Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Chicken Mortadella                                  Rs. 657.90        │
//! │                                                                         │
//! │  Choose Sandwich            Please select one option      (required)   │
//! │    ○ Pulled Beef   ● Pesto Chicken   ○ Chicken Mortadella ...          │
//! │                                                                         │
//! │  Choose Bread               Please select one option      (required)   │
//! │    ○ Ciabatta   ○ Croissant   ○ Multi grain bread                      │
//! │                                                                         │
//! │  Add Ons                    Select up to 3 options                      │
//! │    ☐ Cheese Slice +87   ☐ Double Cheese Slice +174 ...                  │
//! │                                                                         │
//! │  [ - ]  1  [ + ]                  [ Add to Cart  Rs. 657.90 ]  (off)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use od_core::{AddOnPricing, CartEngine, CatalogItem, Money, OptionGroupKind, Profile};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::commands::cart::CartResponse;
use crate::error::{ApiError, ErrorCode};
use crate::state::{CartState, CatalogState, CustomizationSession, CustomizationState};

// =============================================================================
// Response DTOs
// =============================================================================

/// One tappable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionChoiceView {
    pub label: String,
    pub price: Money,
    pub selected: bool,
}

/// One option group as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OptionGroupView {
    pub kind: OptionGroupKind,
    pub title: String,
    pub hint: String,
    pub required: bool,
    pub max_selections: usize,
    pub choices: Vec<OptionChoiceView>,
}

/// Everything the sheet shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationView {
    pub item: CatalogItem,
    pub profile: Profile,
    pub groups: Vec<OptionGroupView>,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_price: Money,
    /// Whether "Add to Cart" is enabled.
    pub can_submit: bool,
    /// First unmet requirement, e.g. "Choose Bread is required".
    pub missing: Option<String>,
}

impl CustomizationView {
    /// Renders the sheet with prices quoted by `cart`.
    pub fn new<P: AddOnPricing>(session: &CustomizationSession, cart: &CartEngine<P>) -> Self {
        let selection = session.selection();
        let groups = session
            .option_groups()
            .iter()
            .map(|group| OptionGroupView {
                kind: group.kind,
                title: group.title().to_string(),
                hint: group.hint().to_string(),
                required: group.required,
                max_selections: group.max_selections,
                choices: group
                    .choices()
                    .iter()
                    .map(|choice| OptionChoiceView {
                        label: choice.label.to_string(),
                        price: if group.kind.is_add_on() {
                            cart.prices().price_of(choice.label)
                        } else {
                            choice.price
                        },
                        selected: selection.is_selected(group.kind, choice.label),
                    })
                    .collect(),
            })
            .collect();

        CustomizationView {
            item: session.item().clone(),
            profile: session.profile(),
            groups,
            quantity: session.quantity(),
            unit_price: session.unit_price(cart),
            total_price: session.total_price(cart),
            can_submit: session.can_submit(),
            missing: session.check().err().map(|e| e.to_string()),
        }
    }
}

fn no_open_sheet() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "No item is being customized")
}

fn current_view(
    custom: &CustomizationState,
    cart: &CartState,
) -> Result<CustomizationView, ApiError> {
    cart.with_cart(|c| custom.with_session(|session| CustomizationView::new(session, c)))
        .ok_or_else(no_open_sheet)
}

// =============================================================================
// Commands
// =============================================================================

/// Opens the sheet for a menu item, replacing any open one.
pub fn start_customization(
    catalog: &CatalogState,
    custom: &CustomizationState,
    cart: &CartState,
    item_id: u32,
) -> Result<CustomizationView, ApiError> {
    debug!(item_id = item_id, "start_customization command");
    let item = catalog.item(item_id)?.clone();
    custom.open(item);
    current_view(custom, cart)
}

/// Gets the open sheet.
pub fn get_customization(
    custom: &CustomizationState,
    cart: &CartState,
) -> Result<CustomizationView, ApiError> {
    current_view(custom, cart)
}

/// Picks a sandwich, bread or flavor.
pub fn select_option(
    custom: &CustomizationState,
    cart: &CartState,
    kind: OptionGroupKind,
    label: &str,
) -> Result<CustomizationView, ApiError> {
    debug!(?kind, label = %label, "select_option command");
    custom
        .with_session_mut(|session| session.select(kind, label))
        .ok_or_else(no_open_sheet)??;
    current_view(custom, cart)
}

/// Ticks or unticks an add-on. A fourth add-on is ignored.
pub fn toggle_add_on(
    custom: &CustomizationState,
    cart: &CartState,
    label: &str,
) -> Result<CustomizationView, ApiError> {
    debug!(label = %label, "toggle_add_on command");
    custom
        .with_session_mut(|session| session.toggle_add_on(label))
        .ok_or_else(no_open_sheet)??;
    current_view(custom, cart)
}

/// Sets the sheet's quantity, floored at 1.
pub fn set_customization_quantity(
    custom: &CustomizationState,
    cart: &CartState,
    quantity: i64,
) -> Result<CustomizationView, ApiError> {
    debug!(quantity = quantity, "set_customization_quantity command");
    custom
        .with_session_mut(|session| session.set_quantity(quantity))
        .ok_or_else(no_open_sheet)?;
    current_view(custom, cart)
}

/// The sheet's "+" button.
pub fn increment_customization(
    custom: &CustomizationState,
    cart: &CartState,
) -> Result<CustomizationView, ApiError> {
    custom
        .with_session_mut(CustomizationSession::increment)
        .ok_or_else(no_open_sheet)?;
    current_view(custom, cart)
}

/// The sheet's "-" button. Stops at 1.
pub fn decrement_customization(
    custom: &CustomizationState,
    cart: &CartState,
) -> Result<CustomizationView, ApiError> {
    custom
        .with_session_mut(CustomizationSession::decrement)
        .ok_or_else(no_open_sheet)?;
    current_view(custom, cart)
}

/// Closes the sheet without adding anything.
pub fn cancel_customization(custom: &CustomizationState) {
    debug!("cancel_customization command");
    custom.close();
}

/// Adds the configured item to the cart and closes the sheet.
///
/// An incomplete selection leaves the sheet open and the cart untouched.
pub fn add_customization_to_cart(
    custom: &CustomizationState,
    cart: &CartState,
) -> Result<CartResponse, ApiError> {
    debug!("add_customization_to_cart command");
    custom
        .with_session(CustomizationSession::check)
        .ok_or_else(no_open_sheet)??;

    let session = custom.close().ok_or_else(no_open_sheet)?;
    let (item, selection, quantity) = session.into_parts();

    let entry_id = cart.with_cart_mut(|c| c.add_entry(&item, selection, quantity))?;
    info!(entry_id = %entry_id, item = %item.name, quantity = quantity, "item added to cart");

    Ok(cart.with_cart(|c| CartResponse::from(c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CatalogState, CustomizationState, CartState) {
        (
            CatalogState::builtin().unwrap(),
            CustomizationState::new(),
            CartState::new(),
        )
    }

    #[test]
    fn test_sandwich_sheet_groups() {
        let (catalog, custom, cart) = setup();
        let view = start_customization(&catalog, &custom, &cart, 8).unwrap();

        assert_eq!(view.profile, Profile::Sandwich);
        let titles: Vec<_> = view.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Choose Sandwich", "Choose Bread", "Add Ons"]);
        assert_eq!(view.groups[2].max_selections, 3);
        assert!(!view.can_submit);
        assert_eq!(view.missing.as_deref(), Some("Choose Sandwich is required"));
    }

    #[test]
    fn test_incomplete_selection_keeps_sheet_open() {
        let (catalog, custom, cart) = setup();
        start_customization(&catalog, &custom, &cart, 8).unwrap();
        select_option(&custom, &cart, OptionGroupKind::Sandwich, "Pulled Beef").unwrap();

        let err = add_customization_to_cart(&custom, &cart).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Choose Bread is required");
        assert!(custom.is_open());
        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[test]
    fn test_complete_selection_lands_in_cart() {
        let (catalog, custom, cart) = setup();
        start_customization(&catalog, &custom, &cart, 8).unwrap();
        select_option(&custom, &cart, OptionGroupKind::Sandwich, "Pulled Beef").unwrap();
        select_option(&custom, &cart, OptionGroupKind::Bread, "Croissant").unwrap();
        let view = toggle_add_on(&custom, &cart, "Cheese Slice").unwrap();
        assert!(view.can_submit);
        assert_eq!(view.unit_price, Money::from_paisa(65790 + 8700));

        increment_customization(&custom, &cart).unwrap();
        let response = add_customization_to_cart(&custom, &cart).unwrap();

        assert!(!custom.is_open());
        assert_eq!(response.entries.len(), 1);
        assert_eq!(response.entries[0].quantity, 2);
        assert_eq!(response.totals.subtotal, Money::from_paisa((65790 + 8700) * 2));
    }

    #[test]
    fn test_add_on_cap_and_membership() {
        let (catalog, custom, cart) = setup();
        start_customization(&catalog, &custom, &cart, 3).unwrap();
        select_option(&custom, &cart, OptionGroupKind::Flavor, "Glazed").unwrap();

        for label in ["Nutella Filling", "Cream Cheese", "Caramel Drizzle", "Extra Sprinkles"] {
            toggle_add_on(&custom, &cart, label).unwrap();
        }
        let view = get_customization(&custom, &cart).unwrap();
        let picked = view.groups[1].choices.iter().filter(|c| c.selected).count();
        assert_eq!(picked, 3);

        // Sandwich add-ons are not offered on a sweet item
        assert!(toggle_add_on(&custom, &cart, "Cheese Slice").is_err());
    }

    #[test]
    fn test_plain_item_submits_immediately() {
        let (catalog, custom, cart) = setup();
        let view = start_customization(&catalog, &custom, &cart, 7).unwrap();
        assert_eq!(view.profile, Profile::None);
        assert!(view.groups.is_empty());
        assert!(view.can_submit);

        decrement_customization(&custom, &cart).unwrap();
        let response = add_customization_to_cart(&custom, &cart).unwrap();
        assert_eq!(response.totals.total_quantity, 1);
    }

    #[test]
    fn test_commands_without_open_sheet() {
        let (_, custom, cart) = setup();
        assert_eq!(get_customization(&custom, &cart).unwrap_err().code, ErrorCode::NotFound);
        assert!(set_customization_quantity(&custom, &cart, 3).is_err());
        assert!(add_customization_to_cart(&custom, &cart).is_err());
        cancel_customization(&custom);
    }
}
