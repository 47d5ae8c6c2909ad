//! # Checkout Commands
//!
//! Review the order and place it.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  new_checkout_form() ──► form prefilled with the store's order type     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  review_order(form) ──► OrderSummary (lines + totals)                   │
//! │         │                 EmptyCart / field errors → VALIDATION_ERROR   │
//! │         ▼                                                               │
//! │  place_order(form) ───► OrderConfirmation, cart cleared                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders are confirmed locally; nothing is submitted to a server.

use chrono::Utc;
use od_core::{CheckoutForm, OrderSummary, OrderType};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{CartState, StorefrontConfig};

/// What the confirmation screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Short reference read out at the counter, e.g. "261018-3F9A1C0B".
    pub order_ref: String,
    pub summary: OrderSummary,
    pub message: String,
}

/// A blank form with the store's default order type.
pub fn new_checkout_form(config: &StorefrontConfig) -> CheckoutForm {
    CheckoutForm {
        order_type: config.default_order_type,
        ..CheckoutForm::default()
    }
}

/// Validates the form against the current cart.
pub fn review_order(
    cart: &CartState,
    config: &StorefrontConfig,
    form: &CheckoutForm,
) -> Result<OrderSummary, ApiError> {
    debug!(order_type = ?form.order_type, "review_order command");

    if let Some(branch) = form.branch {
        if form.order_type == OrderType::Pickup && !config.offers_branch(branch) {
            return Err(ApiError::validation(format!(
                "{} is not taking pickup orders",
                branch
            )));
        }
    }

    Ok(cart.with_cart(|c| OrderSummary::review(c, form))?)
}

/// Confirms the order and empties the cart.
///
/// A failed review leaves the cart as it was.
pub fn place_order(
    cart: &CartState,
    config: &StorefrontConfig,
    form: &CheckoutForm,
) -> Result<OrderConfirmation, ApiError> {
    debug!("place_order command");
    let summary = review_order(cart, config, form)?;
    let order_ref = order_reference();

    cart.with_cart_mut(|c| c.clear());

    let total = config.format_currency(summary.totals.grand_total);
    info!(
        order_ref = %order_ref,
        lines = summary.lines.len(),
        total = %total,
        order_type = ?summary.customer.order_type,
        "order placed"
    );

    let message = match (summary.customer.order_type, summary.customer.branch) {
        (OrderType::Pickup, Some(branch)) => format!(
            "Thank you, {}! Your order of {} will be ready for pickup at {} ({}).",
            summary.customer.full_name, total, branch, summary.customer.pickup_time
        ),
        _ => format!(
            "Thank you, {}! Your order of {} is on its way.",
            summary.customer.full_name, total
        ),
    };

    Ok(OrderConfirmation {
        order_ref,
        summary,
        message,
    })
}

fn order_reference() -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}-{}", Utc::now().format("%y%m%d"), &id[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart};
    use crate::error::ErrorCode;
    use crate::state::CatalogState;
    use od_core::{Branch, Money, OptionGroupKind, PaymentMethod, PickupTime, Selection};

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Ayesha Khan".into(),
            phone: "+92 300 1234567".into(),
            email: "ayesha@example.com".into(),
            branch: Some(Branch::BarkatMarket),
            payment_method: Some(PaymentMethod::CashOnDelivery),
            ..new_checkout_form(&StorefrontConfig::default())
        }
    }

    fn cart_with_deal() -> CartState {
        let catalog = CatalogState::builtin().unwrap();
        let cart = CartState::new();
        let selection = Selection::new()
            .with_choice(OptionGroupKind::Sandwich, "Pulled Beef")
            .with_choice(OptionGroupKind::Bread, "Croissant");
        add_to_cart(&catalog, &cart, 1, selection, None).unwrap();
        cart
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let err = review_order(&CartState::new(), &StorefrontConfig::default(), &form()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Your cart is empty");
    }

    #[test]
    fn test_review_reports_form_errors() {
        let cart = cart_with_deal();
        let mut bad = form();
        bad.payment_method = None;

        let err = review_order(&cart, &StorefrontConfig::default(), &bad).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("payment method"));
    }

    #[test]
    fn test_unlisted_branch_is_rejected() {
        let cart = cart_with_deal();
        let config = StorefrontConfig {
            branches: vec![Branch::Pia],
            ..StorefrontConfig::default()
        };
        let err = review_order(&cart, &config, &form()).unwrap_err();
        assert_eq!(err.message, "Barkat Market Branch is not taking pickup orders");
    }

    #[test]
    fn test_place_order_clears_cart() {
        let cart = cart_with_deal();
        let confirmation = place_order(&cart, &StorefrontConfig::default(), &form()).unwrap();

        assert_eq!(confirmation.summary.totals.grand_total, Money::from_paisa(99876));
        assert_eq!(confirmation.summary.customer.phone, "+923001234567");
        assert_eq!(confirmation.order_ref.len(), 15);
        assert_eq!(
            confirmation.message,
            "Thank you, Ayesha Khan! Your order of Rs. 998.76 will be ready for pickup at Barkat Market Branch (ASAP)."
        );
        assert!(get_cart(&cart).entries.is_empty());
    }

    #[test]
    fn test_failed_order_keeps_cart() {
        let cart = cart_with_deal();
        let mut bad = form();
        bad.email = "not-an-email".into();

        assert!(place_order(&cart, &StorefrontConfig::default(), &bad).is_err());
        assert_eq!(get_cart(&cart).entries.len(), 1);
    }

    #[test]
    fn test_delivery_message() {
        let cart = cart_with_deal();
        let delivery = CheckoutForm {
            order_type: OrderType::Delivery,
            branch: None,
            pickup_time: PickupTime::Asap,
            ..form()
        };
        let confirmation = place_order(&cart, &StorefrontConfig::default(), &delivery).unwrap();
        assert!(confirmation.message.ends_with("is on its way."));
    }
}
