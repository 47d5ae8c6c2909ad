//! # Checkout
//!
//! Collects and checks the checkout form, and snapshots the cart into an
//! order summary for the confirmation screen.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Cart screen ──"Proceed to Checkout"──► CheckoutForm                    │
//! │                                           │                             │
//! │                                           ▼                             │
//! │                                  CheckoutForm::validate()               │
//! │                                  (name, phone, email, branch, payment)  │
//! │                                           │                             │
//! │                                           ▼                             │
//! │                                  OrderSummary::review(cart, form)       │
//! │                                  (EmptyCart if nothing to order)        │
//! │                                           │                             │
//! │                                           ▼                             │
//! │                                  confirmation screen, cart cleared      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here talks to a payment gateway or order service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::cart::{CartEngine, CartTotals};
use crate::customization::AddOnPricing;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{EntryId, OrderType};
use crate::validation::{
    validate_email, validate_full_name, validate_instructions, validate_phone, ValidationResult,
};

// =============================================================================
// Choices
// =============================================================================

/// Store branch an order is picked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Branch {
    #[serde(rename = "PIA Branch")]
    Pia,
    #[serde(rename = "Barkat Market Branch")]
    BarkatMarket,
}

impl Branch {
    pub const ALL: [Branch; 2] = [Branch::Pia, Branch::BarkatMarket];

    pub const fn label(&self) -> &'static str {
        match self {
            Branch::Pia => "PIA Branch",
            Branch::BarkatMarket => "Barkat Market Branch",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Branch {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Branch::ALL
            .iter()
            .copied()
            .find(|b| b.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "branch".to_string(),
                allowed: Branch::ALL.iter().map(|b| b.label().to_string()).collect(),
            })
    }
}

/// How the customer pays. Recorded only; no payment is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
    #[serde(rename = "Credit/Debit Card")]
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::CashOnDelivery, PaymentMethod::Card];

    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Card => "Credit/Debit Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: PaymentMethod::ALL
                    .iter()
                    .map(|p| p.label().to_string())
                    .collect(),
            })
    }
}

/// When the order should be ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PickupTime {
    #[default]
    Asap,
    Scheduled {
        #[ts(as = "String")]
        at: DateTime<Utc>,
    },
}

impl fmt::Display for PickupTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickupTime::Asap => f.write_str("ASAP"),
            PickupTime::Scheduled { at } => write!(f, "{}", at.format("%Y-%m-%d %H:%M")),
        }
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// The checkout screen's fields, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub instructions: String,
    pub order_type: OrderType,
    pub branch: Option<Branch>,
    pub payment_method: Option<PaymentMethod>,
    pub pickup_time: PickupTime,
}

impl CheckoutForm {
    /// Checks every field and returns a normalized copy (trimmed text,
    /// compact phone number). The first failing field is reported.
    ///
    /// ## Rules
    /// - Full name required
    /// - Phone: 10 to 13 digits, optional leading `+`
    /// - Email well-formed
    /// - Branch required for pickup orders
    /// - Payment method required
    /// - Instructions at most 500 characters
    pub fn validate(&self) -> ValidationResult<CheckoutForm> {
        let full_name = validate_full_name(&self.full_name)?;
        let phone = validate_phone(&self.phone)?;
        let email = validate_email(&self.email)?;

        if self.order_type == OrderType::Pickup && self.branch.is_none() {
            return Err(ValidationError::required("branch"));
        }
        let payment_method = self
            .payment_method
            .ok_or_else(|| ValidationError::required("payment method"))?;

        let instructions = validate_instructions(&self.instructions)?;

        Ok(CheckoutForm {
            full_name,
            phone,
            email,
            instructions,
            order_type: self.order_type,
            branch: self.branch,
            payment_method: Some(payment_method),
            pickup_time: self.pickup_time,
        })
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// One cart entry as the confirmation screen prints it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub entry_id: EntryId,
    pub name: String,
    pub options: Vec<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Snapshot of a reviewed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub customer: CheckoutForm,
    pub lines: Vec<OrderLine>,
    pub totals: CartTotals,
    #[ts(as = "String")]
    pub reviewed_at: DateTime<Utc>,
}

impl OrderSummary {
    /// Validates the form against a non-empty cart and snapshots both.
    pub fn review<P: AddOnPricing>(
        cart: &CartEngine<P>,
        form: &CheckoutForm,
    ) -> CoreResult<OrderSummary> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let customer = form.validate()?;

        let lines = cart
            .entries()
            .iter()
            .map(|entry| OrderLine {
                entry_id: entry.entry_id().clone(),
                name: entry.item().name.clone(),
                options: entry.selection().summary_lines(),
                quantity: entry.quantity(),
                unit_price: cart.unit_price(entry),
                line_total: cart.entry_price(entry),
            })
            .collect();

        Ok(OrderSummary {
            customer,
            lines,
            totals: cart.totals(),
            reviewed_at: Utc::now(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
